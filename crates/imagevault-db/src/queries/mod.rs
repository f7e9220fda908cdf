//! Database query operations.

pub mod images;
