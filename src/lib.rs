//! Imagevault - Image storage service.
//!
//! Coordinates two independently-failing stores under one identifier: a blob
//! store holding the normalized binary payload and a relational store holding
//! the metadata row. This library crate exposes the core for integration
//! testing; the `imagevault` binary wraps it in a small CLI.

pub mod config;
pub mod coordinator;
pub mod normalize;
