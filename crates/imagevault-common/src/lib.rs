//! Imagevault-Common: Shared error types and typed identifiers.
//!
//! This crate provides the pieces every other imagevault crate needs:
//!
//! - **Typed IDs**: A type-safe UUID wrapper for stored images
//! - **Error Handling**: The common error type and result alias
//!
//! # Examples
//!
//! ```
//! use imagevault_common::{Error, ImageId, Result};
//!
//! // Generate a fresh image identifier
//! let id = ImageId::new();
//!
//! // Use the common error type
//! fn example() -> Result<()> {
//!     Err(Error::not_found("image"))
//! }
//! ```

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::ImageId;
