//! Common error types used throughout imagevault.
//!
//! This module provides a unified error type covering the failure cases the
//! store clients and the normalizer can report: not found, duplicate key,
//! database failures, blob storage failures, and image codec failures.

/// Common error type for imagevault.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested object was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record with the same key already exists.
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// A metadata store operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A blob store operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The input could not be decoded as a raster image.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The normalized image could not be re-encoded.
    #[error("Encode error: {0}")]
    Encode(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Duplicate error.
    pub fn duplicate<S: Into<String>>(msg: S) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new Storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new Decode error.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new Encode error.
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        Self::Encode(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
