//! Imagevault-Blob: Blob store client for binary image payloads.
//!
//! The blob store holds the binary half of a stored image, keyed by the same
//! [`ImageId`] as the metadata row, and is the single source of truth for
//! payload bytes and content-type. This crate defines the [`BlobStore`]
//! capability trait plus two backends:
//!
//! - [`FsBlobStore`] - filesystem-backed objects with a content-type sidecar
//! - [`MemoryBlobStore`] - in-memory backend with fault injection, for tests
//!
//! The client has no knowledge of metadata; every operation is keyed by the
//! identifier alone.

mod fs;
mod memory;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;

use async_trait::async_trait;
use imagevault_common::{ImageId, Result};

/// A fully materialized object read back from the blob store.
///
/// The payload is drained completely before being returned so callers always
/// see content-type and full length together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Binary payload.
    pub data: Vec<u8>,
    /// Content-type tag supplied at write time, returned unchanged.
    pub content_type: String,
}

/// Capability set the coordinator requires from a blob store.
///
/// Absence is signaled in-band (`Ok(None)` / `Ok(false)`); any `Err` is a
/// hard store error, never a disguised not-found.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store an object under `key`. Re-putting the same key replaces content.
    async fn put(&self, key: ImageId, data: &[u8], content_type: &str) -> Result<()>;

    /// Fetch the object stored under `key`, or `None` if no such object exists.
    async fn get(&self, key: ImageId) -> Result<Option<Blob>>;

    /// Delete the object stored under `key`.
    ///
    /// Returns `false` when the key did not exist; that is not an error.
    async fn delete(&self, key: ImageId) -> Result<bool>;
}
