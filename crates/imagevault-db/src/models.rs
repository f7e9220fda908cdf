//! Rust models matching the database schema.

use imagevault_common::ImageId;
use serde::{Deserialize, Serialize};

/// Metadata row for a stored image.
///
/// The row exists iff a blob exists under the same key; the binary content
/// itself is never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRecord {
    /// Primary key, shared with the blob store. Immutable once created.
    pub id: ImageId,
    /// Human-readable filename as supplied at upload time. Opaque, never
    /// used as a key.
    pub original_name: String,
}
