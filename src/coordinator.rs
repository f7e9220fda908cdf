//! Image storage coordinator.
//!
//! Owns the upload/retrieve/delete protocol across the blob store and the
//! metadata store. The two stores fail independently; the coordinator orders
//! its writes to bound the orphan class, attempts one best-effort
//! compensation, and surfaces any remaining inconsistency instead of masking
//! it. There is no distributed transaction and no automatic retry.

use std::sync::Arc;

use imagevault_blob::BlobStore;
use imagevault_common::{Error, ImageId};
use imagevault_db::MetadataStore;

use crate::normalize::Normalizer;

/// Operation-level errors callers of [`ImageService`] see.
///
/// Store-client errors are never surfaced raw; they are wrapped here with the
/// underlying cause preserved as the error source.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The upload did not complete; no retrievable image was created.
    #[error("Upload failed: {0}")]
    UploadFailed(#[source] Error),

    /// No image exists under this identifier.
    #[error("Image not found: {0}")]
    ImageNotFound(ImageId),

    /// The blob exists but its metadata row is gone - the stores are
    /// inconsistent for this identifier.
    #[error("Metadata missing for stored image: {0}")]
    MetadataMissing(ImageId),

    /// A store failed hard while reading; distinct from true absence.
    #[error("Retrieve failed: {0}")]
    RetrieveFailed(#[source] Error),

    /// A store failed hard while deleting. Delete is idempotent, so the
    /// caller may safely retry.
    #[error("Delete failed: {0}")]
    DeleteFailed(#[source] Error),
}

/// A stored image reconstructed from both stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedImage {
    /// Normalized image payload.
    pub data: Vec<u8>,
    /// Content-type tag as recorded by the blob store (authoritative).
    pub content_type: String,
    /// Filename supplied at upload time.
    pub original_name: String,
}

/// Coordinates the blob store and the metadata store under one identifier.
///
/// Both store clients are injected, so tests substitute in-memory fakes.
pub struct ImageService {
    blobs: Arc<dyn BlobStore>,
    metadata: Arc<dyn MetadataStore>,
    normalizer: Normalizer,
}

impl ImageService {
    /// Create a new `ImageService` over the given store clients.
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        metadata: Arc<dyn MetadataStore>,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            blobs,
            metadata,
            normalizer,
        }
    }

    /// Normalize an image and store both halves under a fresh identifier.
    ///
    /// The id is generated once, before either store is written, and keys
    /// both the blob and the metadata row. The blob is written first: if the
    /// metadata insert then fails, the only possible orphan is a blob without
    /// a row, which wastes storage but can never serve phantom data. One
    /// best-effort compensating blob delete bounds even that.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        original_name: &str,
        content_type: &str,
    ) -> Result<ImageId, ServiceError> {
        let id = ImageId::new();
        tracing::debug!(%id, original_name, content_type, "uploading image");

        // CPU-bound; keep it off the I/O worker threads.
        let normalizer = self.normalizer;
        let normalized = tokio::task::spawn_blocking(move || normalizer.normalize(&data))
            .await
            .map_err(|e| {
                // Worker panic or cancellation, not a bad image.
                ServiceError::UploadFailed(Error::storage(format!(
                    "normalization task failed: {}",
                    e
                )))
            })?
            .map_err(ServiceError::UploadFailed)?;

        self.blobs
            .put(id, &normalized, content_type)
            .await
            .map_err(ServiceError::UploadFailed)?;

        if let Err(e) = self.metadata.create(id, original_name).await {
            // The blob is now an orphan. Compensate once; if that also fails
            // the orphan stays, and the upload error below is what the caller
            // sees either way.
            if let Err(del_err) = self.blobs.delete(id).await {
                tracing::warn!(%id, error = %del_err, "compensating blob delete failed, orphan blob left behind");
            } else {
                tracing::debug!(%id, "compensated failed upload by deleting blob");
            }
            return Err(ServiceError::UploadFailed(e));
        }

        tracing::info!(%id, original_name, "image stored");
        Ok(id)
    }

    /// Reconstruct an image and its metadata from an identifier.
    ///
    /// The blob is fetched first: it is the larger, more failure-prone read,
    /// and a missing blob makes the metadata round-trip pointless. A blob
    /// without a metadata row is surfaced as [`ServiceError::MetadataMissing`]
    /// rather than fabricating a name.
    pub async fn retrieve(&self, id: ImageId) -> Result<RetrievedImage, ServiceError> {
        let blob = self
            .blobs
            .get(id)
            .await
            .map_err(ServiceError::RetrieveFailed)?
            .ok_or(ServiceError::ImageNotFound(id))?;

        let record = self
            .metadata
            .find_by_id(id)
            .await
            .map_err(ServiceError::RetrieveFailed)?
            .ok_or(ServiceError::MetadataMissing(id))?;

        tracing::debug!(%id, original_name = %record.original_name, "image retrieved");
        Ok(RetrievedImage {
            data: blob.data,
            content_type: blob.content_type,
            original_name: record.original_name,
        })
    }

    /// Remove both halves of a stored image.
    ///
    /// A missing blob or row is not an error: a prior partial delete may have
    /// removed one half already, and retrying must converge on Nonexistent.
    /// Only a hard store error stops the operation.
    pub async fn delete(&self, id: ImageId) -> Result<(), ServiceError> {
        let blob_existed = self
            .blobs
            .delete(id)
            .await
            .map_err(ServiceError::DeleteFailed)?;

        let record_existed = self
            .metadata
            .delete_by_id(id)
            .await
            .map_err(ServiceError::DeleteFailed)?;

        if blob_existed != record_existed {
            tracing::warn!(
                %id,
                blob_existed,
                record_existed,
                "stores were inconsistent before delete"
            );
        }
        tracing::info!(%id, "image deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let id = ImageId::new();
        let err = ServiceError::ImageNotFound(id);
        assert_eq!(err.to_string(), format!("Image not found: {}", id));

        let err = ServiceError::MetadataMissing(id);
        assert_eq!(
            err.to_string(),
            format!("Metadata missing for stored image: {}", id)
        );
    }

    #[test]
    fn test_service_error_preserves_cause() {
        use std::error::Error as _;

        let err = ServiceError::UploadFailed(imagevault_common::Error::storage("bucket down"));
        let source = err.source().expect("source should be preserved");
        assert_eq!(source.to_string(), "Storage error: bucket down");
    }
}
