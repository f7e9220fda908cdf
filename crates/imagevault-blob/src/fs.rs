//! Filesystem-backed blob store.
//!
//! Objects live under `{root}/{shard}/{key}` where the shard is the first two
//! hex characters of the key, keeping directories small. The content-type tag
//! is kept in a `{key}.type` sidecar next to the payload.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use imagevault_common::{Error, ImageId, Result};

use crate::{Blob, BlobStore};

/// Suffix of the sidecar file holding an object's content-type.
const TYPE_SUFFIX: &str = "type";

/// Filesystem blob store rooted at a single directory.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Create a new `FsBlobStore` rooted at the given directory.
    ///
    /// The directory is created on first write, not here.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Path of the payload file for a key.
    fn data_path(&self, key: ImageId) -> PathBuf {
        let name = key.to_string();
        self.root.join(&name[..2]).join(name)
    }

    /// Path of the content-type sidecar for a key.
    fn type_path(&self, key: ImageId) -> PathBuf {
        self.data_path(key).with_extension(TYPE_SUFFIX)
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data)
        .map_err(|e| Error::storage(format!("Failed to write {}: {}", path.display(), e)))
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: ImageId, data: &[u8], content_type: &str) -> Result<()> {
        let data_path = self.data_path(key);
        let shard_dir = data_path
            .parent()
            .ok_or_else(|| Error::storage("Blob path has no parent directory"))?;
        std::fs::create_dir_all(shard_dir).map_err(|e| {
            Error::storage(format!(
                "Failed to create blob directory {}: {}",
                shard_dir.display(),
                e
            ))
        })?;

        // Payload first, tag second; get treats a tagless payload as corrupt,
        // so a failed tag write takes the payload back out with it.
        write_file(&data_path, data)?;
        if let Err(e) = write_file(&self.type_path(key), content_type.as_bytes()) {
            let _ = std::fs::remove_file(&data_path);
            return Err(e);
        }
        Ok(())
    }

    async fn get(&self, key: ImageId) -> Result<Option<Blob>> {
        let data_path = self.data_path(key);
        if !data_path.exists() {
            return Ok(None);
        }

        let data = std::fs::read(&data_path).map_err(|e| {
            Error::storage(format!("Failed to read {}: {}", data_path.display(), e))
        })?;

        let type_path = self.type_path(key);
        let content_type = std::fs::read_to_string(&type_path).map_err(|e| {
            // Payload present without its tag is a hard error, not absence.
            Error::storage(format!(
                "Missing content-type sidecar {}: {}",
                type_path.display(),
                e
            ))
        })?;

        Ok(Some(Blob { data, content_type }))
    }

    async fn delete(&self, key: ImageId) -> Result<bool> {
        let data_path = self.data_path(key);
        if !data_path.exists() {
            return Ok(false);
        }

        // Sidecar first, payload second.
        let type_path = self.type_path(key);
        if type_path.exists() {
            std::fs::remove_file(&type_path).map_err(|e| {
                Error::storage(format!("Failed to delete {}: {}", type_path.display(), e))
            })?;
        }
        std::fs::remove_file(&data_path).map_err(|e| {
            Error::storage(format!("Failed to delete {}: {}", data_path.display(), e))
        })?;
        Ok(true)
    }
}
