//! In-memory blob store with fault injection.
//!
//! Used by tests that need a blob store without touching the filesystem, and
//! by consistency tests that need individual operations to fail on demand.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use imagevault_common::{Error, ImageId, Result};
use parking_lot::Mutex;

use crate::{Blob, BlobStore};

/// In-memory blob store backend.
///
/// Each operation can be switched to fail with a hard storage error, which is
/// how tests simulate an unreachable object store.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<ImageId, Blob>>,
    fail_puts: AtomicBool,
    fail_gets: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryBlobStore {
    /// Create an empty in-memory blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `put` calls fail with a hard storage error.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `get` calls fail with a hard storage error.
    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `delete` calls fail with a hard storage error.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: ImageId, data: &[u8], content_type: &str) -> Result<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(Error::storage("injected put failure"));
        }
        self.objects.lock().insert(
            key,
            Blob {
                data: data.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: ImageId) -> Result<Option<Blob>> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(Error::storage("injected get failure"));
        }
        Ok(self.objects.lock().get(&key).cloned())
    }

    async fn delete(&self, key: ImageId) -> Result<bool> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(Error::storage("injected delete failure"));
        }
        Ok(self.objects.lock().remove(&key).is_some())
    }
}
