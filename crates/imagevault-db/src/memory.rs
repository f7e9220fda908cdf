//! In-memory metadata store with fault injection.
//!
//! Lets consistency tests make the metadata-create step fail without a real
//! database, which is how the upload compensation path is exercised.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use imagevault_common::{Error, ImageId, Result};
use parking_lot::Mutex;

use crate::models::ImageRecord;
use crate::store::MetadataStore;

/// In-memory metadata store backend.
#[derive(Default)]
pub struct MemoryMetadataStore {
    records: Mutex<HashMap<ImageId, ImageRecord>>,
    fail_creates: AtomicBool,
    fail_finds: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryMetadataStore {
    /// Create an empty in-memory metadata store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `create` calls fail with a hard database error.
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `find_by_id` calls fail with a hard database error.
    pub fn fail_finds(&self, fail: bool) {
        self.fail_finds.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `delete_by_id` calls fail with a hard database error.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Remove a record directly, bypassing the trait.
    ///
    /// Used by tests to create out-of-band inconsistency between the stores.
    pub fn remove_out_of_band(&self, id: ImageId) -> bool {
        self.records.lock().remove(&id).is_some()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn create(&self, id: ImageId, original_name: &str) -> Result<()> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(Error::database("injected create failure"));
        }
        let mut records = self.records.lock();
        if records.contains_key(&id) {
            return Err(Error::duplicate(format!(
                "image record already exists: {}",
                id
            )));
        }
        records.insert(
            id,
            ImageRecord {
                id,
                original_name: original_name.to_string(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: ImageId) -> Result<Option<ImageRecord>> {
        if self.fail_finds.load(Ordering::SeqCst) {
            return Err(Error::database("injected find failure"));
        }
        Ok(self.records.lock().get(&id).cloned())
    }

    async fn delete_by_id(&self, id: ImageId) -> Result<bool> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(Error::database("injected delete failure"));
        }
        Ok(self.records.lock().remove(&id).is_some())
    }
}
