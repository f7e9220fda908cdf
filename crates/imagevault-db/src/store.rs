//! The metadata store capability trait and its SQLite implementation.
//!
//! The coordinator consumes the metadata store through this narrow interface
//! so tests can substitute an in-memory fake (see [`crate::memory`]).

use async_trait::async_trait;
use imagevault_common::{ImageId, Result};

use crate::models::ImageRecord;
use crate::pool::{get_conn, DbPool};
use crate::queries::images;

/// Capability set the coordinator requires from a metadata store.
///
/// Absence is signaled in-band (`Ok(None)` / `Ok(false)`); any `Err` is a
/// hard store error.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert a new record. Fails with [`imagevault_common::Error::Duplicate`]
    /// if the id already exists.
    async fn create(&self, id: ImageId, original_name: &str) -> Result<()>;

    /// Find a record by id, or `None` if no record exists.
    async fn find_by_id(&self, id: ImageId) -> Result<Option<ImageRecord>>;

    /// Delete a record by id. Returns `false` when no record existed.
    async fn delete_by_id(&self, id: ImageId) -> Result<bool>;
}

/// SQLite-backed metadata store over a pooled connection.
pub struct SqliteMetadataStore {
    pool: DbPool,
}

impl SqliteMetadataStore {
    /// Create a new `SqliteMetadataStore` over an initialized pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetadataStore for SqliteMetadataStore {
    async fn create(&self, id: ImageId, original_name: &str) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        images::insert_record(&conn, id, original_name)
    }

    async fn find_by_id(&self, id: ImageId) -> Result<Option<ImageRecord>> {
        let conn = get_conn(&self.pool)?;
        images::get_record(&conn, id)
    }

    async fn delete_by_id(&self, id: ImageId) -> Result<bool> {
        let conn = get_conn(&self.pool)?;
        images::delete_record(&conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;
    use imagevault_common::Error;

    fn store() -> SqliteMetadataStore {
        SqliteMetadataStore::new(init_memory_pool().unwrap())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = store();
        let id = ImageId::new();

        store.create(id, "cat.png").await.unwrap();

        let record = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.original_name, "cat.png");
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let store = store();
        assert!(store.find_by_id(ImageId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let store = store();
        let id = ImageId::new();

        store.create(id, "one.png").await.unwrap();
        let err = store.create(id, "two.png").await.unwrap_err();
        assert!(matches!(err, Error::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store();
        let id = ImageId::new();

        store.create(id, "cat.png").await.unwrap();
        assert!(store.delete_by_id(id).await.unwrap());
        assert!(!store.delete_by_id(id).await.unwrap());
        assert!(store.find_by_id(id).await.unwrap().is_none());
    }
}
