//! Imagevault-DB: Relational metadata store client.
//!
//! The metadata store holds the auxiliary half of a stored image (its original
//! filename), keyed by the same identifier as the blob. This crate provides
//! SQLite-backed storage using rusqlite with r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Embedded schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching the schema
//! - `queries` - Row-level query operations
//! - `store` - The [`MetadataStore`] capability trait and its SQLite impl
//! - `memory` - In-memory fake with fault injection, for tests
//!
//! # Example
//!
//! ```
//! use imagevault_db::pool::{init_memory_pool, get_conn};
//! use imagevault_db::queries::images;
//! use imagevault_common::ImageId;
//!
//! let pool = init_memory_pool().unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let id = ImageId::new();
//! images::insert_record(&conn, id, "cat.png").unwrap();
//! ```

pub mod memory;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
pub mod store;

pub use memory::MemoryMetadataStore;
pub use store::{MetadataStore, SqliteMetadataStore};
