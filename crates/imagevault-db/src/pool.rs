//! Database connection pool management.
//!
//! SQLite connection pooling via r2d2. Pool initialization runs pending
//! migrations, so a freshly opened pool is always at the current schema.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use imagevault_common::{Error, Result};

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

fn build_pool(manager: SqliteConnectionManager) -> Result<DbPool> {
    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {}", e)))?;

    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("Failed to get connection for migrations: {}", e)))?;
    migrations::run_migrations(&conn)
        .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;

    Ok(pool)
}

/// Initialize a database pool backed by the given SQLite file.
///
/// The file is created if it does not exist, and pending migrations are
/// applied before the pool is returned.
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    build_pool(SqliteConnectionManager::file(db_path))
}

/// Initialize an in-memory database pool for testing.
///
/// The database is lost when the pool is dropped.
pub fn init_memory_pool() -> Result<DbPool> {
    build_pool(SqliteConnectionManager::memory())
}

/// Get a connection from the pool, converting the r2d2 error into the common
/// error type.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_memory_pool_runs_migrations() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='images'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_pool_reuses_database() {
        let pool = init_memory_pool().unwrap();

        {
            let conn = get_conn(&pool).unwrap();
            conn.execute(
                "INSERT INTO images (id, original_name) VALUES (?, ?)",
                rusqlite::params!["test-id", "cat.png"],
            )
            .unwrap();
        }

        let conn = get_conn(&pool).unwrap();
        let name: String = conn
            .query_row(
                "SELECT original_name FROM images WHERE id = ?",
                ["test-id"],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(name, "cat.png");
    }

    #[test]
    fn test_multiple_connections() {
        let pool = init_memory_pool().unwrap();
        let _c1 = get_conn(&pool).unwrap();
        let _c2 = get_conn(&pool).unwrap();
        assert!(get_conn(&pool).is_ok());
    }
}
