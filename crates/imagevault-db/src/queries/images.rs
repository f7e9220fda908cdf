//! Image record queries.
//!
//! Row-level operations on the `images` table: insert, point lookup, and
//! delete, all keyed by the image identifier.

use imagevault_common::{Error, ImageId, Result};
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::ImageRecord;

fn parse_record_row(row: &rusqlite::Row) -> rusqlite::Result<ImageRecord> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(ImageRecord {
        id: ImageId::from(id),
        original_name: row.get(1)?,
    })
}

/// True when the error is SQLite reporting a violated uniqueness constraint.
fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Insert a new image record.
///
/// # Returns
///
/// * `Ok(())` - The record was inserted
/// * `Err(Error::Duplicate)` - A record with this id already exists
/// * `Err(Error::Database)` - Any other database failure
pub fn insert_record(conn: &Connection, id: ImageId, original_name: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO images (id, original_name) VALUES (:id, :original_name)",
        rusqlite::named_params! {
            ":id": id.to_string(),
            ":original_name": original_name,
        },
    )
    .map_err(|e| {
        if is_constraint_violation(&e) {
            Error::duplicate(format!("image record already exists: {}", id))
        } else {
            Error::database(e.to_string())
        }
    })?;

    Ok(())
}

/// Get an image record by id.
///
/// # Returns
///
/// * `Ok(Some(ImageRecord))` - The record if found
/// * `Ok(None)` - If no record exists for the id
/// * `Err(Error)` - If a database error occurs
pub fn get_record(conn: &Connection, id: ImageId) -> Result<Option<ImageRecord>> {
    let result = conn.query_row(
        "SELECT id, original_name FROM images WHERE id = :id",
        rusqlite::named_params! { ":id": id.to_string() },
        parse_record_row,
    );

    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Delete an image record by id.
///
/// # Returns
///
/// * `Ok(true)` - If the record was deleted
/// * `Ok(false)` - If the record did not exist
/// * `Err(Error)` - If a database error occurs
pub fn delete_record(conn: &Connection, id: ImageId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM images WHERE id = :id",
            rusqlite::named_params! { ":id": id.to_string() },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}
