//! Secondary index administration for the persons table.
//!
//! # Responsibility
//! - Build the gender and full-name indexes on explicit request.
//! - Report redundant invocations as a no-op instead of an error.
//!
//! # Invariants
//! - Index creation is never triggered by insert or query paths.

use super::engine::QueryResult;
use log::info;
use rusqlite::Connection;
use std::time::Instant;

/// Secondary index on `persons.gender`.
pub const GENDER_INDEX_NAME: &str = "idx_persons_gender";
/// Secondary index on `persons.full_name`, prefix-capable under BINARY
/// collation.
pub const FULL_NAME_INDEX_NAME: &str = "idx_persons_full_name";

/// Outcome of an explicit [`create_indexes`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// At least one index was missing and has been built.
    Created,
    /// Both indexes already existed; the call changed nothing.
    AlreadyPresent,
}

/// Builds both secondary indexes; invoking again is a no-op, not an error.
pub fn create_indexes(conn: &Connection) -> QueryResult<IndexOutcome> {
    let started_at = Instant::now();

    if index_exists(conn, GENDER_INDEX_NAME)? && index_exists(conn, FULL_NAME_INDEX_NAME)? {
        info!(
            "event=create_indexes module=query status=noop duration_ms={}",
            started_at.elapsed().as_millis()
        );
        return Ok(IndexOutcome::AlreadyPresent);
    }

    // IF NOT EXISTS covers a partially built pair without duplicating the
    // surviving index.
    conn.execute_batch(&format!(
        "CREATE INDEX IF NOT EXISTS {GENDER_INDEX_NAME} ON persons (gender);
         CREATE INDEX IF NOT EXISTS {FULL_NAME_INDEX_NAME} ON persons (full_name);"
    ))?;

    info!(
        "event=create_indexes module=query status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(IndexOutcome::Created)
}

fn index_exists(conn: &Connection, index_name: &str) -> QueryResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'index' AND name = ?1
        );",
        [index_name],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}
