//! Ranked retrieval of access entries.
//!
//! # Responsibility
//! - Produce the ordered entry sequences the ranking UI consumes.
//!
//! # Invariants
//! - Ordering is `last_accessed` descending, ties broken by ascending
//!   `number`; `access_count` is persisted and indexed for a future
//!   combined score but does not affect ordering.
//! - Results are fully materialized; iterating them after the query
//!   returns holds no storage locks.

use crate::model::entry::Entry;
use crate::store::{bool_to_int, SqliteStore, StoreError, StoreResult};
use rusqlite::{params, Row};

/// Query interface for ranked entry retrieval.
pub trait FrecencyQuery {
    /// Lists all entries of one kind for a repository, most recently
    /// accessed first.
    fn list_entries(&self, repository_id: &str, is_pull_request: bool) -> StoreResult<Vec<Entry>>;

    /// Lists the repository's issues, most recently accessed first.
    fn list_issues(&self, repository_id: &str) -> StoreResult<Vec<Entry>> {
        self.list_entries(repository_id, false)
    }

    /// Lists the repository's pull requests, most recently accessed first.
    fn list_pull_requests(&self, repository_id: &str) -> StoreResult<Vec<Entry>> {
        self.list_entries(repository_id, true)
    }
}

impl FrecencyQuery for SqliteStore<'_> {
    fn list_entries(&self, repository_id: &str, is_pull_request: bool) -> StoreResult<Vec<Entry>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                external_id,
                title,
                number,
                access_count,
                last_accessed,
                repository_id,
                is_pull_request
             FROM entries
             WHERE repository_id = ?1
               AND is_pull_request = ?2
             ORDER BY last_accessed DESC, number ASC;",
        )?;

        let mut rows = stmt.query(params![repository_id, bool_to_int(is_pull_request)])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }
}

fn parse_entry_row(row: &Row<'_>) -> StoreResult<Entry> {
    let access_count: i64 = row.get("access_count")?;
    if access_count < 1 {
        return Err(StoreError::InvalidData(format!(
            "invalid access_count value `{access_count}` in entries.access_count"
        )));
    }

    let is_pull_request = match row.get::<_, i64>("is_pull_request")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid is_pull_request value `{other}` in entries.is_pull_request"
            )));
        }
    };

    Ok(Entry {
        external_id: row.get("external_id")?,
        title: row.get("title")?,
        number: row.get("number")?,
        access_count,
        last_accessed: row.get("last_accessed")?,
        repository_id: row.get("repository_id")?,
        is_pull_request,
    })
}
