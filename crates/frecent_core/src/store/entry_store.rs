//! Access-entry persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own creation and mutation of issue/PR access records.
//! - Keep the find-or-insert branch atomic under concurrent callers.
//!
//! # Invariants
//! - `(repository_id, number)` never gains a second row; concurrent
//!   accesses serialize into sequential touches.
//! - `access_count` and `last_accessed` never decrease on the access path.
//! - The overwrite path (`update_stats`) never inserts.

use crate::model::entry::AccessEvent;
use crate::model::identity::RepositoryHandle;
use crate::model::time::UnixSeconds;
use crate::store::retry::run_with_busy_retry;
use crate::store::{bool_to_int, SqliteStore, StoreError, StoreResult};
use rusqlite::{params, OptionalExtension, TransactionBehavior};

/// Repository interface for entry writes.
pub trait EntryStore {
    /// Records one access: inserts the entry with `access_count = 1` on
    /// first sight, otherwise increments the count and advances
    /// `last_accessed` to `at`.
    fn record_access(
        &mut self,
        handle: &RepositoryHandle,
        event: &AccessEvent,
        at: UnixSeconds,
    ) -> StoreResult<()>;

    /// Overwrites both statistics of an existing entry with values the
    /// caller computed elsewhere. Returns `NotFound` when no entry matches;
    /// it never inserts.
    fn update_stats(
        &mut self,
        handle: &RepositoryHandle,
        number: i64,
        access_count: i64,
        last_accessed: UnixSeconds,
    ) -> StoreResult<()>;
}

impl EntryStore for SqliteStore<'_> {
    fn record_access(
        &mut self,
        handle: &RepositoryHandle,
        event: &AccessEvent,
        at: UnixSeconds,
    ) -> StoreResult<()> {
        let conn = &mut *self.conn;
        run_with_busy_retry("record_access", || {
            // The immediate transaction takes the write lock up front, so
            // the find-and-branch below cannot race another writer.
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let existing: Option<i64> = tx
                .query_row(
                    "SELECT access_count
                     FROM entries
                     WHERE repository_id = ?1 AND number = ?2;",
                    params![handle.repository_id(), event.number],
                    |row| row.get(0),
                )
                .optional()?;

            match existing {
                None => {
                    tx.execute(
                        "INSERT INTO entries (
                            external_id,
                            title,
                            number,
                            access_count,
                            last_accessed,
                            repository_id,
                            is_pull_request
                        ) VALUES (?1, ?2, ?3, 1, ?4, ?5, ?6);",
                        params![
                            event.external_id,
                            event.title,
                            event.number,
                            at,
                            handle.repository_id(),
                            bool_to_int(event.is_pull_request),
                        ],
                    )?;
                }
                Some(_) => {
                    // MAX keeps last_accessed monotonic even if the caller's
                    // clock stepped backwards between two invocations.
                    tx.execute(
                        "UPDATE entries
                         SET
                            access_count = access_count + 1,
                            last_accessed = MAX(last_accessed, ?1),
                            title = COALESCE(?2, title)
                         WHERE repository_id = ?3 AND number = ?4;",
                        params![at, event.title, handle.repository_id(), event.number],
                    )?;
                }
            }

            tx.commit()
        })?;

        Ok(())
    }

    fn update_stats(
        &mut self,
        handle: &RepositoryHandle,
        number: i64,
        access_count: i64,
        last_accessed: UnixSeconds,
    ) -> StoreResult<()> {
        let conn = &*self.conn;
        let changed = run_with_busy_retry("update_stats", || {
            conn.execute(
                "UPDATE entries
                 SET access_count = ?1, last_accessed = ?2
                 WHERE repository_id = ?3 AND number = ?4;",
                params![access_count, last_accessed, handle.repository_id(), number],
            )
        })?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                repository_id: handle.repository_id().to_string(),
                number,
            });
        }

        Ok(())
    }
}
