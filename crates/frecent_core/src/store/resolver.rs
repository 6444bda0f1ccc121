//! Owner/repository resolution contracts and SQLite implementation.
//!
//! # Responsibility
//! - Guarantee owner and repository rows exist before entry writes.
//! - Own the repository-level remote-query bookkeeping timestamps.
//!
//! # Invariants
//! - Resolution is get-or-create: a duplicate-id insert from a concurrent
//!   caller is a benign "already existed" outcome, not an error.
//! - Owner insert precedes repository insert inside one transaction, so
//!   the repository foreign key always has a parent to reference.

use crate::model::entry::RepositoryRecord;
use crate::model::identity::{RepoIdentity, RepositoryHandle};
use crate::model::time::UnixSeconds;
use crate::store::retry::run_with_busy_retry;
use crate::store::{SqliteStore, StoreError, StoreResult};
use rusqlite::{params, TransactionBehavior};

/// Resolver interface for owner/repository materialization.
pub trait RepositoryResolver {
    /// Ensures the owner and repository rows for `identity` exist, creating
    /// them exactly once even under concurrent callers, and returns a
    /// handle carrying the validated identifiers.
    fn resolve_repository(&mut self, identity: &RepoIdentity) -> StoreResult<RepositoryHandle>;

    /// Reads one repository row back, including both last-queried
    /// timestamps.
    fn repository(&self, repository_id: &str) -> StoreResult<Option<RepositoryRecord>>;

    /// Records when issues were last fetched from the remote.
    fn mark_issues_queried(&mut self, repository_id: &str, at: UnixSeconds) -> StoreResult<()>;

    /// Records when pull requests were last fetched from the remote.
    fn mark_pull_requests_queried(
        &mut self,
        repository_id: &str,
        at: UnixSeconds,
    ) -> StoreResult<()>;
}

impl RepositoryResolver for SqliteStore<'_> {
    fn resolve_repository(&mut self, identity: &RepoIdentity) -> StoreResult<RepositoryHandle> {
        identity.validate()?;

        let conn = &mut *self.conn;
        run_with_busy_retry("resolve_repository", || {
            // ON CONFLICT(id) absorbs exactly the lost-race duplicate; any
            // other constraint (owner name uniqueness, foreign keys) still
            // surfaces.
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            tx.execute(
                "INSERT INTO owners (id, name)
                 VALUES (?1, ?2)
                 ON CONFLICT (id) DO NOTHING;",
                params![identity.owner_id, identity.owner_name],
            )?;
            tx.execute(
                "INSERT INTO repositories (id, name, owner_id)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (id) DO NOTHING;",
                params![identity.repo_id, identity.repo_name, identity.owner_id],
            )?;
            tx.commit()
        })?;

        Ok(RepositoryHandle::new(
            identity.repo_id.clone(),
            identity.owner_id.clone(),
        ))
    }

    fn repository(&self, repository_id: &str) -> StoreResult<Option<RepositoryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                name,
                owner_id,
                last_queried_issues,
                last_queried_prs
             FROM repositories
             WHERE id = ?1;",
        )?;

        let mut rows = stmt.query([repository_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(RepositoryRecord {
                id: row.get("id")?,
                name: row.get("name")?,
                owner_id: row.get("owner_id")?,
                last_queried_issues: row.get("last_queried_issues")?,
                last_queried_prs: row.get("last_queried_prs")?,
            }));
        }

        Ok(None)
    }

    fn mark_issues_queried(&mut self, repository_id: &str, at: UnixSeconds) -> StoreResult<()> {
        touch_last_queried(
            self,
            "UPDATE repositories SET last_queried_issues = ?1 WHERE id = ?2;",
            repository_id,
            at,
        )
    }

    fn mark_pull_requests_queried(
        &mut self,
        repository_id: &str,
        at: UnixSeconds,
    ) -> StoreResult<()> {
        touch_last_queried(
            self,
            "UPDATE repositories SET last_queried_prs = ?1 WHERE id = ?2;",
            repository_id,
            at,
        )
    }
}

fn touch_last_queried(
    store: &mut SqliteStore<'_>,
    sql: &'static str,
    repository_id: &str,
    at: UnixSeconds,
) -> StoreResult<()> {
    let conn = &*store.conn;
    let changed = run_with_busy_retry("mark_repository_queried", || {
        conn.execute(sql, params![at, repository_id])
    })?;

    if changed == 0 {
        return Err(StoreError::RepositoryNotFound(repository_id.to_string()));
    }

    Ok(())
}
