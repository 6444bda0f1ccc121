//! Frecency use-case service.
//!
//! # Responsibility
//! - Resolve parent rows before every entry write, so callers never
//!   pre-populate owners or repositories themselves.
//! - Stamp access events with the current wall clock.
//!
//! # Invariants
//! - Service APIs never bypass resolver validation or store transaction
//!   contracts.
//! - The service stays storage-agnostic; any store implementing the three
//!   contracts (including test doubles) plugs in.

use crate::model::entry::{AccessEvent, Entry, RepositoryRecord};
use crate::model::identity::{RepoIdentity, RepositoryHandle};
use crate::model::time::{now_unix_seconds, UnixSeconds};
use crate::store::entry_store::EntryStore;
use crate::store::query::FrecencyQuery;
use crate::store::resolver::RepositoryResolver;
use crate::store::{StoreError, StoreResult};

/// Use-case service wrapper for the frecency store.
pub struct FrecencyService<S> {
    store: S,
}

impl<S> FrecencyService<S>
where
    S: RepositoryResolver + EntryStore + FrecencyQuery,
{
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Guarantees the owner/repository rows for `identity` exist and
    /// returns the validated handle.
    pub fn resolve(&mut self, identity: &RepoIdentity) -> StoreResult<RepositoryHandle> {
        self.store.resolve_repository(identity)
    }

    /// Records one access at the current wall-clock second, materializing
    /// parent rows on first reference.
    pub fn record_access(
        &mut self,
        identity: &RepoIdentity,
        event: &AccessEvent,
    ) -> StoreResult<()> {
        let handle = self.store.resolve_repository(identity)?;
        self.store.record_access(&handle, event, now_unix_seconds())
    }

    /// Overwrites an entry's statistics with values reconciled elsewhere.
    /// When the entry does not exist yet, falls back to recording a fresh
    /// access at `last_accessed` instead of failing.
    pub fn reconcile_stats(
        &mut self,
        identity: &RepoIdentity,
        event: &AccessEvent,
        access_count: i64,
        last_accessed: UnixSeconds,
    ) -> StoreResult<()> {
        let handle = self.store.resolve_repository(identity)?;
        match self
            .store
            .update_stats(&handle, event.number, access_count, last_accessed)
        {
            Err(StoreError::NotFound { .. }) => {
                self.store.record_access(&handle, event, last_accessed)
            }
            outcome => outcome,
        }
    }

    /// Records that issues were just fetched from the remote.
    pub fn mark_issues_queried(&mut self, identity: &RepoIdentity) -> StoreResult<()> {
        let handle = self.store.resolve_repository(identity)?;
        self.store
            .mark_issues_queried(handle.repository_id(), now_unix_seconds())
    }

    /// Records that pull requests were just fetched from the remote.
    pub fn mark_pull_requests_queried(&mut self, identity: &RepoIdentity) -> StoreResult<()> {
        let handle = self.store.resolve_repository(identity)?;
        self.store
            .mark_pull_requests_queried(handle.repository_id(), now_unix_seconds())
    }

    /// Reads one repository row back, including query bookkeeping.
    pub fn repository(&self, repository_id: &str) -> StoreResult<Option<RepositoryRecord>> {
        self.store.repository(repository_id)
    }

    /// Lists a repository's issues, most recently accessed first.
    pub fn list_issues(&self, repository_id: &str) -> StoreResult<Vec<Entry>> {
        self.store.list_issues(repository_id)
    }

    /// Lists a repository's pull requests, most recently accessed first.
    pub fn list_pull_requests(&self, repository_id: &str) -> StoreResult<Vec<Entry>> {
        self.store.list_pull_requests(repository_id)
    }
}
