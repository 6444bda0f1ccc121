//! Core persistence logic for the frecent issue/PR ranking store.
//! This crate is the single source of truth for store invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use db::{open_store, open_store_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{AccessEvent, Entry, RepositoryRecord};
pub use model::identity::{IdentityValidationError, RepoIdentity, RepositoryHandle};
pub use model::time::{now_unix_seconds, UnixSeconds};
pub use service::frecency_service::FrecencyService;
pub use store::entry_store::EntryStore;
pub use store::query::FrecencyQuery;
pub use store::resolver::RepositoryResolver;
pub use store::{SqliteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
