//! Store layer: entity resolution, entry persistence and ranked queries.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts over the entries
//!   schema.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every mutating operation runs in exactly one transaction; a failure
//!   mid-operation rolls the whole operation back.
//! - Busy/locked storage conditions are retried a bounded number of times
//!   before surfacing as storage faults.
//! - Externally supplied identifiers are only ever bound as parameters,
//!   never interpolated into SQL text.

use crate::db::{migrations, DbError};
use crate::model::identity::IdentityValidationError;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod entry_store;
pub mod query;
pub mod resolver;
mod retry;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for resolution, persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    /// Caller-supplied identity failed validation; no I/O happened.
    Validation(IdentityValidationError),
    /// No entry exists for `(repository_id, number)`. Recoverable; callers
    /// typically fall back to recording a fresh access.
    NotFound { repository_id: String, number: i64 },
    /// No repository row exists for the given id.
    RepositoryNotFound(String),
    /// A uniqueness or foreign-key rule would be broken. The resolver
    /// absorbs the benign "parent already exists" case before this is
    /// ever surfaced.
    Constraint(String),
    /// Underlying storage fault. Fatal to the current operation.
    Db(DbError),
    /// Persisted state violates a store invariant.
    InvalidData(String),
    /// The connection has not been migrated to the supported schema.
    UninitializedStore {
        expected_version: u32,
        actual_version: u32,
    },
    /// The schema is missing a table the store depends on.
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound {
                repository_id,
                number,
            } => write!(f, "no entry for repository {repository_id} number {number}"),
            Self::RepositoryNotFound(id) => write!(f, "repository not found: {id}"),
            Self::Constraint(message) => write!(f, "constraint violated: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
            Self::UninitializedStore {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store schema version {actual_version} does not match supported {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IdentityValidationError> for StoreError {
    fn from(value: IdentityValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(
                    message
                        .clone()
                        .unwrap_or_else(|| failure.to_string()),
                )
            }
            _ => Self::Db(DbError::Sqlite(value)),
        }
    }
}

/// SQLite-backed store handle implementing the resolver, entry store and
/// frecency query contracts.
///
/// Owned by the caller and threaded through explicitly; no global
/// connection state exists anywhere in this crate.
pub struct SqliteStore<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteStore<'conn> {
    /// Constructs a store over a migrated, ready connection.
    ///
    /// Rejects connections whose schema version or table set does not
    /// match what this binary supports, instead of failing later on the
    /// first query.
    pub fn try_new(conn: &'conn mut Connection) -> StoreResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = migrations::latest_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedStore {
                expected_version,
                actual_version,
            });
        }

        for table in ["owners", "repositories", "entries"] {
            if !table_exists(conn, table)? {
                return Err(StoreError::MissingRequiredTable(table));
            }
        }

        Ok(Self { conn })
    }
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
