//! Repository identity supplied by callers and the validated handle
//! returned by the resolver.
//!
//! # Responsibility
//! - Carry the owner/repository reference for one resolution request.
//! - Reject blank identifiers before any storage I/O.
//!
//! # Invariants
//! - A `RepositoryHandle` is only constructed after its repository row is
//!   guaranteed to exist; downstream writes may rely on the foreign key.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied reference to a remote repository and its owner.
///
/// Identifiers are the remote system's stable external ids; names are
/// display strings. Nothing here implies the rows exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoIdentity {
    /// Stable external id of the owning account.
    pub owner_id: String,
    /// Display name of the owning account.
    pub owner_name: String,
    /// Stable external id of the repository.
    pub repo_id: String,
    /// Display name of the repository.
    pub repo_name: String,
}

/// Validation failure for a [`RepoIdentity`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityValidationError {
    BlankOwnerId,
    BlankOwnerName,
    BlankRepositoryId,
    BlankRepositoryName,
}

impl Display for IdentityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankOwnerId => write!(f, "owner id must not be blank"),
            Self::BlankOwnerName => write!(f, "owner name must not be blank"),
            Self::BlankRepositoryId => write!(f, "repository id must not be blank"),
            Self::BlankRepositoryName => write!(f, "repository name must not be blank"),
        }
    }
}

impl Error for IdentityValidationError {}

impl RepoIdentity {
    /// Creates an identity from raw caller input. No validation happens
    /// here; the resolver validates before touching storage.
    pub fn new(
        owner_id: impl Into<String>,
        owner_name: impl Into<String>,
        repo_id: impl Into<String>,
        repo_name: impl Into<String>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            owner_name: owner_name.into(),
            repo_id: repo_id.into(),
            repo_name: repo_name.into(),
        }
    }

    /// Rejects identities with blank identifier or name fields.
    pub fn validate(&self) -> Result<(), IdentityValidationError> {
        if self.owner_id.trim().is_empty() {
            return Err(IdentityValidationError::BlankOwnerId);
        }
        if self.owner_name.trim().is_empty() {
            return Err(IdentityValidationError::BlankOwnerName);
        }
        if self.repo_id.trim().is_empty() {
            return Err(IdentityValidationError::BlankRepositoryId);
        }
        if self.repo_name.trim().is_empty() {
            return Err(IdentityValidationError::BlankRepositoryName);
        }
        Ok(())
    }
}

/// Proof that a repository row (and its owner) exists in the store.
///
/// Handles are only issued by the resolver, so entry writes never race
/// against a missing parent row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    repository_id: String,
    owner_id: String,
}

impl RepositoryHandle {
    pub(crate) fn new(repository_id: String, owner_id: String) -> Self {
        Self {
            repository_id,
            owner_id,
        }
    }

    /// Stable external id of the resolved repository.
    pub fn repository_id(&self) -> &str {
        &self.repository_id
    }

    /// Stable external id of the repository's owner.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }
}
