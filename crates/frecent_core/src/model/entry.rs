//! Access entry and repository read models.
//!
//! # Responsibility
//! - Define the persisted shape of one issue/PR access record.
//! - Define the event shape callers submit for each access.
//!
//! # Invariants
//! - Issues and pull requests share one record type; `is_pull_request`
//!   discriminates because a pull request is a superset of an issue in the
//!   remote system.
//! - `(repository_id, number)` identifies an entry; numbers are shared
//!   between issues and pull requests on the remote side.

use crate::model::time::UnixSeconds;
use serde::{Deserialize, Serialize};

/// One issue or pull-request access record as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable external id of the issue/PR.
    pub external_id: String,
    /// Display title captured at access time. Absent when the caller did
    /// not have metadata at hand.
    pub title: Option<String>,
    /// Issue/PR number within its repository.
    pub number: i64,
    /// How many times this entry has been accessed. Starts at 1.
    pub access_count: i64,
    /// When this entry was last accessed, in whole seconds.
    pub last_accessed: UnixSeconds,
    /// Stable external id of the owning repository.
    pub repository_id: String,
    /// Discriminates pull requests from plain issues.
    pub is_pull_request: bool,
}

/// One access to an issue or pull request, as reported by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEvent {
    /// Issue/PR number within the repository.
    pub number: i64,
    /// Stable external id of the issue/PR.
    pub external_id: String,
    /// Display title, when the caller has it. A touch without a title
    /// keeps whatever title is already stored.
    pub title: Option<String>,
    /// Whether the accessed item is a pull request.
    pub is_pull_request: bool,
}

impl AccessEvent {
    /// Builds an event for an issue access.
    pub fn issue(number: i64, external_id: impl Into<String>, title: Option<String>) -> Self {
        Self {
            number,
            external_id: external_id.into(),
            title,
            is_pull_request: false,
        }
    }

    /// Builds an event for a pull-request access.
    pub fn pull_request(
        number: i64,
        external_id: impl Into<String>,
        title: Option<String>,
    ) -> Self {
        Self {
            number,
            external_id: external_id.into(),
            title,
            is_pull_request: true,
        }
    }
}

/// Read model for one repository row, including remote-query bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Stable external id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Stable external id of the owning account.
    pub owner_id: String,
    /// When issues were last fetched from the remote, if ever.
    pub last_queried_issues: Option<UnixSeconds>,
    /// When pull requests were last fetched from the remote, if ever.
    pub last_queried_prs: Option<UnixSeconds>,
}

#[cfg(test)]
mod tests {
    use super::AccessEvent;

    #[test]
    fn event_constructors_set_discriminator() {
        let issue = AccessEvent::issue(10, "I_1", None);
        assert!(!issue.is_pull_request);
        assert_eq!(issue.number, 10);

        let pr = AccessEvent::pull_request(20, "PR_1", Some("title".to_string()));
        assert!(pr.is_pull_request);
        assert_eq!(pr.title.as_deref(), Some("title"));
    }
}
