//! Domain model for owners, repositories and access entries.
//!
//! # Responsibility
//! - Define the canonical records persisted by the frecency store.
//! - Validate caller-supplied repository identities before any I/O.
//!
//! # Invariants
//! - External identifiers are opaque strings owned by the remote system.
//! - Entry statistics (`access_count`, `last_accessed`) never decrease.

pub mod entry;
pub mod identity;
pub mod time;
