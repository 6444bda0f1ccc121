//! Wall-clock helpers for access timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UnixSeconds = i64;

/// Returns the current wall-clock time in whole seconds since the epoch.
///
/// A clock set before the epoch collapses to `0` rather than failing; the
/// store only requires timestamps to be non-decreasing, not accurate.
pub fn now_unix_seconds() -> UnixSeconds {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as UnixSeconds,
        Err(_) => 0,
    }
}
