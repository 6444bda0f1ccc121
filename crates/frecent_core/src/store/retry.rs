//! Bounded retry policy for busy/locked storage conditions.
//!
//! # Invariants
//! - Retries are bounded; contention never blocks indefinitely.
//! - Only busy/locked failures are retried; every other error surfaces
//!   unchanged on the first attempt.

use log::warn;
use rusqlite::ErrorCode;
use std::thread;
use std::time::Duration;

const BUSY_RETRY_LIMIT: u32 = 4;
const BUSY_RETRY_BASE_DELAY_MS: u64 = 20;

/// Runs `attempt` until it succeeds, fails with a non-busy error, or the
/// retry budget is exhausted. Each retry backs off exponentially.
pub(crate) fn run_with_busy_retry<T>(
    operation: &'static str,
    mut attempt: impl FnMut() -> Result<T, rusqlite::Error>,
) -> Result<T, rusqlite::Error> {
    let mut retries = 0;
    loop {
        match attempt() {
            Err(err) if retries < BUSY_RETRY_LIMIT && is_busy(&err) => {
                retries += 1;
                warn!(
                    "event=store_busy module=store op={operation} status=retry attempt={retries} limit={BUSY_RETRY_LIMIT}"
                );
                thread::sleep(backoff_delay(retries));
            }
            outcome => return outcome,
        }
    }
}

fn backoff_delay(retries: u32) -> Duration {
    Duration::from_millis(BUSY_RETRY_BASE_DELAY_MS << (retries - 1).min(4))
}

fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::DatabaseBusy
                || failure.code == ErrorCode::DatabaseLocked
    )
}

#[cfg(test)]
mod tests {
    use super::{backoff_delay, is_busy, run_with_busy_retry};
    use rusqlite::ffi;
    use std::time::Duration;

    fn busy_error() -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(ffi::SQLITE_BUSY), None)
    }

    #[test]
    fn backoff_grows_and_stays_bounded() {
        assert_eq!(backoff_delay(1), Duration::from_millis(20));
        assert_eq!(backoff_delay(2), Duration::from_millis(40));
        assert!(backoff_delay(10) <= Duration::from_millis(20 << 4));
    }

    #[test]
    fn busy_detection_matches_busy_and_locked_only() {
        assert!(is_busy(&busy_error()));
        assert!(!is_busy(&rusqlite::Error::ExecuteReturnedResults));
    }

    #[test]
    fn retries_stop_after_budget_is_spent() {
        let mut attempts = 0;
        let outcome: Result<(), _> = run_with_busy_retry("test_op", || {
            attempts += 1;
            Err(busy_error())
        });
        assert!(outcome.is_err());
        assert_eq!(attempts, 5);
    }

    #[test]
    fn success_is_returned_without_retrying() {
        let mut attempts = 0;
        let outcome = run_with_busy_retry("test_op", || {
            attempts += 1;
            Ok(7)
        });
        assert_eq!(outcome.unwrap(), 7);
        assert_eq!(attempts, 1);
    }
}
