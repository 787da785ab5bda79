//! Elapsed-time measurement around arbitrary operations.
//!
//! # Responsibility
//! - Run a wrapped operation exactly once and report wall-clock duration.
//!
//! # Invariants
//! - The wrapped result is returned unmodified; errors pass through as-is.
//! - Resolution follows `Instant`, well below one millisecond.

use std::time::{Duration, Instant};

/// Runs `operation` once and returns its result with the elapsed time.
///
/// Fallible operations fit unchanged by returning their `Result` as `T`.
pub fn timed<T>(operation: impl FnOnce() -> T) -> (T, Duration) {
    let started_at = Instant::now();
    let result = operation();
    (result, started_at.elapsed())
}
