//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in milliseconds (UTC)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_datetime(timestamp_millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Format a Unix timestamp (milliseconds) as a 24-hour `HH:MM:SS` wall-clock string.
///
/// This is what chat events carry; it is for display only and never used for ordering.
pub fn timestamp_to_clock_time(timestamp_millis: i64) -> String {
    to_datetime(timestamp_millis).format("%H:%M:%S").to_string()
}
