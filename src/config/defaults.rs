//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default maximum number of retries after the first attempt.
pub const RETRY_MAX_RETRIES: u32 = 3;

/// Default backoff base delay in milliseconds.
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

/// Default backoff cap in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 60_000;

/// Default backoff base delay as Duration.
#[must_use]
pub const fn retry_base_delay() -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS)
}

/// Default backoff cap as Duration.
#[must_use]
pub const fn retry_max_delay() -> Duration {
    Duration::from_millis(RETRY_MAX_DELAY_MS)
}
