//! Retry policy configuration and backoff computation.

use std::time::Duration;

use rand::Rng;

/// Fraction of the exponential delay spread symmetrically as jitter.
const JITTER_SPREAD: f64 = 0.2;

/// Largest exponent for which `2^n` is a finite `f64`.
const MAX_EXPONENT: i32 = 1023;

/// Configuration for exponential backoff retry behavior.
///
/// Controls how many times a failed delivery is retried and how long to
/// wait between attempts. The delay before retry `n` (1-based) is
/// `base_delay * 2^n`, capped at `max_delay`, with ±10% jitter.
///
/// # Defaults
///
/// - `max_retries`: 3
/// - `base_delay`: 1 second
/// - `max_delay`: 60 seconds
///
/// # Example
///
/// ```
/// use webhook_courier::webhook::{RetryOverrides, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new().merged(&RetryOverrides {
///     max_retries: Some(5),
///     ..RetryOverrides::default()
/// });
///
/// assert_eq!(policy.max_retries, 5);
/// assert_eq!(policy.base_delay, Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of automatic re-attempts after the initial attempt.
    ///
    /// Zero disables retries.
    pub max_retries: u32,

    /// Base of the exponential backoff.
    pub base_delay: Duration,

    /// Upper bound for the exponential part of the delay.
    ///
    /// Not checked against `base_delay`; when smaller, every retry waits
    /// roughly `max_delay`.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Default maximum retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default base delay (1 second).
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

    /// Default maximum delay (60 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(60_000);

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_delay: Self::DEFAULT_BASE_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
        }
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff base delay.
    ///
    /// Zero delay is supported (useful in tests) but creates a tight retry loop.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the backoff cap.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Returns a copy with every field set in `overrides` replaced.
    #[must_use]
    pub fn merged(&self, overrides: &RetryOverrides) -> Self {
        Self {
            max_retries: overrides.max_retries.unwrap_or(self.max_retries),
            base_delay: overrides.base_delay.unwrap_or(self.base_delay),
            max_delay: overrides.max_delay.unwrap_or(self.max_delay),
        }
    }

    /// Returns true if another attempt is allowed after `retries` retries.
    #[must_use]
    pub const fn allows_retry(&self, retries: u32) -> bool {
        retries < self.max_retries
    }

    /// Computes the exponential delay for a retry, before jitter.
    ///
    /// `retry` is the 1-based number of the upcoming retry.
    #[must_use]
    pub fn exponential_delay(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry).map_or(MAX_EXPONENT, |e| e.min(MAX_EXPONENT));
        let secs = self.base_delay.as_secs_f64() * 2f64.powi(exponent);
        let capped = secs.min(self.max_delay.as_secs_f64());
        Duration::try_from_secs_f64(capped).unwrap_or(self.max_delay)
    }

    /// Computes the jittered delay for a retry.
    ///
    /// `sample` is a uniform draw from `[-0.5, 0.5]`; values outside that
    /// range are clamped. The result never goes negative.
    #[must_use]
    pub fn backoff(&self, retry: u32, sample: f64) -> Duration {
        let exponential = self.exponential_delay(retry).as_secs_f64();
        let jitter = exponential * JITTER_SPREAD * sample.clamp(-0.5, 0.5);
        Duration::try_from_secs_f64((exponential + jitter).max(0.0)).unwrap_or(Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial retry configuration merged over a base [`RetryPolicy`].
///
/// Unset fields keep the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryOverrides {
    /// Replacement for [`RetryPolicy::max_retries`].
    pub max_retries: Option<u32>,
    /// Replacement for [`RetryPolicy::base_delay`].
    pub base_delay: Option<Duration>,
    /// Replacement for [`RetryPolicy::max_delay`].
    pub max_delay: Option<Duration>,
}

/// Source of random jitter samples.
pub trait Jitter: Send + Sync {
    /// Returns a sample uniformly distributed over `[-0.5, 0.5]`.
    fn sample(&self) -> f64;
}

/// Jitter drawn from the thread-local random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl Jitter for RandomJitter {
    fn sample(&self) -> f64 {
        rand::rng().random_range(-0.5..=0.5)
    }
}

/// Jitter that always returns the same sample.
///
/// `FixedJitter(0.0)` disables jitter entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn sample(&self) -> f64 {
        self.0
    }
}
