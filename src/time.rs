//! Sleep abstraction for testability.
//!
//! The delivery engine waits between retry attempts through a [`Sleeper`],
//! so tests can substitute [`InstantSleeper`] (or a recording sleeper) and
//! run retry sequences without real delays.

use std::future::Future;
use std::time::Duration;

/// Abstraction over asynchronous sleeping.
///
/// # Example
///
/// ```
/// use webhook_courier::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// InstantSleeper.sleep(Duration::from_secs(3600)).await;
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Suspends the calling task for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
///
/// Yields the task to the runtime; never blocks a worker thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately, ignoring the requested duration.
///
/// Intended for tests that exercise retry paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_waits_for_duration() {
        let start = tokio::time::Instant::now();

        TokioSleeper.sleep(Duration::from_secs(30)).await;

        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn instant_sleeper_does_not_advance_time() {
        let start = tokio::time::Instant::now();

        InstantSleeper.sleep(Duration::from_secs(30)).await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn sleepers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokioSleeper>();
        assert_send_sync::<InstantSleeper>();
    }

    #[test]
    fn sleepers_are_copy() {
        let sleeper1 = TokioSleeper;
        let sleeper2 = sleeper1;
        let _ = (sleeper1, sleeper2);
    }
}
