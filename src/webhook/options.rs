//! Per-call request options.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Options scoped to one [`DeliveryEngine::send`](super::DeliveryEngine::send)
/// call, including all of its internal retries.
///
/// # Example
///
/// ```
/// use webhook_courier::webhook::RequestOptions;
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
///
/// let token = CancellationToken::new();
/// let options = RequestOptions::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_cancellation(token.clone())
///     .with_header("X-Audit-Log-Reason", "deploy finished");
///
/// assert_eq!(options.timeout(), Some(Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    cancellation: Option<CancellationToken>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options: no timeout, no cancellation, no extra headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aborts in-flight attempts once `token` is cancelled.
    ///
    /// A token cancelled before an attempt starts fails that attempt as a
    /// transport error, which still counts against the retry budget.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Adds a header layered over the engine's defaults.
    ///
    /// Names and values are validated when the request is built. Later
    /// headers with the same name replace earlier ones.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Aborts each attempt that has not completed within `timeout`.
    ///
    /// The window restarts for every retry.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the cancellation token, if any.
    #[must_use]
    pub const fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Returns the extra headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the per-attempt timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
