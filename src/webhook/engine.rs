//! Delivery engine: HTTP exchange, response classification, and retries.

use std::time::Duration;

use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::time::{Sleeper, TokioSleeper};

use super::{
    DeliveryError, DeliveryMethod, DeliveryOutcome, HttpClient, HttpError, HttpRequest,
    HttpResponse, Jitter, RandomJitter, RequestOptions, RetryOverrides, RetryPolicy,
};

/// Delivers payloads to one webhook URL with bounded retries.
///
/// Each [`send`](Self::send) runs an explicit attempt loop:
///
/// - a 2xx response ends the loop with a successful outcome;
/// - a 429, 5xx, or transport failure schedules a retry while the policy
///   allows one, waiting for the rate-limit hint (429 only) or for the
///   jittered exponential backoff;
/// - anything else, or an exhausted budget, ends the loop with a failed
///   outcome describing the last attempt.
///
/// Retry state lives inside each call, so one engine can serve concurrent
/// sends.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
/// - `J`: The jitter source (defaults to [`RandomJitter`])
///
/// # Example
///
/// ```
/// use webhook_courier::webhook::{DeliveryEngine, ReqwestClient, RetryOverrides};
/// use std::time::Duration;
/// use url::Url;
///
/// let engine = DeliveryEngine::new(
///     ReqwestClient::new(),
///     Url::parse("https://hooks.example.com/api/webhooks/1/token").unwrap(),
/// )
/// .with_retry_overrides(&RetryOverrides {
///     max_retries: Some(5),
///     ..RetryOverrides::default()
/// });
///
/// assert_eq!(engine.retry_policy().max_retries, 5);
/// assert_eq!(engine.retry_policy().max_delay, Duration::from_secs(60));
/// ```
#[derive(Debug)]
pub struct DeliveryEngine<H, S = TokioSleeper, J = RandomJitter> {
    client: H,
    sleeper: S,
    jitter: J,
    url: url::Url,
    headers: http::HeaderMap,
    retry_policy: RetryPolicy,
}

impl<H> DeliveryEngine<H, TokioSleeper, RandomJitter> {
    /// Creates an engine with the default retry policy, no default headers,
    /// [`TokioSleeper`] for delays, and [`RandomJitter`].
    #[must_use]
    pub fn new(client: H, url: url::Url) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            jitter: RandomJitter,
            url,
            headers: http::HeaderMap::new(),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S, J> DeliveryEngine<H, S, J> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> DeliveryEngine<H, S2, J> {
        DeliveryEngine {
            client: self.client,
            sleeper,
            jitter: self.jitter,
            url: self.url,
            headers: self.headers,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets a custom jitter source.
    #[must_use]
    pub fn with_jitter<J2>(self, jitter: J2) -> DeliveryEngine<H, S, J2> {
        DeliveryEngine {
            client: self.client,
            sleeper: self.sleeper,
            jitter,
            url: self.url,
            headers: self.headers,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets headers sent with every request.
    ///
    /// They override the default `Content-Type` and are overridden by
    /// per-call headers. A name with several values is sent with all of them.
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Merges a partial retry configuration over the current policy.
    #[must_use]
    pub fn with_retry_overrides(mut self, overrides: &RetryOverrides) -> Self {
        self.retry_policy = self.retry_policy.merged(overrides);
        self
    }

    /// Returns the target URL.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// Returns the effective retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl<H: HttpClient, S: Sleeper, J: Jitter> DeliveryEngine<H, S, J> {
    /// Delivers `payload` with `method`, retrying transient failures.
    ///
    /// For GET the payload is ignored and no body is sent. For POST and
    /// PATCH it is serialized to JSON.
    ///
    /// HTTP and network failures are reported as a failed
    /// [`DeliveryOutcome`], never as an error.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] without contacting the server if the
    /// payload cannot be serialized or a per-call header is malformed, and
    /// after the first attempt if the transport rejects the request as
    /// invalid. None of these are retried.
    pub async fn send<P>(
        &self,
        method: DeliveryMethod,
        payload: &P,
        options: &RequestOptions,
    ) -> Result<DeliveryOutcome, DeliveryError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let request = self.build_request(method, payload, options)?;
        let mut retries: u32 = 0;

        loop {
            let outcome = match self.attempt(&request, options).await {
                Ok(response) => DeliveryOutcome::from_response(&response),
                Err(HttpError::InvalidUrl(reason)) => {
                    return Err(DeliveryError::InvalidRequest(reason));
                }
                Err(e) => DeliveryOutcome::transport_failure(&e),
            };

            if outcome.is_ok() {
                tracing::debug!(
                    status = outcome.status_code(),
                    attempt = retries + 1,
                    "Webhook delivered"
                );
                return Ok(outcome);
            }

            if !outcome.is_retryable() || !self.retry_policy.allows_retry(retries) {
                tracing::warn!(
                    status = outcome.status_code(),
                    attempts = retries + 1,
                    error = outcome.error_message().unwrap_or_default(),
                    "Webhook delivery failed"
                );
                return Ok(outcome);
            }

            retries += 1;
            let delay = self.retry_delay(&outcome, retries);
            tracing::warn!(
                status = outcome.status_code(),
                retry = retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Webhook delivery attempt failed, retrying"
            );
            self.sleeper.sleep(delay).await;
        }
    }

    /// Builds the request shared by every attempt of one send.
    fn build_request<P>(
        &self,
        method: DeliveryMethod,
        payload: &P,
        options: &RequestOptions,
    ) -> Result<HttpRequest, DeliveryError>
    where
        P: Serialize + ?Sized,
    {
        let mut request = HttpRequest::new(method, self.url.clone());

        if method.has_body() {
            request = request
                .with_body(serde_json::to_vec(payload)?)
                .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        // Defaults replace earlier values per name but keep all of their own.
        for name in self.headers.keys() {
            request.headers.remove(name);
            for value in self.headers.get_all(name) {
                request.headers.append(name.clone(), value.clone());
            }
        }

        for (name, value) in options.headers() {
            let value = parse_header_value(name, value)?;
            request = request.with_header(parse_header_name(name)?, value);
        }

        Ok(request)
    }

    /// Runs one exchange under the call's timeout and cancellation token.
    ///
    /// The timer and the in-flight request are owned by the returned
    /// future, so both are dropped on every exit path.
    async fn attempt(
        &self,
        request: &HttpRequest,
        options: &RequestOptions,
    ) -> Result<HttpResponse, HttpError> {
        let exchange = with_timeout(self.client.request(request.clone()), options.timeout());

        match options.cancellation() {
            Some(token) => with_cancellation(exchange, token).await,
            None => exchange.await,
        }
    }

    /// Chooses the wait before retry number `retry`.
    ///
    /// Only a 429 honors the server's hint; other statuses always back off.
    fn retry_delay(&self, outcome: &DeliveryOutcome, retry: u32) -> Duration {
        match outcome.retry_after() {
            Some(hint) if outcome.is_rate_limited() => hint,
            _ => self.retry_policy.backoff(retry, self.jitter.sample()),
        }
    }
}

async fn with_timeout<F>(exchange: F, timeout: Option<Duration>) -> Result<HttpResponse, HttpError>
where
    F: Future<Output = Result<HttpResponse, HttpError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, exchange)
            .await
            .unwrap_or(Err(HttpError::Timeout)),
        None => exchange.await,
    }
}

async fn with_cancellation<F>(
    exchange: F,
    token: &CancellationToken,
) -> Result<HttpResponse, HttpError>
where
    F: Future<Output = Result<HttpResponse, HttpError>>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(HttpError::Cancelled),
        result = exchange => result,
    }
}

fn parse_header_name(name: &str) -> Result<HeaderName, DeliveryError> {
    name.parse::<HeaderName>()
        .map_err(|e| DeliveryError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, DeliveryError> {
    HeaderValue::from_str(value).map_err(|e| DeliveryError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
