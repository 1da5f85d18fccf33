//! HTTP request/response types and client trait.

use std::borrow::Cow;
use std::time::Duration;

use super::HttpError;

/// Header carrying the standard retry hint, in seconds.
pub const RETRY_AFTER: &str = "retry-after";

/// Provider-specific fallback for the retry hint, in seconds.
pub const RATELIMIT_RESET_AFTER: &str = "x-ratelimit-reset-after";

/// HTTP methods the delivery engine issues.
///
/// GET fetches the current resource state with an empty body; POST and
/// PATCH carry the JSON-serialized payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryMethod {
    /// Fetch the webhook resource.
    Get,
    /// Send a new message.
    Post,
    /// Partially update the webhook resource.
    Patch,
}

impl DeliveryMethod {
    /// Returns true if requests with this method carry a body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl From<DeliveryMethod> for http::Method {
    fn from(method: DeliveryMethod) -> Self {
        match method {
            DeliveryMethod::Get => Self::GET,
            DeliveryMethod::Post => Self::POST,
            DeliveryMethod::Patch => Self::PATCH,
        }
    }
}

/// An HTTP request to be sent.
///
/// This is a value type that can be constructed and passed to any
/// [`HttpClient`] implementation. It uses standard `http` crate types
/// for method and headers, ensuring compatibility with the broader ecosystem.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a new HTTP request with the given method and URL.
    ///
    /// Headers are initialized to an empty map and body is `None`.
    #[must_use]
    pub fn new(method: impl Into<http::Method>, url: url::Url) -> Self {
        Self {
            method: method.into(),
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any existing values for the same name.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// An HTTP response received from a server.
///
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as text, replacing invalid UTF-8 with U+FFFD.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns the provider's retry hint.
    ///
    /// Reads `retry-after`, falling back to `x-ratelimit-reset-after` when
    /// the former is absent. The value is seconds (fractions allowed) and is
    /// discarded unless it is a finite positive number.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        let raw = self
            .headers
            .get(RETRY_AFTER)
            .or_else(|| self.headers.get(RATELIMIT_RESET_AFTER))?;

        parse_retry_seconds(raw.to_str().ok()?)
    }
}

fn parse_retry_seconds(value: &str) -> Option<Duration> {
    let seconds = value.trim().parse::<f64>().ok()?;
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(seconds).ok()
}

/// Trait for making HTTP requests.
///
/// # Design
///
/// This trait abstracts the HTTP client implementation, enabling:
/// - Dependency injection for testing with mock clients
/// - Swapping HTTP libraries without changing calling code
///
/// # Example
///
/// ```ignore
/// use webhook_courier::webhook::{HttpClient, HttpRequest, HttpResponse, HttpError};
///
/// struct MockClient {
///     response: HttpResponse,
/// }
///
/// impl HttpClient for MockClient {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.response.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// Non-2xx statuses are responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - Request times out ([`HttpError::Timeout`])
    /// - URL is invalid ([`HttpError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
