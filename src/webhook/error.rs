//! Error types for HTTP transport and webhook delivery.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Describes what went wrong without dictating recovery strategy.
/// Every variant except [`HttpError::InvalidUrl`] means "no response was
/// obtained" and is reported by the engine as status 0.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The request was aborted through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,

    /// The provided URL is invalid.
    ///
    /// The transport rejected the request before sending anything.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Fatal error from [`DeliveryEngine::send`](super::DeliveryEngine::send).
///
/// HTTP and network failures are never reported through this type; they
/// come back as a failed [`DeliveryOutcome`](super::DeliveryOutcome).
/// These variants indicate malformed input and are never retried.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The payload could not be serialized to JSON.
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A per-call header name is not a valid HTTP header name.
    #[error("Invalid header name '{name}': {reason}")]
    InvalidHeaderName {
        /// The invalid header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A per-call header value is not a valid HTTP header value.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The transport refused to build the request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// A delivery that completed without a successful response.
///
/// Produced by [`DeliveryOutcome::error_for_status`](super::DeliveryOutcome::error_for_status)
/// for callers who prefer `?` propagation over inspecting the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Webhook delivery failed (status {status}): {message}")]
pub struct RejectedError {
    /// HTTP status code, or 0 when no response was received.
    pub status: u16,
    /// Human-readable failure description.
    pub message: String,
    /// Provider-requested wait before trying again, if any.
    pub retry_after: Option<std::time::Duration>,
}
