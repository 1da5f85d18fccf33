//! Uniform delivery result and response classification.

use std::time::Duration;

use http::StatusCode;

use super::{HttpError, HttpResponse, RejectedError};

/// Result of one top-level delivery, after any internal retries.
///
/// `ok` is derived from the status code, so [`is_ok`](Self::is_ok) is true
/// exactly when a 2xx response was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    status: Option<StatusCode>,
    retry_after: Option<Duration>,
    body: Option<String>,
    error_message: Option<String>,
}

impl DeliveryOutcome {
    /// Classifies an HTTP response.
    ///
    /// The body is decoded lossily, so invalid UTF-8 sequences become
    /// U+FFFD. Failed responses get an error message taken from the body
    /// text, then the canonical reason phrase, then `HTTP {status}`.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let text = response.body_text();
        let body = (!text.is_empty()).then(|| text.into_owned());

        let error_message = if response.is_success() {
            None
        } else {
            Some(failure_message(response.status, body.as_deref()))
        };

        Self {
            status: Some(response.status),
            retry_after: response.retry_after(),
            body,
            error_message,
        }
    }

    /// Describes an exchange that produced no response (status 0).
    #[must_use]
    pub fn transport_failure(error: &HttpError) -> Self {
        Self {
            status: None,
            retry_after: None,
            body: None,
            error_message: Some(error.to_string()),
        }
    }

    /// Returns true if the delivery received a 2xx response.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.is_some_and(|status| status.is_success())
    }

    /// Returns the response status, or `None` if no response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the numeric status code, 0 meaning no response was received.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.map_or(0, |status| status.as_u16())
    }

    /// Returns the provider's retry hint, if one was sent.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Returns the response body text, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the failure description; `None` for successful outcomes.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns true if the status was 429 Too Many Requests.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status == Some(StatusCode::TOO_MANY_REQUESTS)
    }

    /// Returns true if this outcome qualifies for another attempt.
    ///
    /// Transport failures, rate limiting, and server errors are transient.
    /// Everything else (success, redirects, other client errors) is final.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.status.is_none_or(|status| {
            status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
        })
    }

    /// Converts a failed outcome into a [`RejectedError`].
    ///
    /// # Errors
    ///
    /// Returns [`RejectedError`] if the outcome is not successful.
    pub fn error_for_status(self) -> Result<Self, RejectedError> {
        if self.is_ok() {
            return Ok(self);
        }

        let status = self.status_code();
        Err(RejectedError {
            status,
            message: self
                .error_message
                .unwrap_or_else(|| format!("HTTP {status}")),
            retry_after: self.retry_after,
        })
    }
}

fn failure_message(status: StatusCode, body: Option<&str>) -> String {
    body.map(ToString::to_string)
        .or_else(|| status.canonical_reason().map(ToString::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
