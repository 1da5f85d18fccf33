//! Webhook delivery layer.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Delivery with retries ([`DeliveryEngine`]) and its result ([`DeliveryOutcome`])
//! - Per-call timeout, cancellation and headers ([`RequestOptions`])
//! - Retry policy configuration ([`RetryPolicy`], [`RetryOverrides`])
//! - Typed webhook verbs ([`Webhook`])

mod client;
mod engine;
mod error;
mod hook;
mod http;
mod options;
mod outcome;
mod retry;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod hook_tests;
#[cfg(test)]
mod http_tests;

pub use client::ReqwestClient;
pub use engine::DeliveryEngine;
pub use error::{DeliveryError, HttpError, RejectedError};
pub use hook::Webhook;
pub use self::http::{
    DeliveryMethod, HttpClient, HttpRequest, HttpResponse, RATELIMIT_RESET_AFTER, RETRY_AFTER,
};
pub use options::RequestOptions;
pub use outcome::DeliveryOutcome;
pub use retry::{FixedJitter, Jitter, RandomJitter, RetryOverrides, RetryPolicy};
