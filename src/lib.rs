//! Webhook courier: reliable delivery of JSON notification payloads.
//!
//! A client library for posting messages to a single HTTP webhook
//! endpoint, retrying transient failures with exponential backoff and
//! honoring provider rate-limit hints.
//!
//! - [`webhook`]: the delivery engine, HTTP abstraction and retry policy
//! - [`payload`]: serde types for messages and embeds
//! - [`config`]: TOML configuration loading
//! - [`time`]: sleep abstraction used between retries

pub mod config;
pub mod payload;
pub mod time;
pub mod webhook;
