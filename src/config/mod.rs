//! Configuration layer.
//!
//! This module provides:
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values come from the TOML file when present, otherwise from the
//! built-in defaults. Retry settings are partial overrides: each key left
//! out of `[retry]` keeps its default independently of the others.
//!
//! # Validation
//!
//! The engine accepts any [`RetryPolicy`](crate::webhook::RetryPolicy),
//! but a config file is rejected when `max_delay_ms` is below
//! `base_delay_ms`, or when a delay or timeout is zero.

pub mod defaults;
mod error;
mod toml;
mod validated;


pub use error::{ConfigError, field};
pub use self::toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
