//! Crate-wide error types.
//!
//! [`ConfigError`] is the only error resolution itself can produce. The other
//! variants of [`AppError`] come from the loader and the CLI around it.

use std::fmt;

use thiserror::Error;

/// The offending value carried by a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigValue {
    /// A signed flush interval.
    Interval(chrono::Duration),
    /// A signed batch size.
    BatchSize(i64),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Interval(d) => match d.num_nanoseconds() {
                Some(ns) if ns % 1_000_000 != 0 => write!(f, "{ns}ns"),
                _ => write!(f, "{}ms", d.num_milliseconds()),
            },
            ConfigValue::BatchSize(n) => write!(f, "{n}"),
        }
    }
}

/// A field that was set to a value the client cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} (config.{field}: {value})")]
pub struct ConfigError {
    pub reason: &'static str,
    pub field: &'static str,
    pub value: ConfigValue,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
