//! Core infrastructure — shared foundation used across the whole crate.
//!
//! - **config** — validation, defaulting, and loading of client config.
//! - **error** — crate-wide error types.

pub mod config;
pub mod error;
