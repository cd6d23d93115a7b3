//! Configuration layer for a background analytics client.
//!
//! Callers describe what they care about in a [`RawConfig`], then
//! [`config::build`] rejects unusable values and fills every gap with a
//! default, producing the [`Config`] the client runs on.

pub mod bootstrap;
pub mod collab;
pub mod core;

pub use crate::core::{config, error};
pub use config::{Config, RawConfig};
pub use error::{AppError, ConfigError, ConfigValue};
