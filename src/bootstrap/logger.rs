//! Tracing setup for the `analytics-config` binary.
//!
//! The library never installs a subscriber; [`crate::collab::StderrLogger`]
//! carries its own dispatcher.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global subscriber for `verbosity` repeated `-v` flags.
pub fn init(verbosity: u8) -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// With no `-v`, `RUST_LOG` decides and unparseable directives are dropped.
/// Any `-v` replaces `RUST_LOG` entirely.
pub fn filter_for(verbosity: u8) -> EnvFilter {
    match level_for_verbosity(verbosity) {
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy(),
        Some(level) => EnvFilter::default().add_directive(level.into()),
    }
}

pub fn level_for_verbosity(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::WARN),
        2 => Some(LevelFilter::INFO),
        3 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    }
}

/// Count the `v`s in a short flag like `-vvv`. Saturates at `u8::MAX`.
pub fn verbose_flag_count(arg: &str) -> Option<u8> {
    let vs = arg.strip_prefix('-')?;
    if vs.is_empty() || !vs.bytes().all(|b| b == b'v') {
        return None;
    }
    Some(u8::try_from(vs.len()).unwrap_or(u8::MAX))
}
