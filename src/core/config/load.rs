//! Reads a [`RawConfig`] from a TOML file plus `ANALYTICS_ENDPOINT` and
//! `ANALYTICS_VERBOSE`. Nothing here validates: pass the result to
//! [`super::build`].

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::collab::Backoff;
use crate::collab::backoff::{DEFAULT_BASE, DEFAULT_CAP, DEFAULT_FACTOR};
use crate::error::AppError;

use super::raw::{FileConfig, FileRetry, RawConfig};

pub const ENDPOINT_ENV: &str = "ANALYTICS_ENDPOINT";
pub const VERBOSE_ENV: &str = "ANALYTICS_VERBOSE";

const DEFAULT_PATH: &str = "config/default.toml";

/// Load `config_path`, or `config/default.toml` when it exists, then apply
/// env overrides. With neither file, every field stays unset.
pub fn load(config_path: Option<&str>) -> Result<RawConfig, AppError> {
    let endpoint_override = env::var(ENDPOINT_ENV).ok();
    let verbose_override = env::var(VERBOSE_ENV).ok();

    let path = match config_path {
        Some(path) => Some(Path::new(path)),
        None => Some(Path::new(DEFAULT_PATH)).filter(|p| p.exists()),
    };

    match path {
        Some(path) => load_from(path, endpoint_override.as_deref(), verbose_override.as_deref()),
        None => {
            debug!("no config file, starting from an empty config");
            let mut raw = RawConfig::new();
            apply_overrides(&mut raw, endpoint_override.as_deref(), verbose_override.as_deref());
            Ok(raw)
        }
    }
}

/// Loader core. Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    endpoint_override: Option<&str>,
    verbose_override: Option<&str>,
) -> Result<RawConfig, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    let parsed: FileConfig = toml::from_str(&text)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let mut raw = from_file(parsed);
    apply_overrides(&mut raw, endpoint_override, verbose_override);
    Ok(raw)
}

fn from_file(file: FileConfig) -> RawConfig {
    let c = file.client;
    RawConfig {
        endpoint: c.endpoint,
        flush_interval: c.flush_interval_ms.map(chrono::TimeDelta::milliseconds),
        batch_size: c.batch_size,
        verbose: c.verbose,
        retry_after: file.retry.map(|r| backoff_from_file(&r).into_retry_fn()),
        ..RawConfig::default()
    }
}

fn apply_overrides(raw: &mut RawConfig, endpoint: Option<&str>, verbose: Option<&str>) {
    if let Some(endpoint) = endpoint {
        raw.endpoint = Some(endpoint.to_string());
    }
    if let Some(verbose) = verbose {
        raw.verbose = parse_flag(verbose);
    }
}

/// Missing keys take the default schedule's values.
fn backoff_from_file(r: &FileRetry) -> Backoff {
    Backoff::new(
        r.base_ms.map(Duration::from_millis).unwrap_or(DEFAULT_BASE),
        r.factor.unwrap_or(DEFAULT_FACTOR),
        r.jitter.unwrap_or(0.0),
        r.cap_ms.map(Duration::from_millis).unwrap_or(DEFAULT_CAP),
    )
}

/// `1`, `true`, `yes` and `on` (any case) are true; anything else is false.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
