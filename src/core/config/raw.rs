//! Unresolved configuration.
//!
//! [`RawConfig`] is what callers build: any field may be left unset. The
//! `File*` structs mirror the TOML file shape and are converted by `load`.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::collab::{Logger, Transport};

use super::types::{Config, NowFn, RetryFn, UidFn};

/// Partially-specified client configuration.
///
/// `None`, an empty endpoint, a zero interval and a zero batch size all mean
/// "use the default".
#[derive(Clone, Default)]
pub struct RawConfig {
    pub endpoint: Option<String>,
    /// Signed so that a negative interval can be reported instead of lost.
    pub flush_interval: Option<chrono::Duration>,
    pub transport: Option<Arc<dyn Transport>>,
    pub logger: Option<Arc<dyn Logger>>,
    /// Signed for the same reason as `flush_interval`.
    pub batch_size: Option<i64>,
    pub verbose: bool,
    pub uid: Option<UidFn>,
    pub now: Option<NowFn>,
    pub retry_after: Option<RetryFn>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_flush_interval(mut self, interval: chrono::Duration) -> Self {
        self.flush_interval = Some(interval);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_batch_size(mut self, batch_size: i64) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_uid<F>(mut self, uid: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.uid = Some(Arc::new(uid));
        self
    }

    pub fn with_now<F>(mut self, now: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.now = Some(Arc::new(now));
        self
    }

    pub fn with_retry_after<F>(mut self, retry_after: F) -> Self
    where
        F: Fn(u32) -> std::time::Duration + Send + Sync + 'static,
    {
        self.retry_after = Some(Arc::new(retry_after));
        self
    }
}

impl fmt::Debug for RawConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawConfig")
            .field("endpoint", &self.endpoint)
            .field("flush_interval", &self.flush_interval)
            .field("transport", &self.transport.as_ref().map(|_| ".."))
            .field("logger", &self.logger.as_ref().map(|_| ".."))
            .field("batch_size", &self.batch_size)
            .field("verbose", &self.verbose)
            .field("uid", &self.uid.as_ref().map(|_| ".."))
            .field("now", &self.now.as_ref().map(|_| ".."))
            .field("retry_after", &self.retry_after.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Every field of a resolved config, marked as set.
impl From<&Config> for RawConfig {
    fn from(config: &Config) -> Self {
        Self {
            endpoint: Some(config.endpoint.clone()),
            // Saturates at chrono's maximum.
            flush_interval: Some(
                chrono::TimeDelta::from_std(config.flush_interval).unwrap_or(chrono::TimeDelta::MAX),
            ),
            transport: Some(config.transport.clone()),
            logger: Some(config.logger.clone()),
            batch_size: Some(i64::try_from(config.batch_size).unwrap_or(i64::MAX)),
            verbose: config.verbose,
            uid: Some(config.uid.clone()),
            now: Some(config.now.clone()),
            retry_after: Some(config.retry_after.clone()),
        }
    }
}

// ── File shape ───────────────────────────────────────────────────────────────

/// TOML shape — serde target before conversion into [`RawConfig`].
#[derive(Deserialize, Default)]
pub(super) struct FileConfig {
    #[serde(default)]
    pub client: FileClient,
    #[serde(default)]
    pub retry: Option<FileRetry>,
}

#[derive(Deserialize, Default)]
pub(super) struct FileClient {
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Milliseconds; negative values are kept so validation can reject them.
    #[serde(default)]
    pub flush_interval_ms: Option<i64>,
    #[serde(default)]
    pub batch_size: Option<i64>,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Deserialize, Default)]
pub(super) struct FileRetry {
    #[serde(default)]
    pub base_ms: Option<u64>,
    #[serde(default)]
    pub factor: Option<u32>,
    #[serde(default)]
    pub jitter: Option<f64>,
    #[serde(default)]
    pub cap_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::build;

    #[test]
    fn oversized_interval_saturates() {
        let mut cfg = build(RawConfig::new()).unwrap();
        cfg.flush_interval = std::time::Duration::MAX;
        let raw = RawConfig::from(&cfg);
        assert_eq!(raw.flush_interval, Some(chrono::TimeDelta::MAX));
    }

    #[test]
    fn resolved_interval_converts_exactly() {
        let cfg = build(RawConfig::new().with_flush_interval(chrono::TimeDelta::milliseconds(1500)))
            .unwrap();
        let raw = RawConfig::from(&cfg);
        assert_eq!(raw.flush_interval, Some(chrono::TimeDelta::milliseconds(1500)));
        assert_eq!(raw.batch_size, Some(250));
    }
}
