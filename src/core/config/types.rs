//! Resolved configuration types.
//!
//! [`Config`] is what the client consumes: every field is concrete. The
//! partially-specified input lives in `raw.rs`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::collab::{Logger, Transport};

/// Ingestion service used when no endpoint is set.
pub const DEFAULT_ENDPOINT: &str = "https://api.segment.io";

/// Flush interval used when none is set.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Messages per request used when no batch size is set.
pub const DEFAULT_BATCH_SIZE: usize = 250;

/// Produces a unique message identifier.
pub type UidFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Returns the current time.
pub type NowFn = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Maps a retry count to how long to wait before the next attempt.
pub type RetryFn = Arc<dyn Fn(u32) -> Duration + Send + Sync>;

/// Fully-resolved client configuration.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the ingestion service.
    pub endpoint: String,
    /// Longest time a queued batch waits before it is sent.
    pub flush_interval: Duration,
    pub transport: Arc<dyn Transport>,
    pub logger: Arc<dyn Logger>,
    /// Maximum messages per outbound request. The service's own request-body
    /// ceiling applies on top of this.
    pub batch_size: usize,
    /// Forward info-level messages to the logger.
    pub verbose: bool,
    pub uid: UidFn,
    pub now: NowFn,
    pub retry_after: RetryFn,
}

impl Config {
    /// Info messages only reach the logger when `verbose` is set.
    pub fn log_info(&self, msg: &str) {
        if self.verbose {
            self.logger.info(msg);
        }
    }

    pub fn log_error(&self, msg: &str) {
        self.logger.error(msg);
    }

    pub fn next_uid(&self) -> String {
        (self.uid)()
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.now)()
    }

    pub fn retry_after(&self, attempt: u32) -> Duration {
        (self.retry_after)(attempt)
    }

    /// The plain data fields, for display.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            endpoint: self.endpoint.clone(),
            flush_interval_ms: u64::try_from(self.flush_interval.as_millis()).unwrap_or(u64::MAX),
            batch_size: self.batch_size,
            verbose: self.verbose,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("flush_interval", &self.flush_interval)
            .field("batch_size", &self.batch_size)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub endpoint: String,
    pub flush_interval_ms: u64,
    pub batch_size: usize,
    pub verbose: bool,
}
