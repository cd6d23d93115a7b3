//! Validation and defaulting.
//!
//! The two passes are separate on purpose: [`validate`] only inspects,
//! [`resolve`] only fills gaps. [`build`] runs both.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::collab::{Backoff, Logger, ReqwestTransport, StderrLogger, Transport};
use crate::error::{ConfigError, ConfigValue};

use super::raw::RawConfig;
use super::types::{
    Config, NowFn, UidFn, DEFAULT_BATCH_SIZE, DEFAULT_ENDPOINT, DEFAULT_INTERVAL,
};

/// Reject fields whose non-zero value cannot be used. The interval is checked
/// before the batch size.
pub fn validate(raw: &RawConfig) -> Result<(), ConfigError> {
    if let Some(interval) = raw.flush_interval {
        if interval < chrono::Duration::zero() {
            return Err(ConfigError {
                reason: "negative time intervals are not supported",
                field: "flushInterval",
                value: ConfigValue::Interval(interval),
            });
        }
    }

    if let Some(batch_size) = raw.batch_size {
        if batch_size < 0 {
            return Err(ConfigError {
                reason: "negative batch sizes are not supported",
                field: "batchSize",
                value: ConfigValue::BatchSize(batch_size),
            });
        }
    }

    Ok(())
}

/// Fill every unset field with its default.
///
/// Expects a validated input. A negative interval or batch size that slipped
/// through is treated as unset.
pub fn resolve(raw: RawConfig) -> Config {
    let endpoint = match raw.endpoint {
        Some(endpoint) if !endpoint.is_empty() => endpoint,
        _ => {
            debug!(default = DEFAULT_ENDPOINT, "endpoint unset");
            DEFAULT_ENDPOINT.to_string()
        }
    };

    let flush_interval = match raw.flush_interval.and_then(|d| d.to_std().ok()) {
        Some(interval) if !interval.is_zero() => interval,
        _ => {
            debug!(default_ms = DEFAULT_INTERVAL.as_millis() as u64, "flush interval unset");
            DEFAULT_INTERVAL
        }
    };

    let batch_size = match raw.batch_size.and_then(|n| usize::try_from(n).ok()) {
        Some(n) if n != 0 => n,
        _ => {
            debug!(default = DEFAULT_BATCH_SIZE, "batch size unset");
            DEFAULT_BATCH_SIZE
        }
    };

    let transport = raw.transport.unwrap_or_else(|| {
        debug!("transport unset, using shared default");
        ReqwestTransport::shared() as Arc<dyn Transport>
    });

    let logger = raw
        .logger
        .unwrap_or_else(|| StderrLogger::shared() as Arc<dyn Logger>);

    let uid = raw.uid.unwrap_or_else(|| Arc::new(default_uid) as UidFn);
    let now = raw.now.unwrap_or_else(|| Arc::new(Utc::now) as NowFn);
    let retry_after = raw
        .retry_after
        .unwrap_or_else(|| Backoff::default().into_retry_fn());

    Config {
        endpoint,
        flush_interval,
        transport,
        logger,
        batch_size,
        verbose: raw.verbose,
        uid,
        now,
        retry_after,
    }
}

/// Validate, then resolve.
pub fn build(raw: RawConfig) -> Result<Config, ConfigError> {
    validate(&raw)?;
    Ok(resolve(raw))
}

/// Random (v4) UUID, hyphenated.
pub fn default_uid() -> String {
    Uuid::new_v4().to_string()
}

/// Wait before retry `attempt` under the default policy.
pub fn default_retry_after(attempt: u32) -> Duration {
    Backoff::default().duration(attempt)
}
