//! Logging sink used by the client for messages produced in the background.
//!
//! The default sink, [`StderrLogger`], owns a private `tracing` dispatcher
//! that writes to stderr, so it works whether or not the host application has
//! installed a global subscriber.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::Dispatch;

/// Log target used by [`StderrLogger`].
pub const LOG_TARGET: &str = "segment";

/// Capability the client needs from a logger.
pub trait Logger: Send + Sync {
    fn info(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Process-wide default logger.
pub struct StderrLogger {
    dispatch: Dispatch,
}

static DEFAULT_LOGGER: OnceLock<Arc<StderrLogger>> = OnceLock::new();

impl StderrLogger {
    pub fn new() -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .with_target(true)
            .finish();
        Self { dispatch: Dispatch::new(subscriber) }
    }

    /// The shared instance, built on first use.
    pub fn shared() -> Arc<StderrLogger> {
        DEFAULT_LOGGER.get_or_init(|| Arc::new(StderrLogger::new())).clone()
    }
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StderrLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StderrLogger").finish_non_exhaustive()
    }
}

impl Logger for StderrLogger {
    fn info(&self, msg: &str) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::info!(target: LOG_TARGET, "{msg}");
        });
    }

    fn error(&self, msg: &str) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::error!(target: LOG_TARGET, "{msg}");
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Collects messages instead of printing them.
    #[derive(Default)]
    pub(crate) struct RecordingLogger {
        pub lines: Mutex<Vec<String>>,
    }

    impl Logger for RecordingLogger {
        fn info(&self, msg: &str) {
            self.lines.lock().unwrap().push(format!("INFO {msg}"));
        }

        fn error(&self, msg: &str) {
            self.lines.lock().unwrap().push(format!("ERROR {msg}"));
        }
    }

    #[test]
    fn shared_returns_same_instance() {
        let a = StderrLogger::shared();
        let b = StderrLogger::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn shared_is_race_free_on_first_use() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(StderrLogger::shared))
            .collect();
        let loggers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(loggers.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn stderr_logger_accepts_both_levels() {
        let logger = StderrLogger::new();
        logger.info("info from test");
        logger.error("error from test");
    }

    #[test]
    fn recording_logger_keeps_order() {
        let logger = RecordingLogger::default();
        logger.info("a");
        logger.error("b");
        assert_eq!(*logger.lines.lock().unwrap(), vec!["INFO a", "ERROR b"]);
    }
}
