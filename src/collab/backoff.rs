//! Exponential backoff schedule used as the default retry policy.

use std::sync::Arc;
use std::time::Duration;

use rand_core::{OsRng, RngCore};

use crate::config::RetryFn;

pub const DEFAULT_BASE: Duration = Duration::from_millis(100);
pub const DEFAULT_FACTOR: u32 = 2;
pub const DEFAULT_CAP: Duration = Duration::from_secs(10);

/// `base * factor^attempt`, optionally spread by `jitter`, never above `cap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    base: Duration,
    factor: u32,
    jitter: f64,
    cap: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            factor: DEFAULT_FACTOR,
            jitter: 0.0,
            cap: DEFAULT_CAP,
        }
    }
}

impl Backoff {
    /// `factor` is raised to at least 1 and `jitter` clamped to `[0, 1]`.
    pub fn new(base: Duration, factor: u32, jitter: f64, cap: Duration) -> Self {
        let jitter = if jitter.is_nan() { 0.0 } else { jitter.clamp(0.0, 1.0) };
        Self {
            base,
            factor: factor.max(1),
            jitter,
            cap,
        }
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    pub fn cap(&self) -> Duration {
        self.cap
    }

    /// Wait before retry number `attempt` (0 for the first retry).
    pub fn duration(&self, attempt: u32) -> Duration {
        let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
        let mut secs = self.base.as_secs_f64() * f64::from(self.factor).powi(exp);

        if self.jitter > 0.0 && secs.is_finite() {
            let delta = self.jitter * secs;
            secs = secs - delta + unit_random() * 2.0 * delta;
        }

        let cap = self.cap.as_secs_f64();
        if !secs.is_finite() || secs >= cap {
            return self.cap;
        }
        Duration::from_secs_f64(secs.max(0.0))
    }

    pub fn into_retry_fn(self) -> RetryFn {
        Arc::new(move |attempt| self.duration(attempt))
    }
}

/// Uniform value in `[0, 1)`.
fn unit_random() -> f64 {
    // 53 random bits fill an f64 mantissa exactly.
    (OsRng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_doubles_from_100ms() {
        let b = Backoff::default();
        assert_eq!(b.duration(0), Duration::from_millis(100));
        assert_eq!(b.duration(1), Duration::from_millis(200));
        assert_eq!(b.duration(2), Duration::from_millis(400));
        assert_eq!(b.duration(5), Duration::from_millis(3200));
    }

    #[test]
    fn default_schedule_is_capped() {
        let b = Backoff::default();
        assert_eq!(b.duration(7), DEFAULT_CAP);
        assert_eq!(b.duration(64), DEFAULT_CAP);
        assert_eq!(b.duration(u32::MAX), DEFAULT_CAP);
    }

    #[test]
    fn new_clamps_parameters() {
        let b = Backoff::new(Duration::from_millis(50), 0, 3.0, Duration::from_secs(1));
        assert_eq!(b.factor(), 1);
        assert_eq!(b.jitter(), 1.0);

        let b = Backoff::new(Duration::from_millis(50), 3, f64::NAN, Duration::from_secs(1));
        assert_eq!(b.jitter(), 0.0);
    }

    #[test]
    fn factor_one_is_constant() {
        let b = Backoff::new(Duration::from_millis(250), 1, 0.0, Duration::from_secs(5));
        for attempt in 0..10 {
            assert_eq!(b.duration(attempt), Duration::from_millis(250));
        }
    }

    #[test]
    fn jitter_stays_within_spread() {
        let b = Backoff::new(Duration::from_millis(1000), 2, 0.5, Duration::from_secs(60));
        for _ in 0..100 {
            let d = b.duration(1);
            assert!(d >= Duration::from_millis(1000), "{d:?} below spread");
            assert!(d <= Duration::from_millis(3000), "{d:?} above spread");
        }
    }

    #[test]
    fn retry_fn_matches_schedule() {
        let b = Backoff::default();
        let f = b.into_retry_fn();
        assert_eq!(f(0), b.duration(0));
        assert_eq!(f(3), b.duration(3));
    }

    #[test]
    fn unit_random_in_range() {
        for _ in 0..1000 {
            let v = unit_random();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
