//! Retry budget and exponential backoff with full jitter
//!
//! Delay follows the "full jitter" strategy:
//! `delay = random(0, min(cap, base * 2^attempt))`.

use rand::Rng;
use std::time::Duration;

/// Retry budget for batch transmission
///
/// A batch is attempted at most `max_attempts` times; the delay before
/// each retry grows exponentially from `base_delay` up to `max_delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total transmission attempts per batch, including the first
    pub max_attempts: u32,
    /// Base delay before the first retry
    pub base_delay: Duration,
    /// Upper bound on any single retry delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Create a policy, clamping attempts to at least one
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }
}

/// Exponential backoff calculator with full jitter
pub(crate) struct Backoff {
    base_ms: u64,
    max_ms: u64,
    /// Current attempt number (0-indexed)
    attempt: u32,
}

impl Backoff {
    pub(crate) fn new(base: Duration, max: Duration) -> Self {
        Self {
            base_ms: base.as_millis() as u64,
            max_ms: max.as_millis() as u64,
            attempt: 0,
        }
    }

    /// Compute the next delay with full jitter and advance the attempt
    pub(crate) fn next_delay(&mut self) -> Duration {
        let exp = self
            .base_ms
            .saturating_mul(1u64.checked_shl(self.attempt).unwrap_or(u64::MAX));
        let capped = exp.min(self.max_ms);
        let jittered = if capped == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=capped)
        };
        self.attempt = self.attempt.saturating_add(1);
        Duration::from_millis(jittered)
    }
}
