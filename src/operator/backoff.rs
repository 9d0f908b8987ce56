//! Backoff Policy
//!
//! 削除リトライのバックオフ戦略

use std::time::Duration;

/// Base wait between attempts for the reference schedule
pub const DEFAULT_WAIT: Duration = Duration::from_secs(30);

/// Attempts made before giving up in the reference schedule
pub const DEFAULT_STEPS: u32 = 12;

/// Bounded retry schedule shared by the mutation paths
///
/// At most `steps` attempts are made, so at most `steps - 1` sleeps happen. The
/// sleep after attempt `n` is `initial_delay * factor^(n-1)`, clamped to `max_delay`
/// when one is set. A factor of `1.0` gives a fixed interval.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    pub initial_delay: Duration,
    pub steps: u32,
    pub factor: f64,
    pub max_delay: Option<Duration>,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_WAIT, DEFAULT_STEPS)
    }
}

impl BackoffPolicy {
    /// Same delay between every attempt
    pub fn fixed(interval: Duration, steps: u32) -> Self {
        Self {
            initial_delay: interval,
            steps,
            factor: 1.0,
            max_delay: None,
        }
    }

    /// Delay multiplied by `factor` after every attempt, optionally capped
    pub fn exponential(
        initial_delay: Duration,
        factor: f64,
        steps: u32,
        max_delay: Option<Duration>,
    ) -> Self {
        Self {
            initial_delay,
            steps,
            factor: factor.max(1.0),
            max_delay,
        }
    }

    /// Sleep to take after the given (1-based) attempt failed as busy
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let scaled = self.initial_delay.as_secs_f64() * self.factor.powi(exponent);
        let delay = Duration::try_from_secs_f64(scaled).unwrap_or(Duration::MAX);

        match self.max_delay {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }

    /// Whether another attempt may follow the given (1-based) attempt
    pub fn has_next(&self, attempt: u32) -> bool {
        attempt < self.steps
    }

    /// Worst-case total time spent sleeping before the budget is exhausted
    pub fn total_wait_bound(&self) -> Duration {
        (1..self.steps)
            .map(|attempt| self.delay_after(attempt))
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(d))
    }
}
