use std::time::Duration;

use crate::shared::constants::{
    POLL_BACKOFF_FACTOR, POLL_DEADLINE, POLL_MAX_INTERVAL, POLL_MIN_INTERVAL,
};

/// Bounded exponential backoff for session polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub min_interval: Duration,
    pub max_interval: Duration,
    /// Total time allowed from the first poll until giving up.
    pub deadline: Duration,
    pub factor: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            min_interval: POLL_MIN_INTERVAL,
            max_interval: POLL_MAX_INTERVAL,
            deadline: POLL_DEADLINE,
            factor: POLL_BACKOFF_FACTOR,
        }
    }
}

impl PollPolicy {
    pub fn new(
        min_interval: Duration,
        max_interval: Duration,
        deadline: Duration,
    ) -> Result<Self, &'static str> {
        if min_interval.is_zero() {
            return Err("min_interval must be > 0");
        }
        if max_interval < min_interval {
            return Err("max_interval must be >= min_interval");
        }
        Ok(Self {
            min_interval,
            max_interval,
            deadline,
            factor: POLL_BACKOFF_FACTOR,
        })
    }

    /// Endless sequence of sleep intervals: min, min*factor, ... capped at max.
    pub fn intervals(&self) -> Backoff {
        Backoff {
            next: self.min_interval,
            max: self.max_interval,
            factor: self.factor.max(1),
        }
    }
}

pub struct Backoff {
    next: Duration,
    max: Duration,
    factor: u32,
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next;
        self.next = current.saturating_mul(self.factor).min(self.max);
        Some(current)
    }
}
