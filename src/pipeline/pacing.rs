//! Delays between remote lookups.
//!
//! After every attempted lookup the pipeline waits a random time drawn from
//! `[min_wait, max_wait]` milliseconds. The wait goes through a [`Scheduler`]
//! so tests can observe delays without sleeping.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::config::Options;

/// Something able to suspend the current task.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn suspend(&self, delay: Duration);
}

/// Real-time scheduler backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn suspend(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Inclusive bounds of the random delay, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    min_ms: u64,
    max_ms: u64,
}

impl PacingPolicy {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    pub fn from_options(options: &Options) -> Self {
        Self::new(options.min_wait, options.max_wait)
    }

    /// Draw the next delay uniformly from the bounds.
    pub fn next_delay(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }
}
