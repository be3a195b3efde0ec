//! Settling delay after a price synchronization.
//!
//! The synchronization endpoint applies prices asynchronously and emits no
//! completion event. Callers wait for a policy-defined duration before
//! trusting the cart's unit prices again.

use std::fmt::Debug;
use std::time::Duration;

/// How long to wait after a successful synchronization of `matched` lines.
pub trait SettlingPolicy: Debug + Send + Sync {
    /// Delay before the cart may be treated as authoritative.
    fn settle_delay(&self, matched: usize) -> Duration;
}

/// A fixed delay per synchronized line, optionally capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPerItemDelay {
    per_item: Duration,
    max: Option<Duration>,
}

impl FixedPerItemDelay {
    /// Default delay per synchronized line.
    pub const DEFAULT_PER_ITEM: Duration = Duration::from_secs(2);

    /// Create an uncapped policy.
    #[must_use]
    pub const fn new(per_item: Duration) -> Self {
        Self {
            per_item,
            max: None,
        }
    }

    /// Cap the total delay.
    #[must_use]
    pub const fn with_max(mut self, max: Option<Duration>) -> Self {
        self.max = max;
        self
    }
}

impl Default for FixedPerItemDelay {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PER_ITEM)
    }
}

impl SettlingPolicy for FixedPerItemDelay {
    fn settle_delay(&self, matched: usize) -> Duration {
        let count = u32::try_from(matched).unwrap_or(u32::MAX);
        let delay = self.per_item.saturating_mul(count);
        match self.max {
            Some(max) => delay.min(max),
            None => delay,
        }
    }
}
