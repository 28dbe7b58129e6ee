//! Per-iteration time budget

use crate::config::LoopTiming;
use crate::traits::Monotonic;

/// Time accounting for one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IterationBudget {
    start_ms: u32,
    budget_ms: u32,
    min_slack_ms: u32,
}

impl IterationBudget {
    /// Start timing an iteration now
    pub fn start<C: Monotonic + ?Sized>(clock: &C, timing: &LoopTiming) -> Self {
        Self {
            start_ms: clock.now_ms(),
            budget_ms: timing.budget_ms,
            min_slack_ms: timing.min_slack_ms,
        }
    }

    /// Milliseconds since the iteration started, robust to counter wrap
    pub fn elapsed<C: Monotonic + ?Sized>(&self, clock: &C) -> u32 {
        clock.now_ms().wrapping_sub(self.start_ms)
    }

    /// Milliseconds left before the budget is used up
    pub fn remaining<C: Monotonic + ?Sized>(&self, clock: &C) -> u32 {
        self.budget_ms.saturating_sub(self.elapsed(clock))
    }

    /// Check if opportunistic work may still run
    pub fn has_slack<C: Monotonic + ?Sized>(&self, clock: &C) -> bool {
        self.remaining(clock) > self.min_slack_ms
    }

    pub fn budget_ms(&self) -> u32 {
        self.budget_ms
    }
}
