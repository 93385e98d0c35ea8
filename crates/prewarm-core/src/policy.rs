//! Freshness budgets attached to warm requests.
//!
//! The budget is picked by *why* a prefetch happens, never by resource type:
//! proactive startup warming uses `bulk`, hover and navigation intent use
//! `reactive`.

use std::time::Duration;

/// Bulk warming budget: 5 minutes.
/// Startup data only needs to survive the first few screens.
pub const DEFAULT_BULK_STALE_SECS: u64 = 300;

/// Reactive warming budget: 2 minutes.
/// Hover/navigation intent means the data is about to be shown, so keep it tighter.
pub const DEFAULT_REACTIVE_STALE_SECS: u64 = 120;

/// How long a warmed entry counts as fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StalenessBudget(Duration);

impl StalenessBudget {
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    bulk: StalenessBudget,
    reactive: StalenessBudget,
}

impl StalenessPolicy {
    pub fn new(bulk: StalenessBudget, reactive: StalenessBudget) -> Self {
        Self { bulk, reactive }
    }

    pub fn bulk(&self) -> StalenessBudget {
        self.bulk
    }

    pub fn reactive(&self) -> StalenessBudget {
        self.reactive
    }
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::new(
            StalenessBudget::from_secs(DEFAULT_BULK_STALE_SECS),
            StalenessBudget::from_secs(DEFAULT_REACTIVE_STALE_SECS),
        )
    }
}
