//! Proactive warming of the resources most screens need on load.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use crate::policy::StalenessPolicy;
use crate::routes::ResourceKey;
use crate::scheduler::PrefetchScheduler;

/// Hand-maintained list of resources needed right after startup.
/// Keys are unique: repeats are dropped, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonResources {
    keys: Vec<ResourceKey>,
}

impl CommonResources {
    pub fn new(keys: Vec<ResourceKey>) -> Self {
        let mut seen = HashSet::new();
        let keys = keys
            .into_iter()
            .filter(|key| seen.insert(key.clone()))
            .collect();
        Self { keys }
    }

    pub fn keys(&self) -> &[ResourceKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

pub struct BulkWarmer {
    common: Arc<CommonResources>,
    policy: Arc<StalenessPolicy>,
    scheduler: PrefetchScheduler,
}

impl BulkWarmer {
    pub fn new(
        common: Arc<CommonResources>,
        policy: Arc<StalenessPolicy>,
        scheduler: PrefetchScheduler,
    ) -> Self {
        Self {
            common,
            policy,
            scheduler,
        }
    }

    /// Warm every common resource with the bulk budget.
    /// Holds no state, so a second call issues the same requests again.
    pub fn warm_common(&self) {
        info!(resources = self.common.len(), "Warming common resources");
        let budget = self.policy.bulk();
        for key in self.common.keys() {
            self.scheduler.warm(key, budget);
        }
    }
}
