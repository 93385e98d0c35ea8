//! Issues warm requests to the cache client.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::policy::StalenessBudget;
use crate::routes::ResourceKey;

/// The external cache client.
///
/// Implementations reuse a cached value that is still fresh for `stale_time`
/// or perform one fetch to refresh it, and de-duplicate in-flight requests.
/// There is no return value: transport and storage failures stay inside the
/// client.
pub trait CacheClient {
    fn prefetch(&self, key: &ResourceKey, stale_time: Duration);
}

/// Fire-and-forget front for the cache client.
/// Clone is cheap - the client is shared through an `Arc`.
#[derive(Clone)]
pub struct PrefetchScheduler {
    client: Arc<dyn CacheClient>,
}

impl PrefetchScheduler {
    pub fn new(client: Arc<dyn CacheClient>) -> Self {
        Self { client }
    }

    /// Exactly one call into the cache client. No de-duplication here.
    pub fn warm(&self, key: &ResourceKey, budget: StalenessBudget) {
        let stale_time = budget.duration();
        debug!(key = %key, stale_secs = stale_time.as_secs(), "Issuing warm request");
        self.client.prefetch(key, stale_time);
    }
}
