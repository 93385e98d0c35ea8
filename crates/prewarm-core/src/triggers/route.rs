use std::sync::Arc;

use tracing::trace;

use crate::policy::StalenessPolicy;
use crate::routes::RouteResourceMap;
use crate::scheduler::PrefetchScheduler;

/// Turns a navigation intent into a reactive warm request.
/// Clone is cheap - tables are shared through `Arc`.
#[derive(Clone)]
pub struct RouteTrigger {
    routes: Arc<RouteResourceMap>,
    policy: Arc<StalenessPolicy>,
    scheduler: PrefetchScheduler,
}

impl RouteTrigger {
    pub fn new(
        routes: Arc<RouteResourceMap>,
        policy: Arc<StalenessPolicy>,
        scheduler: PrefetchScheduler,
    ) -> Self {
        Self {
            routes,
            policy,
            scheduler,
        }
    }

    /// Warm the resource behind `route`, if it has one.
    pub fn for_route(&self, route: &str) {
        match self.routes.resource_for(route) {
            Some(key) => self.scheduler.warm(key, self.policy.reactive()),
            None => trace!(route, "No resource mapped for route"),
        }
    }
}
