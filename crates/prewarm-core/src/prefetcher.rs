//! Host-facing entry points.
//!
//! A `Prefetcher` is built once during application initialization. The host
//! calls `on_startup` once, `arm_hover` for every rendered navigational
//! element, and `on_navigate` whenever the router changes (or is about to
//! change) route.

use std::sync::Arc;

use tracing::debug;

use crate::bulk::BulkWarmer;
use crate::config::PrefetchConfig;
use crate::error::ConfigError;
use crate::scheduler::{CacheClient, PrefetchScheduler};
use crate::triggers::{Document, DocumentCapability, HoverTrigger, RouteTrigger};

pub struct Prefetcher<D> {
    route_trigger: RouteTrigger,
    hover_trigger: HoverTrigger<D>,
    bulk_warmer: BulkWarmer,
}

impl<D: Document> Prefetcher<D> {
    pub fn new(
        config: &PrefetchConfig,
        client: Arc<dyn CacheClient>,
        document: DocumentCapability<D>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let routes = config.route_map();
        let policy = config.staleness_policy();
        let scheduler = PrefetchScheduler::new(client);

        debug!(
            routes = routes.len(),
            common = config.common.len(),
            bulk_secs = config.bulk_stale_secs,
            reactive_secs = config.reactive_stale_secs,
            "Prefetch policy configured"
        );

        let route_trigger = RouteTrigger::new(routes, policy.clone(), scheduler.clone());
        Ok(Self {
            hover_trigger: HoverTrigger::new(document, route_trigger.clone()),
            bulk_warmer: BulkWarmer::new(config.common_resources(), policy, scheduler),
            route_trigger,
        })
    }

    /// Startup boundary: warm the common resources.
    pub fn on_startup(&self) {
        self.bulk_warmer.warm_common();
    }

    /// Per-element boundary: arm hover prefetching for `route`.
    pub fn arm_hover(&self, route: &str) {
        self.hover_trigger.arm(route);
    }

    /// Per-navigation boundary: warm the resource behind `route`.
    pub fn on_navigate(&self, route: &str) {
        self.route_trigger.for_route(route);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::routes::ResourceKey;
    use crate::testing::{FakeDocument, RecordingClient};
    use crate::triggers::NoDocument;

    #[test]
    fn test_boundaries_route_to_components() {
        let client = Arc::new(RecordingClient::default());
        let document = FakeDocument::new([(7, "/teams")]);
        let prefetcher = Prefetcher::new(
            &PrefetchConfig::default(),
            client.clone(),
            DocumentCapability::Available(&document),
        )
        .expect("Default config should be valid");

        prefetcher.on_startup();
        assert_eq!(client.calls().len(), 3);
        client.clear();

        prefetcher.on_navigate("/schedule");
        assert_eq!(
            client.calls(),
            vec![(ResourceKey::new("schedule"), Duration::from_secs(120))]
        );
        client.clear();

        prefetcher.arm_hover("/teams");
        document.hover(7);
        document.hover(7);
        assert_eq!(
            client.calls(),
            vec![(ResourceKey::new("teams"), Duration::from_secs(120))]
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let client = Arc::new(RecordingClient::default());
        let config = PrefetchConfig {
            reactive_stale_secs: 0,
            ..Default::default()
        };
        let result = Prefetcher::<NoDocument>::new(&config, client, DocumentCapability::Headless);
        assert!(matches!(result, Err(ConfigError::ZeroBudget("reactive"))));
    }

    #[test]
    fn test_headless_prefetcher_still_warms_routes() {
        let client = Arc::new(RecordingClient::default());
        let prefetcher = Prefetcher::<NoDocument>::new(
            &PrefetchConfig::default(),
            client.clone(),
            DocumentCapability::Headless,
        )
        .expect("Default config should be valid");

        prefetcher.arm_hover("/standings");
        assert!(client.calls().is_empty());

        prefetcher.on_navigate("/standings");
        prefetcher.on_navigate("/unknown");
        assert_eq!(client.calls().len(), 1);
    }
}
