//! Speculative prefetch policy for a client application.
//!
//! This crate decides *which* remote resources to warm into a shared cache,
//! *when* to warm them, and *how long* a warmed entry stays fresh. Transport
//! and storage belong to a [`CacheClient`] implementation; the policy only
//! issues warm requests through it.
//!
//! The pieces, leaf-first:
//! - `RouteResourceMap`: route string to resource key
//! - `StalenessPolicy`: the `bulk` and `reactive` freshness budgets
//! - `PrefetchScheduler`: one warm request per call into the cache client
//! - `RouteTrigger` / `HoverTrigger`: navigation and hover intent
//! - `BulkWarmer`: warms the commonly needed resources at startup
//!
//! `Prefetcher` wires them together from a validated `PrefetchConfig` and
//! exposes the startup, per-element and per-navigation entry points.

pub mod bulk;
pub mod cache;
pub mod config;
pub mod error;
pub mod policy;
pub mod prefetcher;
pub mod routes;
pub mod scheduler;
pub mod triggers;

#[cfg(test)]
pub(crate) mod testing;

pub use bulk::{BulkWarmer, CommonResources};
pub use cache::{CachedData, FetchError, HttpCacheClient};
pub use config::PrefetchConfig;
pub use error::ConfigError;
pub use policy::{StalenessBudget, StalenessPolicy};
pub use prefetcher::Prefetcher;
pub use routes::{ResourceKey, RouteResourceMap};
pub use scheduler::{CacheClient, PrefetchScheduler};
pub use triggers::{
    Delivery, Document, DocumentCapability, HoverListener, HoverTrigger, ListenerState,
    NoDocument, RouteTrigger,
};
