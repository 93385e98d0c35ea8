//! HTTP-backed cache client.
//!
//! Keeps fetched resources in memory keyed by `ResourceKey`. A prefetch is
//! skipped when the stored entry is still fresh for the requested budget or
//! when a fetch for the same key is already running; otherwise one GET is
//! spawned on the current tokio runtime. Failures are logged and dropped.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::{header, Client, Url};
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, warn};

use super::{CachedData, FetchError};
use crate::routes::ResourceKey;
use crate::scheduler::CacheClient;

/// HTTP request timeout in seconds.
/// Warming is speculative, so give up well before a user would notice.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchDecision {
    Fresh,
    InFlight,
    Fetch,
}

#[derive(Default)]
struct Store {
    entries: HashMap<ResourceKey, CachedData<Value>>,
    in_flight: HashSet<ResourceKey>,
}

/// Clone is cheap - the store and reqwest::Client are shared through `Arc`.
#[derive(Clone)]
pub struct HttpCacheClient {
    client: Client,
    base_url: Arc<Url>,
    store: Arc<Mutex<Store>>,
    settled: Arc<Notify>,
}

impl HttpCacheClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("API base URL cannot carry a path: {}", base_url);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: Arc::new(base_url),
            store: Arc::new(Mutex::new(Store::default())),
            settled: Arc::new(Notify::new()),
        })
    }

    /// URL for `key`, appended as a single percent-encoded path segment.
    fn resource_url(&self, key: &ResourceKey) -> Result<Url, FetchError> {
        // Dot segments would be dropped or resolved against the base path
        if key.as_str().is_empty() || matches!(key.as_str(), "." | "..") {
            return Err(FetchError::InvalidKey(key.to_string()));
        }

        let mut url = (*self.base_url).clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidKey(key.to_string()))?
            .pop_if_empty()
            .push(key.as_str());
        Ok(url)
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached value for `key`, fresh or not.
    pub fn get(&self, key: &ResourceKey) -> Option<CachedData<Value>> {
        self.lock().entries.get(key).cloned()
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }

    /// Age of every stored entry, sorted by key.
    pub fn cache_ages(&self) -> Vec<(ResourceKey, String)> {
        let store = self.lock();
        let mut ages: Vec<_> = store
            .entries
            .iter()
            .map(|(key, cached)| (key.clone(), cached.age_display()))
            .collect();
        ages.sort();
        ages
    }

    /// Wait until no fetch is running. Returns false on timeout.
    pub async fn wait_idle(&self, timeout: Duration) -> bool {
        let drained = async {
            loop {
                // Register before checking so a fetch settling in between still wakes us
                let settled = self.settled.notified();
                if self.in_flight() == 0 {
                    return;
                }
                settled.await;
            }
        };
        tokio::time::timeout(timeout, drained).await.is_ok()
    }

    fn release(&self, key: &ResourceKey) {
        self.lock().in_flight.remove(key);
        self.settled.notify_waiters();
    }

    /// Check freshness and claim the in-flight slot in one step.
    fn decide(&self, key: &ResourceKey, stale_time: Duration) -> FetchDecision {
        let mut store = self.lock();
        if store.in_flight.contains(key) {
            return FetchDecision::InFlight;
        }
        if let Some(cached) = store.entries.get(key) {
            if !cached.is_stale(stale_time) {
                return FetchDecision::Fresh;
            }
        }
        store.in_flight.insert(key.clone());
        FetchDecision::Fetch
    }

    fn finish(&self, key: &ResourceKey, result: Result<Value, FetchError>) {
        match result {
            Ok(value) => {
                debug!(key = %key, "Resource warmed");
                self.lock().entries.insert(key.clone(), CachedData::new(value));
            }
            Err(e) => warn!(key = %key, error = %e, "Failed to warm resource"),
        }
        self.release(key);
    }

    async fn fetch(&self, key: &ResourceKey) -> Result<Value, FetchError> {
        let url = self.resource_url(key)?;
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::from_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}

impl CacheClient for HttpCacheClient {
    fn prefetch(&self, key: &ResourceKey, stale_time: Duration) {
        match self.decide(key, stale_time) {
            FetchDecision::Fresh => debug!(key = %key, "Cached resource still fresh, skipped"),
            FetchDecision::InFlight => debug!(key = %key, "Fetch already in flight, skipped"),
            FetchDecision::Fetch => {
                let Ok(handle) = Handle::try_current() else {
                    warn!(key = %key, "No async runtime available, warm request dropped");
                    self.release(key);
                    return;
                };

                let this = self.clone();
                let key = key.clone();
                handle.spawn(async move {
                    let result = this.fetch(&key).await;
                    this.finish(&key, result);
                });
            }
        }
    }
}
