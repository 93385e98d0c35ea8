//! Route to resource lookup.
//!
//! The table is small and hand-maintained: it records which UI route
//! consumes which resource. A route with no entry simply has nothing to
//! prefetch.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a fetchable resource. Used as the cache lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(String);

impl ResourceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ResourceKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Read-only mapping from route to the resource it depends on.
#[derive(Debug, Clone, Default)]
pub struct RouteResourceMap {
    entries: HashMap<String, ResourceKey>,
}

impl RouteResourceMap {
    pub fn from_entries<I, R, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (R, K)>,
        R: Into<String>,
        K: Into<ResourceKey>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(route, key)| (route.into(), key.into()))
                .collect(),
        }
    }

    /// Exact match only; `None` means "nothing to prefetch for this route".
    pub fn resource_for(&self, route: &str) -> Option<&ResourceKey> {
        self.entries.get(route)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by route, for review and logging.
    pub fn routes(&self) -> Vec<(&str, &ResourceKey)> {
        let mut routes: Vec<_> = self
            .entries
            .iter()
            .map(|(route, key)| (route.as_str(), key))
            .collect();
        routes.sort_by(|a, b| a.0.cmp(b.0));
        routes
    }
}
