//! Prefetch configuration.
//!
//! Holds the route table, the common-on-load resource list and the two
//! staleness budgets. Built-in defaults cover the product routes; an optional
//! JSON file at `~/.config/prewarm/prefetch.json` overrides any field.
//!
//! The configuration is read once at startup and turned into the immutable
//! tables the triggers share. There is no runtime mutation path.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bulk::CommonResources;
use crate::error::ConfigError;
use crate::policy::{
    StalenessBudget, StalenessPolicy, DEFAULT_BULK_STALE_SECS, DEFAULT_REACTIVE_STALE_SECS,
};
use crate::routes::{ResourceKey, RouteResourceMap};

/// Application name used for the config directory path
const APP_NAME: &str = "prewarm";

/// Config file name
const CONFIG_FILE: &str = "prefetch.json";

/// Route table shipped with the app. Keep in sync with the router.
const DEFAULT_ROUTES: &[(&str, &str)] = &[
    ("/", "games"),
    ("/standings", "standings"),
    ("/teams", "teams"),
    ("/schedule", "schedule"),
];

/// Resources nearly every session needs right after load.
const DEFAULT_COMMON: &[&str] = &["games", "standings", "teams"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(default)]
pub struct PrefetchConfig {
    pub routes: BTreeMap<String, String>,
    pub common: Vec<String>,
    pub bulk_stale_secs: u64,
    pub reactive_stale_secs: u64,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            routes: DEFAULT_ROUTES
                .iter()
                .map(|(route, key)| (route.to_string(), key.to_string()))
                .collect(),
            common: DEFAULT_COMMON.iter().map(|key| key.to_string()).collect(),
            bulk_stale_secs: DEFAULT_BULK_STALE_SECS,
            reactive_stale_secs: DEFAULT_REACTIVE_STALE_SECS,
        }
    }
}

impl PrefetchConfig {
    /// Load from the user config directory, falling back to defaults.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "No prefetch config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prefetch config: {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse prefetch config: {}", path.display()))
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (route, key) in &self.routes {
            if route.is_empty() {
                return Err(ConfigError::EmptyRoute);
            }
            if key.is_empty() {
                return Err(ConfigError::EmptyResourceKey(route.clone()));
            }
        }

        let mut seen = HashSet::new();
        for key in &self.common {
            if key.is_empty() {
                return Err(ConfigError::EmptyCommonKey);
            }
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::DuplicateCommonKey(key.clone()));
            }
        }

        if self.bulk_stale_secs == 0 {
            return Err(ConfigError::ZeroBudget("bulk"));
        }
        if self.reactive_stale_secs == 0 {
            return Err(ConfigError::ZeroBudget("reactive"));
        }
        if self.reactive_stale_secs > self.bulk_stale_secs {
            return Err(ConfigError::ReactiveExceedsBulk {
                reactive: self.reactive_stale_secs,
                bulk: self.bulk_stale_secs,
            });
        }

        Ok(())
    }

    pub fn route_map(&self) -> Arc<RouteResourceMap> {
        Arc::new(RouteResourceMap::from_entries(
            self.routes
                .iter()
                .map(|(route, key)| (route.clone(), ResourceKey::new(key.clone()))),
        ))
    }

    pub fn common_resources(&self) -> Arc<CommonResources> {
        Arc::new(CommonResources::new(
            self.common.iter().map(|key| ResourceKey::new(key.clone())).collect(),
        ))
    }

    pub fn staleness_policy(&self) -> Arc<StalenessPolicy> {
        Arc::new(StalenessPolicy::new(
            StalenessBudget::from_secs(self.bulk_stale_secs),
            StalenessBudget::from_secs(self.reactive_stale_secs),
        ))
    }
}
