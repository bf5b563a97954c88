//! Store configuration and host provisioning.
//!
//! A host builds one [`StoreConfig`] (from code, JSON or the environment)
//! and asks it for a shared cache or a named registry. Identical
//! configurations produce interchangeable instances.

use crate::auto::AutoCache;
use crate::error::{Error, Result};
use crate::key::{CacheKey, CacheValue};
use crate::manual::ManualCache;
use crate::registry::{NamedAutoRegistry, NamedManualRegistry};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Environment variable overriding the capacity.
pub const CAPACITY_ENV: &str = "LRU_STORE_CAPACITY";

/// Environment variable carrying the hot-cache-size hint.
pub const HOT_CACHE_SIZE_ENV: &str = "LRU_STORE_HOT_CACHE_SIZE";

/// Capacity and hints shared by every cache built from one configuration.
///
/// # Example
///
/// ```
/// use lru_store::StoreConfig;
///
/// let config = StoreConfig::from_json(r#"{ "capacity": 4096, "hot_cache_size": 128 }"#)?;
/// let registry = config.named_auto(|id: &u64| id.to_string())?;
///
/// let store = registry.get_store("NormalPlayerDb")?;
/// assert_eq!(store.capacity(), 4096);
/// # Ok::<(), lru_store::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum live entries per cache instance.
    pub capacity: usize,

    /// Size hint for a hot tier. Accepted and carried, but no cache
    /// consults it.
    pub hot_cache_size: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            capacity: DEFAULT_CAPACITY,
            hot_cache_size: None,
        }
    }
}

impl StoreConfig {
    /// Configuration with the given capacity and no hint.
    pub fn new(capacity: usize) -> Self {
        StoreConfig {
            capacity,
            ..Default::default()
        }
    }

    /// Set the hot-cache-size hint.
    pub fn with_hot_cache_size(mut self, size: usize) -> Self {
        self.hot_cache_size = Some(size);
        self
    }

    /// Parse a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `Error::ConfigError` if the document does not parse.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from `LRU_STORE_CAPACITY` and `LRU_STORE_HOT_CACHE_SIZE`.
    ///
    /// Unset variables take their defaults; unparsable ones fall back to
    /// the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        StoreConfig {
            capacity: env_or(CAPACITY_ENV, defaults.capacity),
            hot_cache_size: env_var(HOT_CACHE_SIZE_ENV).or(defaults.hot_cache_size),
        }
    }

    /// Check the configuration can build a cache.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if capacity is zero.
    pub fn validate(&self) -> Result<()> {
        if self.capacity < 1 {
            return Err(Error::InvalidArgument(
                "cache capacity must be at least 1".to_string(),
            ));
        }
        if let Some(hint) = self.hot_cache_size {
            debug!("Hot cache size hint {} accepted (unused)", hint);
        }
        Ok(())
    }

    /// Build a single shared auto-populating cache.
    pub fn auto_cache<K, V, F>(&self, factory: F) -> Result<AutoCache<K, V>>
    where
        K: CacheKey,
        V: CacheValue,
        F: Fn(&K) -> V + Send + Sync + 'static,
    {
        self.validate()?;
        AutoCache::new(self.capacity, factory)
    }

    /// Build a single shared manual cache.
    pub fn manual_cache<K: CacheKey, V: CacheValue>(&self) -> Result<ManualCache<K, V>> {
        self.validate()?;
        ManualCache::new(self.capacity)
    }

    /// Build a registry of auto-populating caches.
    pub fn named_auto<K, V, F>(&self, factory: F) -> Result<NamedAutoRegistry<K, V>>
    where
        K: CacheKey,
        V: CacheValue,
        F: Fn(&K) -> V + Send + Sync + 'static,
    {
        self.validate()?;
        NamedAutoRegistry::new(self.capacity, factory)
    }

    /// Build a registry of manual caches.
    pub fn named_manual<K: CacheKey, V: CacheValue>(&self) -> Result<NamedManualRegistry<K, V>> {
        self.validate()?;
        NamedManualRegistry::new(self.capacity)
    }
}

fn env_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("⚠ Ignoring unparsable {}={:?}", name, raw);
            None
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env_var(name).unwrap_or(default)
}
