//! Load-on-miss cache with a factory fixed at construction.

use crate::error::{Error, Result};
use crate::key::{CacheKey, CacheValue, MissFactory};
use crate::lru::LruCache;
use crate::stats::CacheStats;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// LRU cache that fills misses from a configured factory.
///
/// # Example
///
/// ```
/// use lru_store::AutoCache;
///
/// let players = AutoCache::new(1024, |id: &u64| format!("player-{}", id))?;
///
/// assert_eq!(players.get_or_add(&7), "player-7");
/// players.set(7, "renamed".to_string());
/// assert_eq!(players.get_or_add(&7), "renamed");
/// # Ok::<(), lru_store::Error>(())
/// ```
pub struct AutoCache<K, V> {
    cache: LruCache<K, V>,
    factory: MissFactory<K, V>,
}

impl<K: CacheKey, V: CacheValue> AutoCache<K, V> {
    /// Create a cache of `capacity` entries filled by `factory` on a miss.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `capacity` is zero.
    pub fn new<F>(capacity: usize, factory: F) -> Result<Self>
    where
        F: Fn(&K) -> V + Send + Sync + 'static,
    {
        Self::builder().capacity(capacity).factory(factory).build()
    }

    /// Start a fluent builder.
    ///
    /// ```
    /// use lru_store::AutoCache;
    ///
    /// let cache = AutoCache::builder()
    ///     .capacity(16)
    ///     .factory(|k: &u32| k * 10)
    ///     .build()?;
    /// assert_eq!(cache.get_or_add(&4), 40);
    /// # Ok::<(), lru_store::Error>(())
    /// ```
    pub fn builder() -> AutoCacheBuilder<K, V> {
        AutoCacheBuilder::new()
    }

    pub(crate) fn from_parts(capacity: NonZeroUsize, factory: MissFactory<K, V>) -> Self {
        AutoCache {
            cache: LruCache::with_capacity(capacity),
            factory,
        }
    }

    /// Return the value for `key`, running the factory if it is absent.
    ///
    /// Concurrent misses on one key are not deduplicated: each may run the
    /// factory, and the last write to land is the one left cached.
    pub fn get_or_add(&self, key: &K) -> V {
        self.cache.get_or_insert_with(key, |k| (self.factory)(k))
    }

    /// Look up `key` without running the factory.
    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.get(key)
    }

    /// Insert or overwrite `key` regardless of presence.
    pub fn set(&self, key: K, value: V) {
        self.cache.set(key, value);
    }

    /// Remove `key` if present.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.cache.remove(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.cache.contains_key(key)
    }

    /// Copy every live value.
    pub fn snapshot(&self) -> Vec<V> {
        self.cache.snapshot()
    }

    /// Copy every live key-value pair.
    pub fn snapshot_with_keys(&self) -> Vec<(K, V)> {
        self.cache.snapshot_with_keys()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    /// The underlying bounded cache.
    pub fn as_lru(&self) -> &LruCache<K, V> {
        &self.cache
    }
}

impl<K, V> fmt::Debug for AutoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoCache")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for [`AutoCache`].
///
/// Capacity defaults to 1024. The factory has no default; building without
/// one fails.
pub struct AutoCacheBuilder<K, V> {
    capacity: usize,
    factory: Option<MissFactory<K, V>>,
}

impl<K: CacheKey, V: CacheValue> AutoCacheBuilder<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            capacity: crate::config::DEFAULT_CAPACITY,
            factory: None,
        }
    }

    /// Set the maximum number of live entries.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the miss factory.
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&K) -> V + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Set an already shared miss factory.
    pub fn shared_factory(mut self, factory: MissFactory<K, V>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Build the cache.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if capacity is zero or no factory
    /// was supplied.
    pub fn build(self) -> Result<AutoCache<K, V>> {
        let capacity = NonZeroUsize::new(self.capacity).ok_or_else(|| {
            Error::InvalidArgument("cache capacity must be at least 1".to_string())
        })?;
        let factory = self.factory.ok_or_else(|| {
            Error::InvalidArgument("auto-populating cache requires a miss factory".to_string())
        })?;

        Ok(AutoCache::from_parts(capacity, factory))
    }
}
