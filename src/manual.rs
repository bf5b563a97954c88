//! LRU cache whose miss handling is supplied per call.

use crate::error::Result;
use crate::key::{CacheKey, CacheValue};
use crate::lru::LruCache;
use crate::stats::CacheStats;
use std::fmt;
use std::num::NonZeroUsize;

/// LRU cache where each `get_or_add` call brings its own factory.
///
/// Different call sites can fill the same cache with different logic.
///
/// # Example
///
/// ```
/// use lru_store::ManualCache;
///
/// let cache = ManualCache::new(128)?;
/// let greeting = cache.get_or_add(&"en", |_| "hello".to_string());
/// assert_eq!(greeting, "hello");
///
/// // Present now, so the second factory never runs.
/// let again = cache.get_or_add(&"en", |_| "ignored".to_string());
/// assert_eq!(again, "hello");
/// # Ok::<(), lru_store::Error>(())
/// ```
pub struct ManualCache<K, V> {
    cache: LruCache<K, V>,
}

impl<K: CacheKey, V: CacheValue> ManualCache<K, V> {
    /// Create a cache bounded to `capacity` entries.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(ManualCache {
            cache: LruCache::new(capacity)?,
        })
    }

    pub(crate) fn with_capacity(capacity: NonZeroUsize) -> Self {
        ManualCache {
            cache: LruCache::with_capacity(capacity),
        }
    }

    /// Return the value for `key`, running `factory` if it is absent.
    ///
    /// Same relaxed semantics as [`AutoCache::get_or_add`](crate::AutoCache::get_or_add).
    pub fn get_or_add<F>(&self, key: &K, factory: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        self.cache.get_or_insert_with(key, factory)
    }

    /// Insert or overwrite `key`. Same as [`set`](Self::set).
    pub fn add_to_cache(&self, key: K, value: V) {
        self.cache.set(key, value);
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.get(key)
    }

    pub fn set(&self, key: K, value: V) {
        self.cache.set(key, value);
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.cache.remove(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.cache.contains_key(key)
    }

    pub fn snapshot(&self) -> Vec<V> {
        self.cache.snapshot()
    }

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

    pub fn as_lru(&self) -> &LruCache<K, V> {
        &self.cache
    }
}

impl<K, V> fmt::Debug for ManualCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualCache")
            .field("cache", &self.cache)
            .finish()
    }
}
