//! Named registries: one lazily created cache per string name.

use crate::auto::AutoCache;
use crate::error::{Error, Result};
use crate::key::{CacheKey, CacheValue, MissFactory};
use crate::manual::ManualCache;
use dashmap::DashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Registry of auto-populating caches sharing one capacity and factory.
pub type NamedAutoRegistry<K, V> = NamedRegistry<AutoCache<K, V>>;

/// Registry of manual caches sharing one capacity.
pub type NamedManualRegistry<K, V> = NamedRegistry<ManualCache<K, V>>;

type Provision<S> = Box<dyn Fn() -> S + Send + Sync>;

/// Lazily provisions exactly one store per name.
///
/// The first [`get_store`](Self::get_store) for a name builds the store;
/// every later call, including calls racing the first, gets the same
/// `Arc`. Stores under different names share configuration but nothing
/// else.
///
/// # Example
///
/// ```
/// use lru_store::NamedAutoRegistry;
/// use std::sync::Arc;
///
/// let registry = NamedAutoRegistry::new(4096, |id: &u64| format!("guest-{}", id))?;
///
/// let normal = registry.get_store("NormalPlayerDb")?;
/// let high = registry.get_store("HighLevelPlayerDb")?;
/// assert!(!Arc::ptr_eq(&normal, &high));
/// assert!(Arc::ptr_eq(&normal, &registry.get_store("NormalPlayerDb")?));
/// # Ok::<(), lru_store::Error>(())
/// ```
pub struct NamedRegistry<S> {
    stores: DashMap<String, Arc<S>>,
    provision: Provision<S>,
    capacity: NonZeroUsize,
}

impl<S> NamedRegistry<S> {
    fn with_provision(capacity: NonZeroUsize, provision: Provision<S>) -> Self {
        NamedRegistry {
            stores: DashMap::new(),
            provision,
            capacity,
        }
    }

    /// Return the store registered under `name`, creating it on first use.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `name` is empty or whitespace.
    pub fn get_store(&self, name: &str) -> Result<Arc<S>> {
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "store name cannot be empty or whitespace".to_string(),
            ));
        }

        if let Some(store) = self.stores.get(name) {
            return Ok(Arc::clone(store.value()));
        }

        // The entry guard holds the shard lock, so only one racer builds.
        let store = self
            .stores
            .entry(name.to_string())
            .or_insert_with(|| {
                info!(
                    "✓ Provisioned named store '{}' (capacity: {})",
                    name, self.capacity
                );
                Arc::new((self.provision)())
            })
            .value()
            .clone();

        Ok(store)
    }

    /// Whether a store has been provisioned under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    /// Names of every provisioned store, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.stores.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of provisioned stores.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Capacity given to every store this registry provisions.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

impl<K: CacheKey, V: CacheValue> NamedRegistry<AutoCache<K, V>> {
    /// Create a registry whose stores hold `capacity` entries and fill
    /// misses from `factory`.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `capacity` is zero.
    pub fn new<F>(capacity: usize, factory: F) -> Result<Self>
    where
        F: Fn(&K) -> V + Send + Sync + 'static,
    {
        Self::with_shared_factory(capacity, Arc::new(factory))
    }

    /// Same as [`new`](Self::new) with an already shared factory.
    pub fn with_shared_factory(capacity: usize, factory: MissFactory<K, V>) -> Result<Self> {
        let capacity = validate_capacity(capacity)?;
        debug!("Created auto-populating registry (capacity: {})", capacity);
        Ok(Self::with_provision(
            capacity,
            Box::new(move || AutoCache::from_parts(capacity, Arc::clone(&factory))),
        ))
    }
}

impl<K: CacheKey, V: CacheValue> NamedRegistry<ManualCache<K, V>> {
    /// Create a registry whose stores hold `capacity` entries.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = validate_capacity(capacity)?;
        debug!("Created manual registry (capacity: {})", capacity);
        Ok(Self::with_provision(
            capacity,
            Box::new(move || ManualCache::with_capacity(capacity)),
        ))
    }
}

impl<S> fmt::Debug for NamedRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedRegistry")
            .field("capacity", &self.capacity)
            .field("stores", &self.stores.len())
            .finish()
    }
}

fn validate_capacity(capacity: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(capacity)
        .ok_or_else(|| Error::InvalidArgument("cache capacity must be at least 1".to_string()))
}
