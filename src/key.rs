//! Bounds shared by every cache key and value.

use std::hash::Hash;
use std::sync::Arc;

/// Trait that every cache key satisfies.
///
/// Blanket-implemented, so any `Eq + Hash + Clone` type that can cross
/// threads works as a key:
///
/// ```
/// use lru_store::CacheKey;
///
/// fn assert_key<K: CacheKey>() {}
/// assert_key::<String>();
/// assert_key::<(u32, &'static str)>();
/// ```
pub trait CacheKey: Eq + Hash + Clone + Send + Sync + 'static {}

impl<T> CacheKey for T where T: Eq + Hash + Clone + Send + Sync + 'static {}

/// Trait that every cached value satisfies.
///
/// Reads return a clone of the stored value. Wrap large values in `Arc<T>`
/// to make that clone a reference-count bump.
pub trait CacheValue: Clone + Send + Sync + 'static {}

impl<T> CacheValue for T where T: Clone + Send + Sync + 'static {}

/// Factory invoked on a miss to produce the value for an absent key.
///
/// Shared by reference count so a registry can hand the same factory to
/// every store it provisions.
pub type MissFactory<K, V> = Arc<dyn Fn(&K) -> V + Send + Sync>;

/// Wrap a closure as a [`MissFactory`].
pub fn miss_factory<K, V, F>(f: F) -> MissFactory<K, V>
where
    F: Fn(&K) -> V + Send + Sync + 'static,
{
    Arc::new(f)
}
