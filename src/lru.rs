//! Bounded least-recently-used cache.
//!
//! Entries live in a slot arena linked into a recency list (least recently
//! used at the head, most recently used at the tail) and are indexed by key
//! through a hash map. Both structures sit behind one mutex per instance, so
//! every splice, append and eviction is a single critical section.

use crate::error::{Error, Result};
use crate::key::{CacheKey, CacheValue};
use crate::stats::CacheStats;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;

/// A node in the recency list.
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// What a write did to the keyspace.
#[derive(Debug, PartialEq, Eq)]
enum SetOutcome<K> {
    Updated,
    Inserted { evicted: Option<K> },
}

/// Index plus recency list. Only ever touched while the instance lock is held.
struct Inner<K, V> {
    map: HashMap<K, usize>,
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    /// Least recently used.
    head: Option<usize>,
    /// Most recently used.
    tail: Option<usize>,
}

impl<K: CacheKey, V: CacheValue> Inner<K, V> {
    fn new(capacity: usize) -> Self {
        // Large capacities are bounds, not expected sizes.
        let prealloc = capacity.min(1024);
        Self {
            map: HashMap::with_capacity(prealloc),
            slots: Vec::with_capacity(prealloc),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn get(&mut self, key: &K) -> Option<V> {
        let idx = *self.map.get(key)?;
        self.touch(idx);
        self.slots[idx].as_ref().map(|n| n.value.clone())
    }

    fn peek(&self, key: &K) -> Option<V> {
        let idx = *self.map.get(key)?;
        self.slots[idx].as_ref().map(|n| n.value.clone())
    }

    fn set(&mut self, key: K, value: V, capacity: usize) -> SetOutcome<K> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = self.slots[idx].as_mut() {
                node.value = value;
            }
            self.touch(idx);
            return SetOutcome::Updated;
        }

        let evicted = if self.map.len() >= capacity {
            self.evict_lru()
        } else {
            None
        };

        let idx = self.allocate(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.attach_back(idx);
        self.map.insert(key, idx);

        SetOutcome::Inserted { evicted }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.detach(idx);
        let node = self.slots[idx].take()?;
        self.free.push(idx);
        Some(node.value)
    }

    fn evict_lru(&mut self) -> Option<K> {
        let idx = self.head?;
        self.detach(idx);
        let node = self.slots[idx].take()?;
        self.map.remove(&node.key);
        self.free.push(idx);
        Some(node.key)
    }

    fn clear(&mut self) {
        self.map.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    fn allocate(&mut self, node: Node<K, V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Move a live node to the most recently used end.
    fn touch(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return;
        }
        self.detach(idx);
        self.attach_back(idx);
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_ref() {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.slots[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(node) = self.slots[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = old_tail;
            node.next = None;
        }

        match old_tail {
            Some(t) => {
                if let Some(node) = self.slots[t].as_mut() {
                    node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }

        self.tail = Some(idx);
    }

    /// Walk the recency list from least to most recently used.
    fn iter(&self) -> impl Iterator<Item = &Node<K, V>> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.slots[cursor?].as_ref()?;
            cursor = node.next;
            Some(node)
        })
    }
}

/// Thread-safe cache holding at most `capacity` entries.
///
/// When an insert would push the entry count past capacity, the single least
/// recently used entry is evicted first. Both reads and writes count as a
/// use. All methods take `&self`; share the cache across threads with `Arc`.
///
/// # Example
///
/// ```
/// use lru_store::LruCache;
///
/// let cache = LruCache::new(2)?;
/// cache.set("a", 1);
/// cache.set("b", 2);
/// assert_eq!(cache.get(&"a"), Some(1));
///
/// cache.set("c", 3); // evicts "b", "a" was just read
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.len(), 2);
/// # Ok::<(), lru_store::Error>(())
/// ```
pub struct LruCache<K, V> {
    capacity: NonZeroUsize,
    inner: Mutex<Inner<K, V>>,
    stats: CacheStats,
}

impl<K: CacheKey, V: CacheValue> LruCache<K, V> {
    /// Create a cache bounded to `capacity` entries.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            Error::InvalidArgument("cache capacity must be at least 1".to_string())
        })?;
        Ok(Self::with_capacity(capacity))
    }

    /// Create a cache from an already validated capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        debug!("Created LRU cache (capacity: {})", capacity);
        LruCache {
            capacity,
            inner: Mutex::new(Inner::new(capacity.get())),
            stats: CacheStats::new(),
        }
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.inner.lock().get(key);
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Look up `key` without touching its recency.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.lock().peek(key)
    }

    /// Whether `key` is live. Does not touch recency.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().map.contains_key(key)
    }

    /// Insert or overwrite `key`, marking it most recently used.
    ///
    /// Overwriting never changes [`len`](Self::len). A fresh insert into a
    /// full cache evicts exactly one entry: the least recently used.
    pub fn set(&self, key: K, value: V) {
        let outcome = self.inner.lock().set(key, value, self.capacity.get());
        match outcome {
            SetOutcome::Updated => self.stats.record_update(),
            SetOutcome::Inserted { evicted } => {
                self.stats.record_insert();
                if evicted.is_some() {
                    self.stats.record_eviction();
                    trace!(
                        "Evicted least recently used entry (capacity: {})",
                        self.capacity
                    );
                }
            }
        }
    }

    /// Remove `key`, returning its value if it was live.
    ///
    /// Removing an absent key is a no-op.
    pub fn remove(&self, key: &K) -> Option<V> {
        let removed = self.inner.lock().remove(key);
        if removed.is_some() {
            self.stats.record_removal();
            trace!("Removed cache entry");
        }
        removed
    }

    /// Copy every live value.
    ///
    /// The lock is held only while copying; the returned `Vec` is detached
    /// from the cache. Values come out least recently used first, but callers
    /// should not rely on any order.
    pub fn snapshot(&self) -> Vec<V> {
        let inner = self.inner.lock();
        let mut values = Vec::with_capacity(inner.len());
        values.extend(inner.iter().map(|n| n.value.clone()));
        values
    }

    /// Copy every live key-value pair. See [`snapshot`](Self::snapshot).
    pub fn snapshot_with_keys(&self) -> Vec<(K, V)> {
        let inner = self.inner.lock();
        let mut entries = Vec::with_capacity(inner.len());
        entries.extend(inner.iter().map(|n| (n.key.clone(), n.value.clone())));
        entries
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of live entries.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Drop every entry. Counters are left alone.
    pub fn clear(&self) {
        self.inner.lock().clear();
        debug!("Cleared LRU cache (capacity: {})", self.capacity);
    }

    /// Operation counters for this instance.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Return the cached value for `key`, or build it with `factory` and
    /// store it.
    ///
    /// The factory runs outside the lock. Two threads missing on the same
    /// key may both run it; whichever write lands last stays cached, and
    /// each caller gets the value its own factory produced.
    pub(crate) fn get_or_insert_with<F>(&self, key: &K, factory: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }

        self.stats.record_factory_call();
        let value = factory(key);
        self.set(key.clone(), value.clone());
        value
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.inner.lock().map.len())
            .finish()
    }
}
