//! # lru-store
//!
//! Thread-safe, capacity-bounded in-process caches with strict
//! least-recently-used eviction, plus registries that hand out one
//! independent cache per string name.
//!
//! ## Caches
//!
//! - [`LruCache`]: the bounded cache itself (`get`, `set`, `remove`, snapshots)
//! - [`AutoCache`]: fills misses from a factory fixed at construction
//! - [`ManualCache`]: fills misses from a factory passed to each call
//!
//! ## Registries
//!
//! - [`NamedAutoRegistry`] / [`NamedManualRegistry`]: lazily create exactly
//!   one cache per name, all sharing one capacity (and factory)
//!
//! ## Quick Start
//!
//! ```
//! use lru_store::{NamedAutoRegistry, StoreConfig};
//!
//! #[derive(Clone)]
//! struct Player {
//!     id: u64,
//!     nick_name: String,
//! }
//!
//! let registry: NamedAutoRegistry<u64, Player> = StoreConfig::new(4096)
//!     .named_auto(|id: &u64| Player {
//!         id: *id,
//!         nick_name: format!("Anonymous {}", id),
//!     })?;
//!
//! let normal = registry.get_store("NormalPlayerDb")?;
//! let player = normal.get_or_add(&42);
//! assert_eq!(player.nick_name, "Anonymous 42");
//! # Ok::<(), lru_store::Error>(())
//! ```

#[macro_use]
extern crate log;

pub mod auto;
pub mod config;
pub mod error;
#[cfg(feature = "uuid")]
pub mod guid;
pub mod key;
pub mod lru;
pub mod manual;
pub mod registry;
pub mod stats;

// Re-exports for convenience
pub use auto::{AutoCache, AutoCacheBuilder};
pub use config::StoreConfig;
pub use error::{Error, Result};
#[cfg(feature = "uuid")]
pub use guid::{GuidCache, GuidRegistry};
pub use key::{miss_factory, CacheKey, CacheValue, MissFactory};
pub use lru::LruCache;
pub use manual::ManualCache;
pub use registry::{NamedAutoRegistry, NamedManualRegistry, NamedRegistry};
pub use stats::{CacheStats, StatsSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
