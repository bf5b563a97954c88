//! Guid-keyed aliases, for hosts that address entries by `Uuid`.

use crate::auto::AutoCache;
use crate::registry::NamedAutoRegistry;
use uuid::Uuid;

/// Auto-populating cache keyed by `Uuid`.
pub type GuidCache<V> = AutoCache<Uuid, V>;

/// Named registry of [`GuidCache`]s.
pub type GuidRegistry<V> = NamedAutoRegistry<Uuid, V>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Player {
        id: Uuid,
        nick_name: String,
    }

    #[test]
    fn test_guid_registry() {
        let registry: GuidRegistry<Player> = GuidRegistry::new(3, |id: &Uuid| Player {
            id: *id,
            nick_name: "TestPlayer".to_string(),
        })
        .expect("Failed to create registry");

        let store = registry.get_store("players").expect("Failed to get store");
        let id = Uuid::now_v7();
        let player = store.get_or_add(&id);

        assert_eq!(player.id, id);
        assert_eq!(player.nick_name, "TestPlayer");
    }

    #[test]
    fn test_guid_cache_eviction() {
        let cache: GuidCache<u8> = GuidCache::new(2, |_| 0).expect("Failed to create cache");
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            cache.get_or_add(id);
        }

        assert!(!cache.contains_key(&ids[0]));
        assert!(cache.contains_key(&ids[1]));
        assert!(cache.contains_key(&ids[2]));
    }
}
