//! Basic usage example: one shared auto-populating cache.

use lru_store::{error::Result, AutoCache, ManualCache};

#[derive(Clone, Debug)]
struct Player {
    id: u64,
    nick_name: String,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .try_init()
        .ok();

    println!("\n=== LRU Store - Basic Example ===\n");

    // 1. Auto-populating cache: the factory runs on a miss
    println!("1. Creating auto-populating player cache (capacity 3)...");
    let players = AutoCache::new(3, |id: &u64| {
        println!("  [FACTORY] Building player {}", id);
        Player {
            id: *id,
            nick_name: format!("Anonymous {}", id),
        }
    })?;

    for id in [1, 2, 3] {
        let player = players.get_or_add(&id);
        println!("   ✓ Loaded {:?}", player);
    }

    // 2. Reads refresh recency
    println!("\n2. Reading player 1 again (cache hit, no factory call):");
    let player = players.get_or_add(&1);
    println!("   ✓ {:?}", player);

    // 3. Inserting a fourth player evicts the least recently used (2)
    println!("\n3. Loading player 4 evicts player 2:");
    players.get_or_add(&4);
    println!("   player 2 cached: {}", players.contains_key(&2));

    // 4. Writes always overwrite
    println!("\n4. Renaming player 1:");
    players.set(
        1,
        Player {
            id: 1,
            nick_name: "Champion".to_string(),
        },
    );
    println!("   ✓ {:?}", players.get(&1));

    // 5. Manual cache: each call site brings its own factory
    println!("\n5. Manual cache with per-call factories:");
    let titles: ManualCache<u64, String> = ManualCache::new(16)?;
    let title = titles.get_or_add(&1, |id| format!("Rookie #{}", id));
    println!("   ✓ {}", title);
    titles.add_to_cache(2, "Veteran".to_string());
    println!("   ✓ snapshot: {:?}", titles.snapshot_with_keys());

    println!("\nStats: {:?}", players.stats().snapshot());
    println!("\n=== Example Complete ===\n");
    Ok(())
}
