//! Named registry example: independent stores per name, shared across threads.

use lru_store::{error::Result, StoreConfig};
use std::sync::Arc;
use std::thread;

#[derive(Clone, Debug)]
struct Player {
    id: u64,
    nick_name: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init()
        .ok();

    println!("\n=== LRU Store - Named Stores Example ===\n");

    // Capacity comes from LRU_STORE_CAPACITY when set, 1024 otherwise.
    let config = StoreConfig::from_env().with_hot_cache_size(128);
    println!("Config: {:?}", config);

    let registry = Arc::new(config.named_auto(|id: &u64| Player {
        id: *id,
        nick_name: format!("Anonymous {}", id),
    })?);

    let handles: Vec<_> = ["NormalPlayerDb", "HighLevelPlayerDb", "NormalPlayerDb"]
        .into_iter()
        .enumerate()
        .map(|(worker, name)| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || -> Result<()> {
                let store = registry.get_store(name)?;
                for id in 0..10u64 {
                    store.get_or_add(&(worker as u64 * 100 + id));
                }
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        if let Ok(result) = handle.join() {
            result?;
        }
    }

    let mut names = registry.names();
    names.sort();
    for name in names {
        let store = registry.get_store(&name)?;
        println!("   {}: {} players", name, store.len());
    }

    match registry.get_store("   ") {
        Err(e) => println!("\nBlank name rejected: {}", e),
        Ok(_) => println!("\nBlank name unexpectedly accepted"),
    }

    println!("\n=== Example Complete ===\n");
    Ok(())
}
