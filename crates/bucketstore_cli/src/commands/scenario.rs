//! Scenario command implementation.

use bucketstore_core::{BucketedStore, Location, StoreConfig};
use std::fmt::Display;
use tracing::info;

/// Formats the store as one line per segment, in scan order.
fn layout<K, V>(store: &BucketedStore<K, V>) -> Vec<String>
where
    K: Display,
    V: Display,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<Location> = None;

    for (location, key, value) in store.iter_located() {
        if current != Some(location) {
            let label = match location {
                Location::Sealed(id) => id.to_string(),
                Location::Staging => "staging".to_string(),
            };
            lines.push(format!("{label}:"));
            current = Some(location);
        }
        if let Some(line) = lines.last_mut() {
            line.push_str(&format!(" {key}={value}"));
        }
    }

    lines
}

/// Runs the scenario command.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::new().capacity(3);

    let mut walk = BucketedStore::with_config(config.clone())?;
    for key in 1..=7u32 {
        walk.add(key, format!("v{key}"));
    }

    info!("Added keys 1..=7 at capacity 3");
    for line in layout(&walk) {
        println!("{line}");
    }
    println!("size={}", walk.size());

    let mut a = BucketedStore::with_config(config.clone())?;
    a.extend((1..=4u32).map(|key| (key, format!("v{key}"))));
    let mut b = BucketedStore::with_config(config)?;
    b.extend((10..=11u32).map(|key| (key, format!("v{key}"))));

    b.absorb(&mut a);

    info!("Absorbed store A (keys 1..=4) into store B (keys 10, 11)");
    for line in layout(&b) {
        println!("{line}");
    }
    println!("size={} source_empty={}", b.size(), a.is_empty());

    Ok(())
}
