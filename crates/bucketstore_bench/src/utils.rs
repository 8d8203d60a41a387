//! Benchmark utilities.

use bucketstore_core::{BucketedStore, StoreConfig};
use rand::Rng;

/// Generate `count` random 64-bit keys.
pub fn random_keys(count: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}

/// Build a store of the given capacity holding every key mapped to itself.
pub fn build_store(capacity: usize, keys: &[u64]) -> BucketedStore<u64, u64> {
    let config = StoreConfig::new().capacity(capacity);
    let mut store = match BucketedStore::with_config(config) {
        Ok(store) => store,
        Err(err) => panic!("benchmark capacity {capacity} rejected: {err}"),
    };
    store.extend(keys.iter().map(|&key| (key, key)));
    store
}
