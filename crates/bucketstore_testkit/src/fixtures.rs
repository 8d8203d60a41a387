//! Test fixtures and store helpers.
//!
//! Builds the canonical scenario stores so tests across crates start from
//! the same state.

use bucketstore_core::{BucketedStore, StoreConfig};
use std::hash::Hash;

/// Creates an empty store with the given segment capacity.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn store_with_capacity<K, V>(capacity: usize) -> BucketedStore<K, V> {
    BucketedStore::with_config(StoreConfig::new().capacity(capacity).preallocate(false))
        .expect("Failed to build store")
}

/// Creates a store with capacity `capacity` holding keys `0..count`,
/// each mapped to `key * 10`.
pub fn filled_store(capacity: usize, count: u64) -> BucketedStore<u64, u64> {
    let mut store = store_with_capacity(capacity);
    store.extend((0..count).map(|key| (key, key * 10)));
    store
}

/// Capacity 3 with keys `1..=7` mapped to `"v1".."v7"`.
///
/// Two sealed segments `{1,2,3}` and `{4,5,6}`, staging `{7}`.
pub fn seven_keys_store() -> BucketedStore<u32, String> {
    let mut store = store_with_capacity(3);
    for key in 1..=7u32 {
        store.add(key, format!("v{key}"));
    }
    store
}

/// The two-store merge scenario at capacity 3.
///
/// Returns `(a, b)`: `a` holds keys `1..=4` (one sealed segment, staging
/// `{4}`), `b` holds keys `10` and `11` in staging.
pub fn absorb_pair() -> (BucketedStore<u32, String>, BucketedStore<u32, String>) {
    let mut a = store_with_capacity(3);
    for key in 1..=4u32 {
        a.add(key, format!("v{key}"));
    }

    let mut b = store_with_capacity(3);
    for key in 10..=11u32 {
        b.add(key, format!("v{key}"));
    }

    (a, b)
}

/// Runs `f` against a fresh store of the given capacity.
///
/// # Example
///
/// ```rust
/// use bucketstore_testkit::with_store;
///
/// with_store::<u32, u32, _>(4, |store| {
///     store.add(1, 1);
///     assert!(store.contains(&1));
/// });
/// ```
pub fn with_store<K, V, F>(capacity: usize, f: F)
where
    K: Eq + Hash,
    F: FnOnce(&mut BucketedStore<K, V>),
{
    let mut store = store_with_capacity(capacity);
    f(&mut store);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketstore_core::BucketId;

    #[test]
    fn seven_keys_layout() {
        let store = seven_keys_store();

        assert_eq!(store.bucket_count(), Some(BucketId::new(1)));
        assert_eq!(store.staging_len(), 1);
        assert_eq!(store.size(), 7);
    }

    #[test]
    fn absorb_pair_layout() {
        let (a, b) = absorb_pair();

        assert_eq!(a.sealed_count(), 1);
        assert_eq!(a.staging_len(), 1);
        assert_eq!(b.sealed_count(), 0);
        assert_eq!(b.staging_len(), 2);
    }

    #[test]
    fn filled_store_contents() {
        let store = filled_store(10, 25);

        assert_eq!(store.size(), 25);
        assert_eq!(store.get(&24), Some(&240));
    }
}
