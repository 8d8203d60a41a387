//! The bucketed store.

use crate::basket::Basket;
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::segment::Segment;
use crate::stats::StoreStats;
use crate::types::{BucketId, Location};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// An in-memory key-value store made of fixed-capacity segments.
///
/// Entries are written to a staging segment. When it holds `capacity`
/// entries it is sealed into the basket under the next [`BucketId`] and a
/// new staging segment starts. No single map ever grows past `capacity`.
///
/// # Lookup order
///
/// Lookups scan sealed segments from the oldest id to the newest and then
/// the staging segment; the first hit wins. Keys are expected to be
/// unique across the store. `add` does not check sealed segments, so
/// re-adding a sealed key creates a shadowed copy in staging and `get`
/// keeps returning the sealed value.
///
/// # Example
///
/// ```rust
/// use bucketstore_core::{BucketedStore, StoreConfig};
///
/// let config = StoreConfig::new().capacity(2);
/// let mut a = BucketedStore::with_config(config.clone()).unwrap();
/// let mut b = BucketedStore::with_config(config).unwrap();
///
/// a.extend([(1, "one"), (2, "two"), (3, "three")]);
/// b.add(10, "ten");
///
/// b.absorb(&mut a);
///
/// assert!(a.is_empty());
/// assert_eq!(b.size(), 4);
/// assert_eq!(b.get(&2), Some(&"two"));
/// ```
pub struct BucketedStore<K, V> {
    config: StoreConfig,
    basket: Basket<K, V>,
    staging: Segment<K, V>,
    stats: StoreStats,
}

impl<K, V> BucketedStore<K, V> {
    /// Creates an empty store with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(StoreConfig::default())
    }

    /// Creates an empty store with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::InvalidCapacity`] if the configured
    /// capacity is zero.
    pub fn with_config(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: StoreConfig) -> Self {
        let staging = Segment::with_capacity(config.staging_reserve());
        Self {
            config,
            basket: Basket::new(),
            staging,
            stats: StoreStats::new(),
        }
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the fixed segment capacity.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Returns the id of the last sealed segment, or `None` when no
    /// segment is sealed.
    pub fn bucket_count(&self) -> Option<BucketId> {
        self.basket.last()
    }

    /// Returns the number of sealed segments.
    pub fn sealed_count(&self) -> usize {
        self.basket.sealed_len()
    }

    /// Returns the number of entries in the sealed segment `id`.
    pub fn sealed_len(&self, id: BucketId) -> Option<usize> {
        self.basket.segment(id).map(Segment::len)
    }

    /// Returns the number of entries waiting in the staging segment.
    pub fn staging_len(&self) -> usize {
        self.staging.len()
    }

    /// Returns the number of basket slots, including slots wiped by
    /// [`clear`](Self::clear).
    pub fn slot_count(&self) -> usize {
        self.basket.slot_count()
    }

    /// Returns the operation counters.
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Returns the number of entries in the store.
    ///
    /// Computed from the bucket count rather than tracked, so a key added
    /// twice (once sealed, once staged) counts twice.
    pub fn size(&self) -> usize {
        self.basket.sealed_len() * self.config.capacity + self.staging.len()
    }

    /// Alias of [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Returns `true` if nothing is sealed and the staging segment is empty.
    pub fn is_empty(&self) -> bool {
        self.basket.last().is_none() && self.staging.is_empty()
    }

    /// Removes all entries.
    ///
    /// Sealed segments are wiped in place: the basket keeps its slots and
    /// later seals reuse them starting again from id 0.
    pub fn clear(&mut self) {
        trace!(
            sealed = self.basket.sealed_len(),
            slots = self.basket.slot_count(),
            "clearing store"
        );
        self.basket.clear();
        self.staging.clear();
        self.stats.record_clear();
    }

    /// Iterates over all entries in scan order: sealed segments by id,
    /// then staging. Within a segment entries come in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            segments: self
                .basket
                .sealed()
                .iter()
                .chain(std::iter::once(&self.staging)),
            current: Vec::new().into_iter(),
        }
    }

    /// Iterates over all entries in scan order together with the segment
    /// that stores each one.
    ///
    /// Unlike [`locate`](Self::locate) this reports where an entry lives,
    /// so a staged copy of a sealed key is reported as
    /// [`Location::Staging`]. No lookups are counted.
    pub fn iter_located(&self) -> impl Iterator<Item = (Location, &K, &V)> + '_ {
        let sealed = self
            .basket
            .sealed()
            .iter()
            .enumerate()
            .flat_map(|(id, segment)| {
                let location = Location::Sealed(BucketId::new(id));
                segment
                    .ordered()
                    .into_iter()
                    .map(move |(key, value)| (location, key, value))
            });
        let staging = self
            .staging
            .ordered()
            .into_iter()
            .map(|(key, value)| (Location::Staging, key, value));
        sealed.chain(staging)
    }

    /// Moves the staging segment into the basket.
    fn seal_staging(&mut self) {
        let fresh = Segment::with_capacity(self.config.staging_reserve());
        let full = std::mem::replace(&mut self.staging, fresh);
        self.seal_segment(full);
    }

    fn seal_segment(&mut self, segment: Segment<K, V>) {
        let entries = segment.len();
        let id = self.basket.seal(segment);
        self.stats.record_seal();
        debug!(bucket = %id, entries, "sealed segment");
    }

    /// Empties the store and hands back its sealed segments and staging.
    fn take_contents(&mut self) -> (Vec<Segment<K, V>>, Segment<K, V>) {
        let sealed = self.basket.take_sealed();
        let fresh = Segment::with_capacity(self.config.staging_reserve());
        let staging = std::mem::replace(&mut self.staging, fresh);
        (sealed, staging)
    }
}

impl<K, V> BucketedStore<K, V>
where
    K: Eq + Hash,
{
    /// Adds an entry to the staging segment.
    ///
    /// Overwrites the same key only if it is still in staging; sealed
    /// segments are not checked. Seals the staging segment once it holds
    /// `capacity` entries. Returns the staging value that was replaced.
    ///
    /// If an [`absorb`](Self::absorb) left staging holding exactly
    /// `capacity` entries, a new key seals the oldest `capacity` of them
    /// and stays staged on its own.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        self.stats.record_add();
        let previous = self.staging.insert(key, value);
        let capacity = self.config.capacity;
        if self.staging.len() > capacity {
            // Only reachable when an absorb left staging exactly full.
            let front = self
                .staging
                .split_front(capacity, self.config.staging_reserve());
            self.seal_segment(front);
        } else if self.staging.len() == capacity {
            self.seal_staging();
        }
        previous
    }

    /// Returns a reference to the value for `key`.
    ///
    /// Sealed segments are scanned oldest first, then staging.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self
            .basket
            .find(key)
            .map(|(_, value)| value)
            .or_else(|| self.staging.get(key));
        self.stats.record_lookup(found.is_some());
        found
    }

    /// Returns `true` if the store holds `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the segment a lookup for `key` would be answered from.
    pub fn locate<Q>(&self, key: &Q) -> Option<Location>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let location = match self.basket.find(key) {
            Some((id, _)) => Some(Location::Sealed(id)),
            None if self.staging.contains(key) => Some(Location::Staging),
            None => None,
        };
        self.stats.record_lookup(location.is_some());
        location
    }

    /// Folds `other` into this store and leaves `other` empty.
    ///
    /// 1. `other`'s sealed segments are moved over in id order, each under
    ///    the next free id of this store.
    /// 2. `other`'s staging is unioned into this staging; on a shared key
    ///    the incoming value wins.
    /// 3. If the union exceeds `capacity`, its first `capacity` entries in
    ///    insertion order are sealed and the rest stays staged. A union of
    ///    exactly `capacity` entries stays staged until the next `add`.
    ///
    /// Stores with different capacities cannot share sealed segments, so
    /// in that case every entry of `other` is re-added through
    /// [`add`](Self::add) in scan order instead.
    pub fn absorb(&mut self, other: &mut Self) {
        let incoming_size = other.size();
        let (sealed, staging) = other.take_contents();
        let moved = sealed.len();

        if other.config.capacity == self.config.capacity {
            for segment in sealed {
                self.basket.seal(segment);
            }
            self.staging.merge(staging);
            while self.staging.len() > self.config.capacity {
                let front = self
                    .staging
                    .split_front(self.config.capacity, self.config.staging_reserve());
                self.seal_segment(front);
            }
        } else {
            debug!(
                from = other.config.capacity,
                to = self.config.capacity,
                "capacity mismatch, re-adding absorbed entries"
            );
            for segment in sealed.into_iter().chain(std::iter::once(staging)) {
                for (key, value) in segment.into_ordered() {
                    self.add(key, value);
                }
            }
        }

        self.stats.record_absorb();
        debug!(
            entries = incoming_size,
            sealed_segments = moved,
            bucket_count = ?self.basket.last(),
            staging = self.staging.len(),
            "absorbed store"
        );
    }
}

impl<K, V> Default for BucketedStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for BucketedStore<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            basket: self.basket.clone(),
            staging: self.staging.clone(),
            stats: self.stats.clone(),
        }
    }
}

impl<K, V> fmt::Debug for BucketedStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketedStore")
            .field("capacity", &self.config.capacity)
            .field("bucket_count", &self.basket.last())
            .field("staging_len", &self.staging.len())
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for BucketedStore<K, V>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for BucketedStore<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<'a, K, V> IntoIterator for &'a BucketedStore<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`BucketedStore`], in scan order.
pub struct Iter<'a, K, V> {
    segments: std::iter::Chain<
        std::slice::Iter<'a, Segment<K, V>>,
        std::iter::Once<&'a Segment<K, V>>,
    >,
    current: std::vec::IntoIter<(&'a K, &'a V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                return Some(entry);
            }
            self.current = self.segments.next()?.ordered().into_iter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use proptest::prelude::*;

    fn store_with_capacity<K, V>(capacity: usize) -> BucketedStore<K, V> {
        BucketedStore::with_config(StoreConfig::new().capacity(capacity)).unwrap()
    }

    fn sealed_keys(store: &BucketedStore<u32, String>, id: usize) -> Vec<u32> {
        store.basket.sealed()[id]
            .ordered()
            .into_iter()
            .map(|(k, _)| *k)
            .collect()
    }

    fn staging_keys(store: &BucketedStore<u32, String>) -> Vec<u32> {
        store
            .staging
            .ordered()
            .into_iter()
            .map(|(k, _)| *k)
            .collect()
    }

    #[test]
    fn new_store_is_empty() {
        let store: BucketedStore<u32, u32> = BucketedStore::new();

        assert!(store.is_empty());
        assert_eq!(store.size(), 0);
        assert_eq!(store.bucket_count(), None);
        assert_eq!(store.capacity(), 75_000);
    }

    #[test]
    fn zero_capacity_rejected() {
        let result = BucketedStore::<u32, u32>::with_config(StoreConfig::new().capacity(0));
        assert_eq!(
            result.unwrap_err(),
            StoreError::InvalidCapacity { capacity: 0 }
        );
    }

    #[test]
    fn add_then_get() {
        let mut store = store_with_capacity(4);
        store.add("alpha".to_string(), 1);

        assert!(store.contains("alpha"));
        assert_eq!(store.get("alpha"), Some(&1));
        assert_eq!(store.get("beta"), None);
    }

    #[test]
    fn seven_keys_capacity_three() {
        let mut store = store_with_capacity(3);
        for i in 1..=7u32 {
            store.add(i, format!("v{i}"));
        }

        assert_eq!(store.bucket_count(), Some(BucketId::new(1)));
        assert_eq!(sealed_keys(&store, 0), vec![1, 2, 3]);
        assert_eq!(sealed_keys(&store, 1), vec![4, 5, 6]);
        assert_eq!(staging_keys(&store), vec![7]);
        assert_eq!(store.size(), 7);
        assert!(store.contains(&4));
        assert!(!store.contains(&8));
        assert_eq!(store.get(&5).map(String::as_str), Some("v5"));
    }

    #[test]
    fn multiple_of_capacity_leaves_staging_empty() {
        let mut store = store_with_capacity(5);
        for i in 0..20u32 {
            store.add(i, i);
        }

        assert_eq!(store.size(), 20);
        assert_eq!(store.sealed_count(), 4);
        assert_eq!(store.staging_len(), 0);
        for id in 0..4 {
            assert_eq!(store.sealed_len(BucketId::new(id)), Some(5));
        }
    }

    #[test]
    fn overwrite_in_staging() {
        let mut store = store_with_capacity(3);
        store.add(1u32, "a");
        let previous = store.add(1, "b");

        assert_eq!(previous, Some("a"));
        assert_eq!(store.size(), 1);
        assert_eq!(store.get(&1), Some(&"b"));
    }

    #[test]
    fn sealed_key_shadows_staged_duplicate() {
        let mut store = store_with_capacity(2);
        store.add(1u32, "sealed");
        store.add(2, "other");
        let previous = store.add(1, "staged");

        assert_eq!(previous, None);
        assert_eq!(store.size(), 3);
        assert_eq!(store.get(&1), Some(&"sealed"));
        assert_eq!(
            store.locate(&1),
            Some(Location::Sealed(BucketId::new(0)))
        );
    }

    #[test]
    fn not_found_distinct_from_sentinel_value() {
        let mut store = store_with_capacity(3);
        store.add(1u32, "-1".to_string());

        assert_eq!(store.get(&1).map(String::as_str), Some("-1"));
        assert_eq!(store.get(&2), None);
    }

    #[test]
    fn locate_reports_segment() {
        let mut store = store_with_capacity(2);
        store.extend([(1u32, ()), (2, ()), (3, ()), (4, ()), (5, ())]);

        assert_eq!(store.locate(&1), Some(Location::Sealed(BucketId::new(0))));
        assert_eq!(store.locate(&4), Some(Location::Sealed(BucketId::new(1))));
        assert_eq!(store.locate(&5), Some(Location::Staging));
        assert_eq!(store.locate(&6), None);
    }

    #[test]
    fn clear_wipes_but_keeps_slots() {
        let mut store = store_with_capacity(2);
        store.extend((0..5u32).map(|i| (i, i)));
        assert_eq!(store.slot_count(), 2);

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.size(), 0);
        assert_eq!(store.bucket_count(), None);
        assert_eq!(store.slot_count(), 2);
        assert!(!store.contains(&0));
    }

    #[test]
    fn refill_after_clear_reuses_slots() {
        let mut store = store_with_capacity(2);
        store.extend((0..4u32).map(|i| (i, i)));
        store.clear();

        store.extend((10..13u32).map(|i| (i, i)));

        assert_eq!(store.slot_count(), 2);
        assert_eq!(store.bucket_count(), Some(BucketId::new(0)));
        assert_eq!(store.size(), 3);
        assert!(store.contains(&12));
        assert!(!store.contains(&3));
    }

    #[test]
    fn absorb_into_empty() {
        let mut source = store_with_capacity(3);
        source.extend((0..8u32).map(|i| (i, i * 2)));
        let mut target = store_with_capacity(3);

        target.absorb(&mut source);

        assert_eq!(target.size(), 8);
        assert!(source.is_empty());
        assert_eq!(source.size(), 0);
        for i in 0..8u32 {
            assert_eq!(target.get(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn absorb_scenario() {
        let mut a = store_with_capacity(3);
        for i in 1..=4u32 {
            a.add(i, format!("v{i}"));
        }
        let mut b = store_with_capacity(3);
        b.add(10u32, "v10".to_string());
        b.add(11, "v11".to_string());

        b.absorb(&mut a);

        assert_eq!(b.bucket_count(), Some(BucketId::new(0)));
        assert_eq!(sealed_keys(&b, 0), vec![1, 2, 3]);
        assert_eq!(staging_keys(&b), vec![10, 11, 4]);
        assert_eq!(b.size(), 6);
        assert!(a.is_empty());
        assert_eq!(a.bucket_count(), None);
    }

    #[test]
    fn absorb_splits_oversized_staging() {
        let mut a = store_with_capacity(4);
        a.extend((0..3u32).map(|i| (i, format!("a{i}"))));
        let mut b = store_with_capacity(4);
        b.extend((10..13u32).map(|i| (i, format!("b{i}"))));

        b.absorb(&mut a);

        assert_eq!(b.sealed_count(), 1);
        assert_eq!(sealed_keys(&b, 0), vec![10, 11, 12, 0]);
        assert_eq!(staging_keys(&b), vec![1, 2]);
        assert_eq!(b.size(), 6);
    }

    #[test]
    fn absorb_union_of_exactly_capacity_stays_staged() {
        let mut a = store_with_capacity(4);
        a.extend((0..2u32).map(|i| (i, i)));
        let mut b = store_with_capacity(4);
        b.extend((10..12u32).map(|i| (i, i)));

        b.absorb(&mut a);

        assert_eq!(b.sealed_count(), 0);
        assert_eq!(b.staging_len(), 4);
        assert_eq!(b.size(), 4);
    }

    #[test]
    fn add_after_full_absorb_seals_exact_segment() {
        let mut a = store_with_capacity(4);
        a.extend((0..2u32).map(|i| (i, i)));
        let mut b = store_with_capacity(4);
        b.extend((10..12u32).map(|i| (i, i)));
        b.absorb(&mut a);

        b.add(99, 99);

        assert_eq!(b.sealed_count(), 1);
        assert_eq!(b.sealed_len(BucketId::new(0)), Some(4));
        assert_eq!(b.staging_len(), 1);
        assert_eq!(b.locate(&99), Some(Location::Staging));
        assert_eq!(b.locate(&10), Some(Location::Sealed(BucketId::new(0))));
        assert_eq!(b.size(), 5);
    }

    #[test]
    fn overwrite_after_full_absorb_keeps_staging() {
        let mut a = store_with_capacity(4);
        a.extend((0..2u32).map(|i| (i, i)));
        let mut b = store_with_capacity(4);
        b.extend((10..12u32).map(|i| (i, i)));
        b.absorb(&mut a);

        let previous = b.add(10, 1000);

        assert_eq!(previous, Some(10));
        assert_eq!(b.sealed_count(), 1);
        assert_eq!(b.staging_len(), 0);
        assert_eq!(b.get(&10), Some(&1000));
    }

    #[test]
    fn absorb_incoming_wins_in_staging() {
        let mut a = store_with_capacity(5);
        a.add(7u32, "incoming".to_string());
        let mut b = store_with_capacity(5);
        b.add(7u32, "local".to_string());

        b.absorb(&mut a);

        assert_eq!(b.get(&7).map(String::as_str), Some("incoming"));
        assert_eq!(b.size(), 1);
    }

    #[test]
    fn absorb_continues_bucket_ids() {
        let mut a = store_with_capacity(2);
        a.extend((0..4u32).map(|i| (i, i)));
        let mut b = store_with_capacity(2);
        b.extend((10..12u32).map(|i| (i, i)));

        b.absorb(&mut a);

        assert_eq!(b.bucket_count(), Some(BucketId::new(2)));
        assert_eq!(b.locate(&10), Some(Location::Sealed(BucketId::new(0))));
        assert_eq!(b.locate(&0), Some(Location::Sealed(BucketId::new(1))));
        assert_eq!(b.locate(&3), Some(Location::Sealed(BucketId::new(2))));
    }

    #[test]
    fn absorb_empty_source_is_noop() {
        let mut a: BucketedStore<u32, u32> = store_with_capacity(3);
        let mut b = store_with_capacity(3);
        b.extend([(1u32, 1u32), (2, 2)]);

        b.absorb(&mut a);

        assert_eq!(b.size(), 2);
        assert_eq!(b.sealed_count(), 0);
    }

    #[test]
    fn absorb_cleared_source_ignores_wiped_slots() {
        let mut a = store_with_capacity(2);
        a.extend((0..6u32).map(|i| (i, i)));
        a.clear();
        a.add(100, 100);
        let mut b = store_with_capacity(2);

        b.absorb(&mut a);

        assert_eq!(b.sealed_count(), 0);
        assert_eq!(b.size(), 1);
        assert!(b.contains(&100));
    }

    #[test]
    fn absorb_mismatched_capacity_rebuckets() {
        let mut a = store_with_capacity(5);
        a.extend((0..7u32).map(|i| (i, i)));
        let mut b = store_with_capacity(3);

        b.absorb(&mut a);

        assert!(a.is_empty());
        assert_eq!(b.size(), 7);
        assert_eq!(b.sealed_count(), 2);
        assert_eq!(b.staging_len(), 1);
        for id in 0..2 {
            assert_eq!(b.sealed_len(BucketId::new(id)), Some(3));
        }
        assert!((0..7u32).all(|i| b.contains(&i)));
    }

    #[test]
    fn iter_scan_order() {
        let mut store = store_with_capacity(2);
        store.extend([(5u32, 'a'), (3, 'b'), (9, 'c'), (1, 'd'), (7, 'e')]);

        let keys: Vec<u32> = store.iter().map(|(k, _)| *k).collect();

        assert_eq!(keys, vec![5, 3, 9, 1, 7]);
    }

    #[test]
    fn iter_located_reports_storing_segment() {
        let mut store = store_with_capacity(2);
        store.extend([(1u32, "a"), (2, "b"), (1, "dup")]);

        let located: Vec<_> = store
            .iter_located()
            .map(|(location, k, v)| (location, *k, *v))
            .collect();

        let bucket = Location::Sealed(BucketId::new(0));
        assert_eq!(
            located,
            vec![(bucket, 1, "a"), (bucket, 2, "b"), (Location::Staging, 1, "dup")]
        );
        assert_eq!(store.stats().snapshot().lookups(), 0);
    }

    #[test]
    fn split_keeps_staging_reservation() {
        let mut a = store_with_capacity(8);
        a.extend((0..6u32).map(|i| (i, i)));
        let mut b = store_with_capacity(8);
        b.extend((10..16u32).map(|i| (i, i)));

        b.absorb(&mut a);

        assert_eq!(b.sealed_count(), 1);
        assert_eq!(b.staging_len(), 4);
        assert!(b.staging.allocated() >= 8);
        assert!(a.staging.allocated() >= 8);
    }

    #[test]
    fn from_iterator_uses_default_capacity() {
        let store: BucketedStore<u32, u32> = (0..10).map(|i| (i, i)).collect();

        assert_eq!(store.size(), 10);
        assert_eq!(store.capacity(), crate::DEFAULT_CAPACITY);
        assert_eq!(store.sealed_count(), 0);
    }

    #[test]
    fn stats_track_operations() {
        let mut store = store_with_capacity(2);
        store.extend((0..5u32).map(|i| (i, i)));
        let _ = store.get(&1);
        let _ = store.contains(&42);
        store.clear();

        let snap = store.stats().snapshot();
        assert_eq!(snap.adds, 5);
        assert_eq!(snap.seals, 2);
        assert_eq!(snap.hits, 1);
        assert_eq!(snap.misses, 1);
        assert_eq!(snap.clears, 1);
    }

    #[test]
    fn clone_is_independent() {
        let mut store = store_with_capacity(2);
        store.extend((0..3u32).map(|i| (i, i)));

        let mut copy = store.clone();
        copy.add(99, 99);

        assert_eq!(store.size(), 3);
        assert_eq!(copy.size(), 4);
        assert!(!store.contains(&99));
    }

    #[test]
    fn debug_output() {
        let mut store = store_with_capacity(2);
        store.extend((0..3u32).map(|i| (i, i)));

        let debug = format!("{store:?}");
        assert!(debug.contains("BucketedStore"));
        assert!(debug.contains("size: 3"));
    }

    proptest! {
        #[test]
        fn adds_keep_segments_bounded(
            capacity in 1usize..8,
            keys in prop::collection::vec(0u32..64, 0..200),
        ) {
            let mut store = store_with_capacity(capacity);

            for key in keys {
                store.add(key, key);

                prop_assert!(store.staging_len() < capacity);
                prop_assert!(store.contains(&key));
                for id in 0..store.sealed_count() {
                    prop_assert_eq!(store.sealed_len(BucketId::new(id)), Some(capacity));
                }
                prop_assert_eq!(
                    store.size(),
                    store.sealed_count() * capacity + store.staging_len()
                );
            }
        }
    }
}
