//! Bounded key-value segments.
//!
//! A segment is a plain hash map that also remembers the order in which
//! keys were first inserted. Overwriting a key keeps its original
//! position. The order is what "the first `capacity` entries" means when
//! an oversized staging segment is split during a merge.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// A single segment of the store: the staging segment or a sealed one.
#[derive(Debug, Clone)]
pub(crate) struct Segment<K, V> {
    entries: HashMap<K, Slot<V>>,
    /// Position assigned to the next newly inserted key.
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct Slot<V> {
    seq: u64,
    value: V,
}

impl<K, V> Segment<K, V> {
    /// Creates an empty segment.
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty segment with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries the underlying map can hold without reallocating.
    #[cfg(test)]
    pub(crate) fn allocated(&self) -> usize {
        self.entries.capacity()
    }

    /// Removes every entry but keeps the allocation.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_seq = 0;
    }

    /// Entries in insertion order.
    pub(crate) fn ordered(&self) -> Vec<(&K, &V)> {
        let mut slots: Vec<_> = self
            .entries
            .iter()
            .map(|(key, slot)| (slot.seq, key, &slot.value))
            .collect();
        slots.sort_unstable_by_key(|&(seq, _, _)| seq);
        slots
            .into_iter()
            .map(|(_, key, value)| (key, value))
            .collect()
    }

    /// Consumes the segment, yielding entries in insertion order.
    pub(crate) fn into_ordered(self) -> Vec<(K, V)> {
        let mut slots: Vec<_> = self
            .entries
            .into_iter()
            .map(|(key, slot)| (slot.seq, key, slot.value))
            .collect();
        slots.sort_unstable_by_key(|&(seq, _, _)| seq);
        slots
            .into_iter()
            .map(|(_, key, value)| (key, value))
            .collect()
    }
}

impl<K, V> Segment<K, V>
where
    K: Eq + Hash,
{
    /// Inserts an entry, returning the previous value for the key.
    ///
    /// An overwritten key keeps its insertion position.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                Some(std::mem::replace(&mut occupied.get_mut().value, value))
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Slot {
                    seq: self.next_seq,
                    value,
                });
                self.next_seq += 1;
                None
            }
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|slot| &slot.value)
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Unions `incoming` into this segment. Incoming values win on
    /// conflicting keys; new keys are appended in their incoming order.
    pub(crate) fn merge(&mut self, incoming: Segment<K, V>) {
        self.entries.reserve(incoming.len());
        for (key, value) in incoming.into_ordered() {
            self.insert(key, value);
        }
    }

    /// Splits off the first `n` entries (in insertion order) into a new
    /// segment. The remaining entries stay here, still in order, in a map
    /// with room for at least `reserve` entries.
    pub(crate) fn split_front(&mut self, n: usize, reserve: usize) -> Segment<K, V> {
        let taken = std::mem::replace(self, Segment::with_capacity(reserve));
        let mut ordered = taken.into_ordered();
        let rest = ordered.split_off(n.min(ordered.len()));

        self.entries.reserve(rest.len());
        for (key, value) in rest {
            self.insert(key, value);
        }

        ordered.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Segment<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut segment = Segment::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            segment.insert(key, value);
        }
        segment
    }
}
