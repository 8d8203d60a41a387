//! The basket of sealed segments.
//!
//! Slots are addressed by [`BucketId`]. Only slots `0..=last` hold sealed
//! data; slots past `last` are wiped leftovers from a `clear` and are
//! reused, in id order, by later seals.

use crate::segment::Segment;
use crate::types::BucketId;
use std::borrow::Borrow;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub(crate) struct Basket<K, V> {
    slots: Vec<Segment<K, V>>,
    /// Id of the most recently sealed segment, `None` when nothing is sealed.
    last: Option<BucketId>,
}

impl<K, V> Basket<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            last: None,
        }
    }

    /// Id of the last sealed segment.
    pub(crate) fn last(&self) -> Option<BucketId> {
        self.last
    }

    /// Number of sealed segments.
    pub(crate) fn sealed_len(&self) -> usize {
        self.last.map_or(0, |id| id.as_usize() + 1)
    }

    /// Number of allocated slots, including wiped ones.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Sealed segments in id order.
    pub(crate) fn sealed(&self) -> &[Segment<K, V>] {
        &self.slots[..self.sealed_len()]
    }

    pub(crate) fn segment(&self, id: BucketId) -> Option<&Segment<K, V>> {
        self.sealed().get(id.as_usize())
    }

    /// Stores `segment` under the next id and returns that id.
    pub(crate) fn seal(&mut self, segment: Segment<K, V>) -> BucketId {
        let id = self.last.map_or(BucketId::new(0), BucketId::next);
        match self.slots.get_mut(id.as_usize()) {
            Some(slot) => *slot = segment,
            None => self.slots.push(segment),
        }
        self.last = Some(id);
        id
    }

    /// Wipes every slot in place and restarts id numbering.
    pub(crate) fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
        self.last = None;
    }

    /// Moves the sealed segments out, leaving the basket with no slots.
    pub(crate) fn take_sealed(&mut self) -> Vec<Segment<K, V>> {
        let mut slots = std::mem::take(&mut self.slots);
        slots.truncate(self.sealed_len());
        self.last = None;
        slots
    }
}

impl<K, V> Basket<K, V>
where
    K: Eq + Hash,
{
    /// Scans sealed segments oldest first and returns the first hit.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<(BucketId, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.sealed()
            .iter()
            .enumerate()
            .find_map(|(id, segment)| segment.get(key).map(|value| (BucketId::new(id), value)))
    }
}
