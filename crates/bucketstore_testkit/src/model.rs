//! Reference model and invariant checks.
//!
//! [`ReferenceModel`] is a deliberately naive rendition of the bucketed
//! store built from vectors and linear search. It has no hashing and no
//! split bookkeeping, which makes it easy to trust as an oracle for
//! property tests.

use bucketstore_core::{BucketId, BucketedStore};
use std::hash::Hash;
use thiserror::Error;

/// A broken store invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A sealed segment does not hold exactly `capacity` entries.
    #[error("{bucket} holds {len} entries, expected {capacity}")]
    SealedSize {
        /// The offending segment.
        bucket: BucketId,
        /// Its entry count.
        len: usize,
        /// The store capacity.
        capacity: usize,
    },

    /// The staging segment outgrew the capacity.
    #[error("staging holds {len} entries, capacity is {capacity}")]
    StagingOverflow {
        /// Staging entry count.
        len: usize,
        /// The store capacity.
        capacity: usize,
    },

    /// The staging segment is full right after an `add`.
    #[error("staging holds {len} entries after add, must stay below {capacity}")]
    StagingFull {
        /// Staging entry count.
        len: usize,
        /// The store capacity.
        capacity: usize,
    },

    /// `size()` disagrees with the bucket formula.
    #[error("size() returned {reported}, bucket formula gives {computed}")]
    SizeMismatch {
        /// What the store reported.
        reported: usize,
        /// What the segments add up to.
        computed: usize,
    },

    /// `is_empty()` disagrees with the contents.
    #[error("is_empty() returned {reported} for a store of size {size}")]
    EmptinessMismatch {
        /// What the store reported.
        reported: bool,
        /// Store size.
        size: usize,
    },

    /// The iterator yields a different number of entries than `size()`.
    #[error("iter() yielded {yielded} entries, size() is {size}")]
    IterLength {
        /// Entries yielded.
        yielded: usize,
        /// Store size.
        size: usize,
    },
}

/// Checks the structural invariants of a store.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn check_invariants<K, V>(store: &BucketedStore<K, V>) -> Result<(), InvariantViolation> {
    let capacity = store.capacity();
    let sealed = store.sealed_count();

    for id in (0..sealed).map(BucketId::new) {
        let len = store.sealed_len(id).unwrap_or(0);
        if len != capacity {
            return Err(InvariantViolation::SealedSize {
                bucket: id,
                len,
                capacity,
            });
        }
    }

    let staging = store.staging_len();
    if staging > capacity {
        return Err(InvariantViolation::StagingOverflow {
            len: staging,
            capacity,
        });
    }

    let computed = match store.bucket_count() {
        Some(last) => (last.as_usize() + 1) * capacity + staging,
        None => staging,
    };
    if store.size() != computed {
        return Err(InvariantViolation::SizeMismatch {
            reported: store.size(),
            computed,
        });
    }

    if store.is_empty() != (computed == 0) {
        return Err(InvariantViolation::EmptinessMismatch {
            reported: store.is_empty(),
            size: computed,
        });
    }

    let yielded = store.iter().count();
    if yielded != computed {
        return Err(InvariantViolation::IterLength {
            yielded,
            size: computed,
        });
    }

    Ok(())
}

/// Checks the invariants that hold right after an `add`: those of
/// [`check_invariants`], plus a staging segment strictly below capacity.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn check_after_add<K, V>(store: &BucketedStore<K, V>) -> Result<(), InvariantViolation> {
    check_invariants(store)?;

    let staging = store.staging_len();
    if staging >= store.capacity() {
        return Err(InvariantViolation::StagingFull {
            len: staging,
            capacity: store.capacity(),
        });
    }
    Ok(())
}

/// A naive bucketed store: vectors of entries and linear search.
#[derive(Debug, Clone)]
pub struct ReferenceModel<K, V> {
    capacity: usize,
    sealed: Vec<Vec<(K, V)>>,
    staging: Vec<(K, V)>,
}

impl<K, V> ReferenceModel<K, V>
where
    K: Eq,
{
    /// Creates an empty model with the given segment capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sealed: Vec::new(),
            staging: Vec::new(),
        }
    }

    /// Adds an entry with the same rules as [`BucketedStore::add`].
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        let previous = match self.staging.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.staging.push((key, value));
                None
            }
        };

        if self.staging.len() > self.capacity {
            let rest = self.staging.split_off(self.capacity);
            let front = std::mem::replace(&mut self.staging, rest);
            self.sealed.push(front);
        } else if self.staging.len() == self.capacity {
            self.sealed.push(std::mem::take(&mut self.staging));
        }
        previous
    }

    /// Looks a key up, oldest sealed segment first.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.sealed
            .iter()
            .chain(std::iter::once(&self.staging))
            .find_map(|segment| segment.iter().find(|(k, _)| k == key).map(|(_, v)| v))
    }

    /// Returns `true` if the model holds `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Total number of entries.
    pub fn size(&self) -> usize {
        self.sealed.iter().map(Vec::len).sum::<usize>() + self.staging.len()
    }

    /// Number of sealed segments.
    pub fn sealed_count(&self) -> usize {
        self.sealed.len()
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.sealed.clear();
        self.staging.clear();
    }

    /// Folds `other` into this model, leaving `other` empty.
    ///
    /// Only models of equal capacity are supported.
    pub fn absorb(&mut self, other: &mut Self) {
        self.sealed.append(&mut other.sealed);
        for (key, value) in other.staging.drain(..) {
            match self.staging.iter_mut().find(|(k, _)| *k == key) {
                Some((_, slot)) => *slot = value,
                None => self.staging.push((key, value)),
            }
        }
        while self.staging.len() > self.capacity {
            let rest = self.staging.split_off(self.capacity);
            let front = std::mem::replace(&mut self.staging, rest);
            self.sealed.push(front);
        }
    }

    /// Entries in scan order.
    pub fn entries(&self) -> impl Iterator<Item = &(K, V)> + '_ {
        self.sealed.iter().flatten().chain(self.staging.iter())
    }
}

/// Asserts that a store and a model agree on every observable result.
///
/// `probe` lists extra keys to look up (typically keys never added).
///
/// # Panics
///
/// Panics with a description of the first disagreement.
pub fn assert_matches_model<K, V>(
    store: &BucketedStore<K, V>,
    model: &ReferenceModel<K, V>,
    probe: &[K],
) where
    K: Eq + Hash + std::fmt::Debug,
    V: PartialEq + std::fmt::Debug,
{
    if let Err(violation) = check_invariants(store) {
        panic!("invariant violated: {violation}");
    }

    assert_eq!(store.size(), model.size(), "size mismatch");
    assert_eq!(store.sealed_count(), model.sealed_count(), "sealed count mismatch");
    assert_eq!(store.is_empty(), model.size() == 0, "emptiness mismatch");

    for (key, _) in model.entries() {
        assert_eq!(store.get(key), model.get(key), "value mismatch for {key:?}");
    }
    for key in probe {
        assert_eq!(store.contains(key), model.contains(key), "membership mismatch for {key:?}");
        assert_eq!(store.get(key), model.get(key), "value mismatch for {key:?}");
    }

    let from_store: Vec<_> = store.iter().collect();
    let from_model: Vec<_> = model.entries().map(|(k, v)| (k, v)).collect();
    assert_eq!(from_store, from_model, "scan order mismatch");
}
