//! Store statistics.
//!
//! Counters are atomics so lookups, which only take `&self`, can still
//! record hits and misses.
//!
//! # Usage
//!
//! ```rust
//! use bucketstore_core::BucketedStore;
//!
//! let mut store = BucketedStore::new();
//! store.add("k", 1);
//! let _ = store.get("k");
//! let _ = store.get("missing");
//!
//! let stats = store.stats().snapshot();
//! assert_eq!(stats.adds, 1);
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for a single store.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Entries passed to `add` (directly or through `Extend`).
    adds: AtomicU64,
    /// Staging segments sealed into the basket.
    seals: AtomicU64,
    /// Lookups that found their key.
    hits: AtomicU64,
    /// Lookups that did not.
    misses: AtomicU64,
    /// Completed `absorb` calls.
    absorbs: AtomicU64,
    /// Completed `clear` calls.
    clears: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_add(&self) {
        self.adds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_seal(&self) {
        self.seals.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_lookup(&self, hit: bool) {
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_absorb(&self) {
        self.absorbs.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of added entries.
    pub fn adds(&self) -> u64 {
        self.adds.load(Ordering::Relaxed)
    }

    /// Returns the number of seals performed.
    pub fn seals(&self) -> u64 {
        self.seals.load(Ordering::Relaxed)
    }

    /// Returns the number of lookups that found their key.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Returns the number of lookups that missed.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Returns the number of absorbed stores.
    pub fn absorbs(&self) -> u64 {
        self.absorbs.load(Ordering::Relaxed)
    }

    /// Returns the number of clears.
    pub fn clears(&self) -> u64 {
        self.clears.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            adds: self.adds(),
            seals: self.seals(),
            hits: self.hits(),
            misses: self.misses(),
            absorbs: self.absorbs(),
            clears: self.clears(),
        }
    }
}

impl Clone for StoreStats {
    fn clone(&self) -> Self {
        let snap = self.snapshot();
        Self {
            adds: AtomicU64::new(snap.adds),
            seals: AtomicU64::new(snap.seals),
            hits: AtomicU64::new(snap.hits),
            misses: AtomicU64::new(snap.misses),
            absorbs: AtomicU64::new(snap.absorbs),
            clears: AtomicU64::new(snap.clears),
        }
    }
}

/// A point-in-time copy of [`StoreStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Entries passed to `add`.
    pub adds: u64,
    /// Staging segments sealed.
    pub seals: u64,
    /// Lookup hits.
    pub hits: u64,
    /// Lookup misses.
    pub misses: u64,
    /// Completed absorbs.
    pub absorbs: u64,
    /// Completed clears.
    pub clears: u64,
}

impl StatsSnapshot {
    /// Total lookups recorded.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
}
