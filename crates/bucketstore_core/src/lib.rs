//! # BucketStore Core
//!
//! An in-memory key-value store that never lets a single hash map grow
//! past a fixed size.
//!
//! Very large hash maps degrade once they hold tens of millions of
//! entries. [`BucketedStore`] sidesteps this by partitioning entries into
//! fixed-capacity **sealed segments** (the *basket*) plus one mutable
//! **staging segment**:
//!
//! - New entries go to the staging segment.
//! - When the staging segment reaches `capacity` it is sealed into the
//!   basket under the next sequential bucket id and a fresh staging
//!   segment begins.
//! - Lookups scan sealed segments oldest first, then the staging segment.
//! - [`BucketedStore::absorb`] folds another store into this one and
//!   leaves the source empty.
//!
//! ## Invariants
//!
//! - Every sealed segment holds exactly `capacity` entries
//! - The staging segment holds fewer than `capacity` entries after `add`,
//!   and at most `capacity` after `absorb`
//! - `size() == (bucket_count + 1) * capacity + staging_len`
//!
//! ## Example
//!
//! ```rust
//! use bucketstore_core::{BucketId, BucketedStore, StoreConfig};
//!
//! let mut store = BucketedStore::with_config(StoreConfig::new().capacity(3)).unwrap();
//! for i in 1..=7u32 {
//!     store.add(i, format!("v{i}"));
//! }
//!
//! assert_eq!(store.size(), 7);
//! assert_eq!(store.bucket_count(), Some(BucketId::new(1)));
//! assert_eq!(store.get(&5).map(String::as_str), Some("v5"));
//! assert!(!store.contains(&8));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod basket;
mod config;
mod error;
mod segment;
mod stats;
mod store;
mod types;

pub use config::{StoreConfig, DEFAULT_CAPACITY};
pub use error::{StoreError, StoreResult};
pub use stats::{StatsSnapshot, StoreStats};
pub use store::{BucketedStore, Iter};
pub use types::{BucketId, Location};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
