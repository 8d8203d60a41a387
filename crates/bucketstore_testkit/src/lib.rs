//! # BucketStore Testkit
//!
//! Test utilities for BucketStore.
//!
//! This crate provides:
//! - Fixtures that build the canonical scenario stores
//! - Property-based test generators using proptest
//! - A naive reference model and invariant checks
//! - Fuzz harnesses driven by raw bytes
//! - Stress testing utilities
//!
//! ## Usage
//!
//! ```rust
//! use bucketstore_testkit::prelude::*;
//!
//! let store = seven_keys_store();
//! assert!(check_invariants(&store).is_ok());
//! assert_eq!(store.size(), 7);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod fuzz;
pub mod generators;
pub mod model;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use fuzz::*;
pub use generators::*;
pub use model::*;
pub use stress::*;
