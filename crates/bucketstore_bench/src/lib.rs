//! Benchmark utilities for BucketStore.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod utils;
