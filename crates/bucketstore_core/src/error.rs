//! Error types for BucketStore core.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when building a store.
///
/// Store operations themselves never fail: a missing key is reported
/// through `Option`/`bool`, not through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The configured segment capacity cannot hold any entry.
    #[error("invalid capacity {capacity}: a segment must hold at least one entry")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },
}

impl StoreError {
    /// Creates an invalid capacity error.
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self::InvalidCapacity { capacity }
    }
}
