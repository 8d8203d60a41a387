//! Core type definitions for BucketStore.

use std::fmt;

/// Identifier of a sealed segment in the basket.
///
/// Ids start at zero and increase by one on every seal. After a
/// [`crate::BucketedStore::clear`] numbering restarts at zero and reuses
/// the wiped slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketId(pub usize);

impl BucketId {
    /// Creates a new bucket ID.
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Returns the next bucket ID.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bucket:{}", self.0)
    }
}

/// A segment of the store: a sealed bucket or staging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// In the sealed segment with this id.
    Sealed(BucketId),
    /// In the staging segment.
    Staging,
}

impl Location {
    /// Returns the bucket id if the key lives in a sealed segment.
    #[must_use]
    pub const fn bucket(self) -> Option<BucketId> {
        match self {
            Self::Sealed(id) => Some(id),
            Self::Staging => None,
        }
    }
}
