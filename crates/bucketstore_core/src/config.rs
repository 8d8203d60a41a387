//! Store configuration.

use crate::error::{StoreError, StoreResult};

/// Default number of entries per segment.
pub const DEFAULT_CAPACITY: usize = 75_000;

/// Configuration for creating a [`crate::BucketedStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of entries in any segment.
    ///
    /// Sealed segments hold exactly this many entries.
    pub capacity: usize,

    /// Whether a fresh staging segment reserves room for `capacity`
    /// entries up front (avoids rehashing while it fills).
    pub preallocate: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            preallocate: true,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the segment capacity.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets whether staging segments are preallocated.
    #[must_use]
    pub const fn preallocate(mut self, value: bool) -> Self {
        self.preallocate = value;
        self
    }

    /// Checks that the configuration describes a usable store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCapacity`] if `capacity` is zero.
    pub fn validate(&self) -> StoreResult<()> {
        if self.capacity == 0 {
            return Err(StoreError::invalid_capacity(self.capacity));
        }
        Ok(())
    }

    /// Initial allocation for a new staging segment.
    pub(crate) fn staging_reserve(&self) -> usize {
        if self.preallocate {
            self.capacity
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.capacity, 75_000);
        assert!(config.preallocate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_pattern() {
        let config = StoreConfig::new().capacity(3).preallocate(false);

        assert_eq!(config.capacity, 3);
        assert!(!config.preallocate);
        assert_eq!(config.staging_reserve(), 0);
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = StoreConfig::new().capacity(0).validate().unwrap_err();
        assert_eq!(err, StoreError::InvalidCapacity { capacity: 0 });
    }
}
