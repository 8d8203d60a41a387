//! Property-based test generators using proptest.
//!
//! Keys are drawn from small ranges on purpose so that generated
//! sequences hit overwrites, shadowed duplicates and misses.

use proptest::prelude::*;

/// Strategy for small segment capacities (1..=8).
pub fn capacity_strategy() -> impl Strategy<Value = usize> {
    1usize..=8
}

/// Strategy for keys from a small domain.
pub fn key_strategy() -> impl Strategy<Value = u32> {
    0u32..64
}

/// Strategy for string values, including the legacy `"-1"` marker.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just("-1".to_string()),
        9 => prop::string::string_regex("[a-z0-9]{1,8}").expect("Invalid regex"),
    ]
}

/// Strategy for a list of distinct keys.
pub fn distinct_keys_strategy(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::hash_set(any::<u32>(), 0..max_len)
        .prop_map(|keys| keys.into_iter().collect())
}

/// A single store operation.
#[derive(Debug, Clone)]
pub enum StoreOperation {
    /// Add an entry
    Add {
        /// Key
        key: u32,
        /// Value
        value: String,
    },
    /// Look a key up
    Get {
        /// Key
        key: u32,
    },
    /// Check membership
    Contains {
        /// Key
        key: u32,
    },
    /// Clear the store
    Clear,
}

/// Strategy for store operations, weighted towards adds.
pub fn store_operation_strategy() -> impl Strategy<Value = StoreOperation> {
    prop_oneof![
        6 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOperation::Add { key, value }),
        2 => key_strategy().prop_map(|key| StoreOperation::Get { key }),
        2 => key_strategy().prop_map(|key| StoreOperation::Contains { key }),
        1 => Just(StoreOperation::Clear),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOperation>> {
    prop::collection::vec(store_operation_strategy(), min_ops..max_ops)
}

/// Strategy for a list of entries to add.
pub fn entries_strategy(max_len: usize) -> impl Strategy<Value = Vec<(u32, String)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..max_len)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
