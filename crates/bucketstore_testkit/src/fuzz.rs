//! Fuzz testing harnesses for BucketStore.
//!
//! These targets decode arbitrary bytes into store operations and check
//! the store against [`ReferenceModel`] after every step. They can be
//! wired into cargo-fuzz or driven from proptest.

use crate::fixtures::store_with_capacity;
use crate::model::{assert_matches_model, ReferenceModel};
use bucketstore_core::BucketedStore;

/// Fuzz target for a single store.
///
/// Byte layout: `data[0]` picks the capacity (`1..=16`), then each
/// two-byte pair is `(opcode, key)`:
/// - `0..=159` add `key -> opcode`
/// - `160..=223` lookup `key`
/// - `224..=251` clear
/// - `252..=255` absorb a side store filled with the next keys
pub fn fuzz_store_operations(data: &[u8]) {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 16) + 1;

    let mut store: BucketedStore<u8, u8> = store_with_capacity(capacity);
    let mut model = ReferenceModel::new(capacity);

    for pair in ops.chunks_exact(2) {
        let (op, key) = (pair[0], pair[1]);
        match op {
            0..=159 => {
                assert_eq!(store.add(key, op), model.add(key, op), "add {key}");
            }
            160..=223 => {
                assert_eq!(store.get(&key), model.get(&key), "get {key}");
            }
            224..=251 => {
                store.clear();
                model.clear();
            }
            _ => {
                let mut side: BucketedStore<u8, u8> = store_with_capacity(capacity);
                let mut side_model = ReferenceModel::new(capacity);
                for k in key..key.saturating_add(op - 250) {
                    side.add(k, k);
                    side_model.add(k, k);
                }
                store.absorb(&mut side);
                model.absorb(&mut side_model);
                assert!(side.is_empty(), "absorbed store must be empty");
            }
        }
    }

    assert_matches_model(&store, &model, &[0, 127, 255]);
}
