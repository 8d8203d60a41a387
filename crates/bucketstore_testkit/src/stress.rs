//! Stress tests for BucketStore.
//!
//! These runs verify behavior under large insert volumes. Concurrency is
//! exercised the only supported way: one store per worker thread, folded
//! together afterwards with `absorb`.

use crate::fixtures::store_with_capacity;
use bucketstore_core::BucketedStore;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Operations that produced the expected outcome.
    pub successful_ops: usize,
    /// Operations that did not.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of entries to insert.
    pub operations: usize,
    /// Segment capacity of every store.
    pub capacity: usize,
    /// Number of worker threads (for the absorb test).
    pub threads: usize,
}

/// Inserts `operations` distinct keys and checks the final size.
pub fn stress_sequential_adds(config: &StressConfig) -> (BucketedStore<u64, u64>, StressTestResult) {
    let mut store = store_with_capacity(config.capacity);

    let start = Instant::now();
    for key in 0..config.operations as u64 {
        store.add(key, key);
    }
    let duration = start.elapsed();

    let stored = store.size().min(config.operations);
    let result = StressTestResult::new(stored, config.operations - stored, duration);
    (store, result)
}

/// Looks up every key of a filled store plus as many absent keys.
pub fn stress_lookups(store: &BucketedStore<u64, u64>, present: usize) -> StressTestResult {
    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for key in 0..present as u64 {
        if store.get(&key) == Some(&key) {
            successful += 1;
        } else {
            failed += 1;
        }
    }

    let absent_start = present as u64;
    for key in absent_start..absent_start + present as u64 {
        if store.contains(&key) {
            failed += 1;
        } else {
            successful += 1;
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Fills one store per worker thread with disjoint key ranges, then
/// absorbs them all into a single store.
pub fn stress_parallel_absorb(config: &StressConfig) -> (BucketedStore<u64, u64>, StressTestResult) {
    let threads = config.threads.max(1);
    let per_worker = config.operations / threads;
    let capacity = config.capacity;

    let start = Instant::now();
    let handles: Vec<_> = (0..threads)
        .map(|worker| {
            thread::spawn(move || {
                let mut store = store_with_capacity(capacity);
                let base = (worker * per_worker) as u64;
                for key in base..base + per_worker as u64 {
                    store.add(key, key);
                }
                store
            })
        })
        .collect();

    let mut merged = store_with_capacity(capacity);
    let mut failed = 0usize;
    for handle in handles {
        match handle.join() {
            Ok(mut worker_store) => merged.absorb(&mut worker_store),
            Err(_) => failed += per_worker,
        }
    }

    let successful = merged.size();
    (merged, StressTestResult::new(successful, failed, start.elapsed()))
}
