//! Run command implementation.
//!
//! Generates keys by hashing a UTC timestamp concatenated with a loop
//! counter, adds every key that is not already present, and reports the
//! final store size.

use bucketstore_core::{BucketedStore, StoreConfig};
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Instant;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::info;

/// Result of a driver run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// Timestamp mixed into every key.
    pub timestamp: String,
    /// Keys generated.
    pub generated: u64,
    /// Final `size()` of the store.
    pub size: usize,
    /// Segment capacity.
    pub capacity: usize,
    /// Sealed segments.
    pub sealed_buckets: usize,
    /// Entries left in staging.
    pub staging: usize,
    /// Generated keys that were already present.
    pub hits: u64,
    /// Wall-clock time of the insert loop in milliseconds.
    pub elapsed_ms: u128,
}

/// Hashes `stamp` followed by the decimal counter.
fn hash_key(buf: &mut String, stamp: &str, counter: u64) -> u64 {
    buf.clear();
    buf.push_str(stamp);
    // Writing to a String cannot fail.
    let _ = write!(buf, "{counter}");

    let mut hasher = DefaultHasher::new();
    buf.hash(&mut hasher);
    hasher.finish()
}

/// Runs the insert loop against a fresh store.
pub fn drive(
    store: &mut BucketedStore<u64, Arc<str>>,
    stamp: &str,
    count: u64,
    print_hits: bool,
) -> u64 {
    let value: Arc<str> = Arc::from(stamp);
    let mut buf = String::with_capacity(stamp.len() + 20);
    let mut hits = 0u64;

    for counter in 0..count {
        let key = hash_key(&mut buf, stamp, counter);
        let existing = if store.is_empty() {
            None
        } else {
            store.get(&key)
        };

        match existing {
            Some(found) => {
                hits += 1;
                if print_hits {
                    println!("{found}");
                }
            }
            None => {
                store.add(key, Arc::clone(&value));
            }
        }
    }

    hits
}

/// Runs the run command.
pub fn run(
    count: u64,
    capacity: usize,
    print_hits: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = BucketedStore::with_config(StoreConfig::new().capacity(capacity))?;

    let stamp = OffsetDateTime::now_utc().format(format_description!(
        "[day]/[month]/[year] [hour]:[minute]:[second]"
    ))?;

    info!("Generating {} keys at capacity {} ({})", count, capacity, stamp);

    let start = Instant::now();
    let hits = drive(&mut store, &stamp, count, print_hits);
    let elapsed = start.elapsed();

    let summary = RunSummary {
        timestamp: stamp,
        generated: count,
        size: store.size(),
        capacity,
        sealed_buckets: store.sealed_count(),
        staging: store.staging_len(),
        hits,
        elapsed_ms: elapsed.as_millis(),
    };

    info!(
        "Finished in {:?}: {} sealed buckets, {} staged, {} hits",
        elapsed, summary.sealed_buckets, summary.staging, summary.hits
    );

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => println!("{}", summary.size),
    }

    Ok(())
}
