//! Growth accumulator
//!
//! Folds a year's delta into the previous cumulative snapshot.

use rustc_hash::FxHashMap;
use std::time::Duration;

use super::types::{PathDelta, YearDelta};
use crate::model::{FileInformation, GrowthStatistics};

/// Build the cumulative snapshot for `year` from `previous` plus `delta`
pub fn accumulate(
    previous: &GrowthStatistics,
    year: i32,
    delta: &YearDelta,
    run_time: Duration,
) -> GrowthStatistics {
    let mut largest_files = previous.largest_files.clone();
    merge_paths(&mut largest_files, &delta.paths);

    GrowthStatistics {
        year,
        commits: previous.commits + delta.commits,
        trees: previous.trees + delta.trees,
        blobs: previous.blobs + delta.blobs,
        compressed_bytes: previous.compressed_bytes + delta.compressed_bytes,
        largest_files,
        run_time,
    }
}

/// Add per-path contributions onto `files`, inserting unseen paths.
///
/// Summation only, so the result does not depend on merge order.
pub fn merge_paths(
    files: &mut FxHashMap<String, FileInformation>,
    paths: &FxHashMap<String, PathDelta>,
) {
    for (path, delta) in paths {
        match files.get_mut(path) {
            Some(existing) => {
                existing.blob_count += delta.blobs;
                existing.compressed_size += delta.compressed_size;
            }
            None => {
                files.insert(
                    path.clone(),
                    FileInformation::new(path, delta.blobs, delta.compressed_size),
                );
            }
        }
    }
}
