use rustc_hash::FxHashMap;
use serde::Serialize;
use std::time::Duration;

/// Cumulative storage contributed by every blob version ever stored at a path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileInformation {
    pub path: String,
    pub blob_count: u64,
    pub compressed_size: u64,
    /// Unix timestamp of the last commit touching the path, filled in lazily for display
    pub last_change: Option<i64>,
}

impl FileInformation {
    pub fn new(path: &str, blob_count: u64, compressed_size: u64) -> Self {
        Self {
            path: path.to_string(),
            blob_count,
            compressed_size,
            last_change: None,
        }
    }
}

/// Cumulative repository statistics as of the end of a calendar year
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrowthStatistics {
    pub year: i32,
    pub commits: u64,
    pub trees: u64,
    pub blobs: u64,
    pub compressed_bytes: u64,
    #[serde(skip)]
    pub largest_files: FxHashMap<String, FileInformation>,
    /// Wall-clock duration of the scan that produced this snapshot (diagnostic only)
    pub run_time: Duration,
}

impl GrowthStatistics {
    pub fn new(year: i32, commits: u64, trees: u64, blobs: u64, compressed_bytes: u64) -> Self {
        Self {
            year,
            commits,
            trees,
            blobs,
            compressed_bytes,
            ..Default::default()
        }
    }

    /// True when every cumulative counter is >= the matching counter of `earlier`
    pub fn dominates(&self, earlier: &GrowthStatistics) -> bool {
        self.commits >= earlier.commits
            && self.trees >= earlier.trees
            && self.blobs >= earlier.blobs
            && self.compressed_bytes >= earlier.compressed_bytes
    }

    /// Sum of the compressed sizes of every tracked path
    pub fn total_file_bytes(&self) -> u64 {
        self.largest_files.values().map(|f| f.compressed_size).sum()
    }

    /// Paths ordered by cumulative compressed size, largest first, ties broken by path
    pub fn files_by_size(&self) -> Vec<&FileInformation> {
        let mut files: Vec<_> = self.largest_files.values().collect();
        files.sort_by(|a, b| {
            b.compressed_size
                .cmp(&a.compressed_size)
                .then_with(|| a.path.cmp(&b.path))
        });
        files
    }
}

/// Chronologically ordered sequence of yearly snapshots
///
/// Years are strictly increasing; pushing an out-of-order year is rejected.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct YearlySeries {
    snapshots: Vec<GrowthStatistics>,
}

impl YearlySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot. Returns false (and drops it) if its year does not
    /// come after the last stored year.
    pub fn push(&mut self, stats: GrowthStatistics) -> bool {
        if self.last().is_some_and(|last| last.year >= stats.year) {
            return false;
        }
        self.snapshots.push(stats);
        true
    }

    pub fn get(&self, year: i32) -> Option<&GrowthStatistics> {
        self.snapshots
            .binary_search_by_key(&year, |s| s.year)
            .ok()
            .map(|i| &self.snapshots[i])
    }

    /// Latest snapshot whose year is <= `year`
    pub fn at_or_before(&self, year: i32) -> Option<&GrowthStatistics> {
        let idx = self.snapshots.partition_point(|s| s.year <= year);
        idx.checked_sub(1).map(|i| &self.snapshots[i])
    }

    /// Snapshots with `start <= year <= end`, in order
    pub fn range(&self, start: i32, end: i32) -> &[GrowthStatistics] {
        let lo = self.snapshots.partition_point(|s| s.year < start);
        let hi = self.snapshots.partition_point(|s| s.year <= end);
        if lo >= hi {
            return &[];
        }
        &self.snapshots[lo..hi]
    }

    pub fn first(&self) -> Option<&GrowthStatistics> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&GrowthStatistics> {
        self.snapshots.last()
    }

    pub fn as_slice(&self) -> &[GrowthStatistics] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GrowthStatistics> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Every snapshot dominates its predecessor
    pub fn is_monotonic(&self) -> bool {
        self.snapshots.windows(2).all(|w| w[1].dominates(&w[0]))
    }
}

impl<'a> IntoIterator for &'a YearlySeries {
    type Item = &'a GrowthStatistics;
    type IntoIter = std::slice::Iter<'a, GrowthStatistics>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
