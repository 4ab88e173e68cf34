//! Domain types for growth scanning
//!
//! These types form the data contract between the parser, the per-year
//! scanner and the accumulator.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// Kind of object reported by the traversal command
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
    /// Any other kind (annotated tags); counted into bytes only
    Other,
}

impl ObjectKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "commit" => ObjectKind::Commit,
            "tree" => ObjectKind::Tree,
            "blob" => ObjectKind::Blob,
            _ => ObjectKind::Other,
        }
    }
}

/// One line of traversal output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord<'a> {
    pub kind: ObjectKind,
    pub id: &'a str,
    pub disk_size: u64,
    pub path: Option<String>,
}

/// Per-path contribution within a single year
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PathDelta {
    pub blobs: u64,
    pub compressed_size: u64,
}

/// Objects newly attributed to one year, before merging into cumulative totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearDelta {
    pub commits: u64,
    pub trees: u64,
    pub blobs: u64,
    pub compressed_bytes: u64,
    pub paths: FxHashMap<String, PathDelta>,
}

impl YearDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a record that the ledger has just claimed for this year
    pub fn record(&mut self, record: ObjectRecord<'_>) {
        self.compressed_bytes += record.disk_size;
        match record.kind {
            ObjectKind::Commit => self.commits += 1,
            ObjectKind::Tree => self.trees += 1,
            ObjectKind::Blob => {
                self.blobs += 1;
                if let Some(path) = record.path {
                    let entry = self.paths.entry(path).or_default();
                    entry.blobs += 1;
                    entry.compressed_size += record.disk_size;
                }
            }
            ObjectKind::Other => {}
        }
    }

    pub fn objects(&self) -> u64 {
        self.commits + self.trees + self.blobs
    }

    pub fn is_empty(&self) -> bool {
        self.objects() == 0 && self.compressed_bytes == 0 && self.paths.is_empty()
    }
}

/// Padded date window approximating one calendar year
///
/// Runs from the last day of `year - 1` to the first day of `year + 1` so
/// that commits near the boundary are not lost to timezone skew.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct YearWindow {
    pub year: i32,
}

impl YearWindow {
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    /// Value for `--after`
    pub fn after(&self) -> String {
        format!("{}-12-31", self.year - 1)
    }

    /// Value for `--before`
    pub fn before(&self) -> String {
        format!("{}-01-01", self.year + 1)
    }
}

impl fmt::Display for YearWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (after {}, before {})", self.year, self.after(), self.before())
    }
}

/// A year whose traversal failed and contributed nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedYear {
    pub year: i32,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_padded_by_a_day() {
        let w = YearWindow::new(2021);
        assert_eq!(w.after(), "2020-12-31");
        assert_eq!(w.before(), "2022-01-01");
    }

    #[test]
    fn test_record_blob_updates_paths() {
        let mut delta = YearDelta::new();
        delta.record(ObjectRecord {
            kind: ObjectKind::Blob,
            id: "a1",
            disk_size: 40,
            path: Some("src/main.rs".to_string()),
        });
        delta.record(ObjectRecord {
            kind: ObjectKind::Blob,
            id: "a2",
            disk_size: 2,
            path: Some("src/main.rs".to_string()),
        });
        delta.record(ObjectRecord {
            kind: ObjectKind::Blob,
            id: "a3",
            disk_size: 7,
            path: None,
        });

        assert_eq!(delta.blobs, 3);
        assert_eq!(delta.compressed_bytes, 49);
        assert_eq!(
            delta.paths.get("src/main.rs"),
            Some(&PathDelta { blobs: 2, compressed_size: 42 })
        );
        assert_eq!(delta.paths.len(), 1);
    }

    #[test]
    fn test_other_kind_counts_bytes_only() {
        let mut delta = YearDelta::new();
        delta.record(ObjectRecord {
            kind: ObjectKind::parse("tag"),
            id: "t1",
            disk_size: 150,
            path: Some("v1.0".to_string()),
        });
        assert_eq!(delta.objects(), 0);
        assert_eq!(delta.compressed_bytes, 150);
        assert!(delta.paths.is_empty());
    }
}
