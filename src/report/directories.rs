//! Directory roll-up of the per-path footprint
//!
//! Sums every path's historical storage into its parent directories and
//! keeps the directories and files holding at least 1% of all file bytes,
//! in tree order.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::model::FileInformation;

/// Deepest directory level rolled up
pub const MAX_DIRECTORY_DEPTH: usize = 10;

/// Minimum share of total file bytes for an entry to be listed
pub const SIGNIFICANT_SHARE: f64 = 0.01;

/// One row of the directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// Full path from the repository root, "." for the root itself
    pub path: String,
    /// Last path component
    pub name: String,
    /// 0 for the root, 1 for top-level entries
    pub depth: usize,
    pub is_file: bool,
    pub blob_count: u64,
    pub compressed_size: u64,
}

impl DirectoryEntry {
    fn new(path: &str, depth: usize, is_file: bool, blob_count: u64, compressed_size: u64) -> Self {
        Self {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            depth,
            is_file,
            blob_count,
            compressed_size,
        }
    }
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

/// Significant directories and files in depth-first order, root first.
///
/// Siblings list directories before files, each by size (largest first)
/// then path. Files below [`MAX_DIRECTORY_DEPTH`] are not listed but still
/// count toward their ancestors.
pub fn largest_directories<'a>(
    files: impl IntoIterator<Item = &'a FileInformation>,
    total_blobs: u64,
) -> Vec<DirectoryEntry> {
    let files: Vec<&FileInformation> = files.into_iter().collect();
    if files.is_empty() {
        return Vec::new();
    }

    let total_size: u64 = files.iter().map(|f| f.compressed_size).sum();
    let threshold = total_size as f64 * SIGNIFICANT_SHARE;

    let mut directories: FxHashMap<String, (u64, u64)> = FxHashMap::default();
    for file in &files {
        let mut end = 0;
        for (level, component) in file.path.split('/').enumerate() {
            end += component.len();
            if end >= file.path.len() || level >= MAX_DIRECTORY_DEPTH {
                break;
            }
            let entry = directories.entry(file.path[..end].to_string()).or_default();
            entry.0 += file.blob_count;
            entry.1 += file.compressed_size;
            end += 1;
        }
    }

    let mut children: FxHashMap<&str, Vec<DirectoryEntry>> = FxHashMap::default();
    for (path, &(blobs, size)) in &directories {
        if size as f64 >= threshold {
            let depth = path.split('/').count();
            children
                .entry(parent_of(path))
                .or_default()
                .push(DirectoryEntry::new(path, depth, false, blobs, size));
        }
    }
    for file in &files {
        let depth = file.path.split('/').count();
        if file.compressed_size as f64 >= threshold && depth <= MAX_DIRECTORY_DEPTH {
            children.entry(parent_of(&file.path)).or_default().push(DirectoryEntry::new(
                &file.path,
                depth,
                true,
                file.blob_count,
                file.compressed_size,
            ));
        }
    }
    for group in children.values_mut() {
        group.sort_by(|a, b| {
            a.is_file
                .cmp(&b.is_file)
                .then_with(|| b.compressed_size.cmp(&a.compressed_size))
                .then_with(|| a.path.cmp(&b.path))
        });
    }

    let mut rows = vec![DirectoryEntry {
        path: ".".to_string(),
        name: ".".to_string(),
        depth: 0,
        is_file: false,
        blob_count: total_blobs,
        compressed_size: total_size,
    }];
    push_children(&children, "", &mut rows);
    rows
}

fn push_children(
    children: &FxHashMap<&str, Vec<DirectoryEntry>>,
    parent: &str,
    rows: &mut Vec<DirectoryEntry>,
) {
    let Some(group) = children.get(parent) else {
        return;
    };
    for entry in group {
        rows.push(entry.clone());
        if !entry.is_file {
            push_children(children, &entry.path, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rows: &[DirectoryEntry]) -> Vec<&str> {
        rows.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_rolls_up_and_orders_tree() {
        let files = [
            FileInformation::new("src/main.rs", 3, 300),
            FileInformation::new("src/util/fmt.rs", 1, 200),
            FileInformation::new("assets/logo.png", 2, 450),
            FileInformation::new("README.md", 1, 50),
        ];
        let rows = largest_directories(&files, 7);

        assert_eq!(
            names(&rows),
            vec![
                ".",
                "src",
                "src/util",
                "src/util/fmt.rs",
                "src/main.rs",
                "assets",
                "assets/logo.png",
                "README.md",
            ]
        );
        assert_eq!((rows[0].blob_count, rows[0].compressed_size), (7, 1000));
        let src = &rows[1];
        assert_eq!((src.blob_count, src.compressed_size, src.depth), (4, 500, 1));
        assert_eq!(rows[2].name, "util");
        assert_eq!(rows[3].depth, 3);
        assert!(rows[3].is_file);
    }

    #[test]
    fn test_small_entries_are_cut() {
        let files = [
            FileInformation::new("big/blob.bin", 1, 9_950),
            FileInformation::new("tiny/a.txt", 1, 30),
            FileInformation::new("tiny/b.txt", 1, 20),
        ];
        let rows = largest_directories(&files, 3);
        // tiny/ holds 0.5%, below the cut-off
        assert_eq!(names(&rows), vec![".", "big", "big/blob.bin"]);
        assert_eq!(rows[0].compressed_size, 10_000);
    }

    #[test]
    fn test_depth_is_limited() {
        let deep = (0..12).map(|i| format!("d{}", i)).collect::<Vec<_>>().join("/") + "/f.bin";
        let files = [FileInformation::new(&deep, 1, 100)];
        let rows = largest_directories(&files, 1);

        assert_eq!(rows.len(), 1 + MAX_DIRECTORY_DEPTH);
        assert_eq!(rows.last().map(|r| r.depth), Some(MAX_DIRECTORY_DEPTH));
        assert!(rows.iter().all(|r| !r.is_file));
    }

    #[test]
    fn test_empty_input() {
        assert!(largest_directories(std::iter::empty(), 0).is_empty());
    }
}
