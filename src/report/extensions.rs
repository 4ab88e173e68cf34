use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::model::{ExtensionStats, FileInformation, YearlySeries};
use crate::util::{extension_label, percent};

/// Extensions listed per year in the growth table
pub const EXTENSION_GROWTH_COLUMNS: usize = 5;

/// Bytes one extension gained in one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionDelta {
    pub extension: String,
    pub growth: u64,
    /// Share of the year's total extension growth, in percent
    pub share: f64,
}

/// Fastest-growing extensions of one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionGrowth {
    pub year: i32,
    pub extensions: Vec<ExtensionDelta>,
}

/// Group per-path totals by file extension, largest compressed size first
pub fn aggregate_extensions<'a>(files: impl IntoIterator<Item = &'a FileInformation>) -> Vec<ExtensionStats> {
    let mut stats: FxHashMap<String, ExtensionStats> = FxHashMap::default();

    for file in files {
        let ext = extension_label(&file.path);
        let entry = stats
            .entry(ext.to_string())
            .or_insert_with(|| ExtensionStats {
                extension: ext.into_owned(),
                ..Default::default()
            });
        entry.compressed_size += file.compressed_size;
        entry.blob_count += file.blob_count;
        entry.file_count += 1;
    }

    let mut result: Vec<_> = stats.into_values().collect();
    result.sort_by(|a, b| {
        b.compressed_size
            .cmp(&a.compressed_size)
            .then_with(|| a.extension.cmp(&b.extension))
    });
    result
}

fn sizes_by_extension(files: &FxHashMap<String, FileInformation>) -> FxHashMap<String, u64> {
    aggregate_extensions(files.values())
        .into_iter()
        .map(|e| (e.extension, e.compressed_size))
        .collect()
}

/// Per-year growth of each extension's compressed size, for every scanned
/// year after the first.
///
/// Only extensions that grew are listed, largest growth first, at most
/// `limit` per year.
pub fn extension_growth(series: &YearlySeries, limit: usize) -> Vec<ExtensionGrowth> {
    let sizes: Vec<(i32, FxHashMap<String, u64>)> = series
        .iter()
        .map(|s| (s.year, sizes_by_extension(&s.largest_files)))
        .collect();

    sizes
        .windows(2)
        .map(|pair| {
            let (previous, (year, current)) = (&pair[0].1, &pair[1]);
            let mut grown: Vec<(String, u64)> = current
                .iter()
                .filter_map(|(ext, &size)| {
                    let growth = size.saturating_sub(previous.get(ext).copied().unwrap_or(0));
                    (growth > 0).then(|| (ext.clone(), growth))
                })
                .collect();
            let total: u64 = grown.iter().map(|(_, g)| g).sum();
            grown.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

            ExtensionGrowth {
                year: *year,
                extensions: grown
                    .into_iter()
                    .take(limit)
                    .map(|(extension, growth)| ExtensionDelta {
                        extension,
                        growth,
                        share: percent(growth, total),
                    })
                    .collect(),
            }
        })
        .collect()
}
