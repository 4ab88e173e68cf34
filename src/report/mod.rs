//! Growth report assembly and rendering
//!
//! Turns a finished scan into the yearly table, the estimation summary, the
//! largest files, the directory tree and the extension breakdown, as text
//! or JSON.

mod directories;
mod extensions;
mod text;

pub use directories::{DirectoryEntry, MAX_DIRECTORY_DEPTH, SIGNIFICANT_SHARE, largest_directories};
pub use extensions::{
    EXTENSION_GROWTH_COLUMNS, ExtensionDelta, ExtensionGrowth, aggregate_extensions, extension_growth,
};
pub use text::render_text;

use serde::Serialize;
use std::time::Duration;

use crate::estimation::{
    average_growth, compare_estimation_methods, estimation_window, log_explanation, project,
};
use crate::model::{EstimationComparison, ExtensionStats, FileInformation, GrowthStatistics, YearlySeries};
use crate::repository::{GitObjectSource, RepositoryInfo, ScanReport, SkippedYear};

/// Report knobs taken from the command line
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub estimation_years: u32,
    pub projection_years: usize,
    pub top: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            estimation_years: 5,
            projection_years: 6,
            top: 10,
        }
    }
}

/// Estimation inputs and outputs for the report
#[derive(Debug, Clone, Serialize)]
pub struct EstimationSection {
    pub window_start: i32,
    pub window_end: i32,
    /// Mean yearly delta over the window
    pub average: GrowthStatistics,
    pub comparison: EstimationComparison,
    /// Additive projection rows following the last complete year
    pub projections: Vec<GrowthStatistics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrowthReport {
    pub repository: RepositoryInfo,
    pub current_year: i32,
    pub series: YearlySeries,
    pub skipped_years: Vec<SkippedYear>,
    pub objects_seen: usize,
    pub estimation: Option<EstimationSection>,
    pub largest_files: Vec<FileInformation>,
    pub tracked_paths: usize,
    pub total_file_bytes: u64,
    pub extensions: Vec<ExtensionStats>,
    /// Directories and files holding at least 1% of all file bytes, in tree order
    pub directories: Vec<DirectoryEntry>,
    pub extension_growth: Vec<ExtensionGrowth>,
    pub run_time: Duration,
}

impl GrowthReport {
    pub fn build(
        repository: RepositoryInfo,
        scan: ScanReport,
        current_year: i32,
        options: &ReportOptions,
    ) -> Self {
        let estimation = build_estimation(&scan.series, repository.first_year(), current_year, options);

        let (largest_files, tracked_paths, total_file_bytes, extensions, directories) =
            match scan.series.last() {
                Some(totals) => (
                    totals
                        .files_by_size()
                        .into_iter()
                        .take(options.top)
                        .cloned()
                        .collect(),
                    totals.largest_files.len(),
                    totals.total_file_bytes(),
                    aggregate_extensions(totals.largest_files.values())
                        .into_iter()
                        .take(options.top)
                        .collect(),
                    largest_directories(totals.largest_files.values(), totals.blobs),
                ),
                None => (Vec::new(), 0, 0, Vec::new(), Vec::new()),
            };
        let extension_growth = extension_growth(&scan.series, EXTENSION_GROWTH_COLUMNS);

        Self {
            repository,
            current_year,
            series: scan.series,
            skipped_years: scan.skipped,
            objects_seen: scan.objects_seen,
            estimation,
            largest_files,
            tracked_paths,
            total_file_bytes,
            extensions,
            directories,
            extension_growth,
            run_time: Duration::ZERO,
        }
    }

    /// Latest cumulative snapshot
    pub fn totals(&self) -> Option<&GrowthStatistics> {
        self.series.last()
    }

    /// Look up the last change time of each listed file
    pub async fn resolve_last_changes(&mut self, source: &GitObjectSource) {
        for file in &mut self.largest_files {
            file.last_change = source.last_change(&file.path).await;
        }
    }
}

fn build_estimation(
    series: &YearlySeries,
    first_year: i32,
    current_year: i32,
    options: &ReportOptions,
) -> Option<EstimationSection> {
    let (start, end) = estimation_window(first_year, current_year, options.estimation_years)?;
    if series.range(start, end).is_empty() {
        tracing::debug!(start, end, "no scanned years in estimation window");
        return None;
    }
    let average = average_growth(series, start, end)?;
    let current = series.at_or_before(end)?;

    // Models are fitted on every year up to the window end; the window only
    // bounds the average
    let history = series.range(first_year, end);
    let comparison = compare_estimation_methods(current, &average, history);
    log_explanation(&average, history, comparison.selected.method);

    Some(EstimationSection {
        window_start: start,
        window_end: end,
        projections: project(current, &average, options.projection_years),
        average,
        comparison,
    })
}
