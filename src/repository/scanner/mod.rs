//! Growth scanner
//!
//! Scans the object graph one calendar year at a time and accumulates
//! cumulative statistics.
//!
//! # Architecture
//!
//! - **types**: Domain types (ObjectRecord, YearDelta, YearWindow, etc.)
//! - **record**: Parser for traversal output lines
//! - **ledger**: Cross-year deduplication of object ids
//! - **source**: Traversal command boundary (`git rev-list | git cat-file`)
//! - **accumulate**: Folds a year's delta into the cumulative snapshot
//! - **progress**: Observer seam and the spinner task
//!
//! Years must be scanned strictly in increasing order against one ledger:
//! the first year to see an object keeps it, so reordering changes which
//! year's delta an object lands in.

mod accumulate;
mod ledger;
mod progress;
mod record;
mod source;
mod types;

pub use accumulate::{accumulate, merge_paths};
pub use ledger::DeduplicationLedger;
pub use progress::{NoopObserver, ProgressState, ScanObserver, SpinnerProgress};
pub use record::{parse_record, parse_records};
pub use source::{BATCH_CHECK_FORMAT, GitObjectSource, ObjectSource};
pub use types::{ObjectKind, ObjectRecord, PathDelta, SkippedYear, YearDelta, YearWindow};

use std::ops::RangeInclusive;
use std::time::Instant;

use crate::error::ScanError;
use crate::model::{GrowthStatistics, YearlySeries};

/// Attribute every not-yet-claimed record of `output` to one year.
///
/// Only call this with complete output: every record is claimed in the
/// ledger permanently.
pub fn apply_output(ledger: &mut DeduplicationLedger, output: &str) -> YearDelta {
    let mut delta = YearDelta::new();
    for record in parse_records(output) {
        if ledger.claim(record.id) {
            delta.record(record);
        }
    }
    delta
}

/// Scan one year's window and return its delta.
///
/// The ledger is left untouched when the traversal fails.
pub async fn scan_year_delta<S: ObjectSource>(
    source: &S,
    ledger: &mut DeduplicationLedger,
    year: i32,
) -> Result<YearDelta, ScanError> {
    let output = source.list_objects(YearWindow::new(year)).await?;
    Ok(apply_output(ledger, &output))
}

/// Result of a multi-year scan
#[derive(Debug, Default)]
pub struct ScanReport {
    pub series: YearlySeries,
    pub skipped: Vec<SkippedYear>,
    /// Distinct objects attributed across all years
    pub objects_seen: usize,
}

/// State of one in-progress multi-year scan
///
/// Owns its ledger; independent sessions never share dedup state.
#[derive(Debug, Default)]
pub struct ScanSession {
    ledger: DeduplicationLedger,
    series: YearlySeries,
    skipped: Vec<SkippedYear>,
    last_year: Option<i32>,
    baseline: GrowthStatistics,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest cumulative snapshot, or the empty baseline before the first year
    pub fn previous(&self) -> &GrowthStatistics {
        self.series.last().unwrap_or(&self.baseline)
    }

    pub fn ledger(&self) -> &DeduplicationLedger {
        &self.ledger
    }

    pub fn series(&self) -> &YearlySeries {
        &self.series
    }

    /// Scan `year` and append its snapshot.
    ///
    /// A failed traversal records the year as skipped and leaves the
    /// cumulative totals unchanged; the session can continue with later years.
    pub async fn scan_year<S: ObjectSource>(
        &mut self,
        source: &S,
        year: i32,
        observer: &dyn ScanObserver,
    ) -> Result<(), ScanError> {
        if let Some(last) = self.last_year {
            if year <= last {
                return Err(ScanError::OutOfOrder { year, last });
            }
        }
        self.last_year = Some(year);

        tracing::debug!(year, "calculating stats");
        observer.year_started(year, self.previous());
        let start = Instant::now();

        match scan_year_delta(source, &mut self.ledger, year).await {
            Ok(delta) => {
                let stats = accumulate(self.previous(), year, &delta, start.elapsed());
                tracing::debug!(
                    year,
                    commits = delta.commits,
                    trees = delta.trees,
                    blobs = delta.blobs,
                    bytes = delta.compressed_bytes,
                    run_time = ?stats.run_time,
                    "finished calculating stats"
                );
                observer.year_finished(&stats);
                self.series.push(stats);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(year, kind = e.kind(), "skipping year: {}", e);
                observer.year_skipped(year, &e);
                self.skipped.push(SkippedYear {
                    year,
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn finish(self) -> ScanReport {
        ScanReport {
            objects_seen: self.ledger.len(),
            series: self.series,
            skipped: self.skipped,
        }
    }
}

/// Multi-year growth scanner over an object source
pub struct GrowthScanner<S> {
    source: S,
}

impl<S: ObjectSource> GrowthScanner<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Scan every year of `years` in increasing order with a fresh session
    pub async fn scan_years(
        &self,
        years: RangeInclusive<i32>,
        observer: &dyn ScanObserver,
    ) -> ScanReport {
        let mut session = ScanSession::new();
        for year in years {
            // Failures are recorded on the session as skipped years
            let _ = session.scan_year(&self.source, year, observer).await;
        }
        session.finish()
    }
}
