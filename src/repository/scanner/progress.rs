//! Progress reporting abstraction
//!
//! Decouples the scan session from UI concerns. The spinner runs as its own
//! tokio task fed through a watch channel; it only ever reads scan state.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ScanError;
use crate::model::GrowthStatistics;
use crate::util::{format_number, format_size};

/// Notified as a session moves through the years
pub trait ScanObserver: Send + Sync {
    fn year_started(&self, year: i32, previous: &GrowthStatistics);
    fn year_finished(&self, stats: &GrowthStatistics);
    fn year_skipped(&self, year: i32, error: &ScanError);
}

/// No-op observer for tests and `--no-progress`
pub struct NoopObserver;

impl ScanObserver for NoopObserver {
    fn year_started(&self, _year: i32, _previous: &GrowthStatistics) {}
    fn year_finished(&self, _stats: &GrowthStatistics) {}
    fn year_skipped(&self, _year: i32, _error: &ScanError) {}
}

/// Snapshot of what the spinner line shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub year: i32,
    pub commits: u64,
    pub blobs: u64,
    pub compressed_bytes: u64,
}

impl ProgressState {
    fn line(&self) -> String {
        format!(
            "{}  commits {}  blobs {}  on-disk {}",
            self.year,
            format_number(self.commits),
            format_number(self.blobs),
            format_size(self.compressed_bytes)
        )
    }
}

const TICK_INTERVAL: Duration = Duration::from_millis(125);

/// Indicatif spinner animated by a background task
pub struct SpinnerProgress {
    tx: watch::Sender<ProgressState>,
    task: JoinHandle<()>,
}

impl SpinnerProgress {
    /// Spawn the animation task. Must be called from within a tokio runtime.
    pub fn start() -> Self {
        let (tx, rx) = watch::channel(ProgressState::default());
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} Scanning {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("|/-\\ "),
        );
        let task = tokio::spawn(animate(rx, pb));
        Self { tx, task }
    }

    /// Stop the animation and clear the line
    pub async fn finish(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            tracing::debug!("progress task ended abnormally: {}", e);
        }
    }
}

impl ScanObserver for SpinnerProgress {
    fn year_started(&self, year: i32, previous: &GrowthStatistics) {
        self.tx.send_replace(ProgressState {
            year,
            commits: previous.commits,
            blobs: previous.blobs,
            compressed_bytes: previous.compressed_bytes,
        });
    }

    fn year_finished(&self, stats: &GrowthStatistics) {
        self.tx.send_replace(ProgressState {
            year: stats.year,
            commits: stats.commits,
            blobs: stats.blobs,
            compressed_bytes: stats.compressed_bytes,
        });
    }

    fn year_skipped(&self, _year: i32, _error: &ScanError) {}
}

async fn animate(mut rx: watch::Receiver<ProgressState>, pb: ProgressBar) {
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => pb.tick(),
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let line = rx.borrow_and_update().line();
                pb.set_message(line);
            }
        }
    }
    pb.finish_and_clear();
}
