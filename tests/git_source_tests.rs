// Scanning real repositories through the git command line
//
// Tests return early when no git binary is installed.

mod common;

use common::{
    JUNE_2015, JUNE_2020, JUNE_2021, add_commit_at, add_commit_with_times, create_test_repo,
    git_available,
};
use gitgrowth::error::ScanError;
use gitgrowth::model::EstimationMethod;
use gitgrowth::report::{GrowthReport, ReportOptions, render_text};
use gitgrowth::repository::{
    GitObjectSource, GrowthScanner, NoopObserver, ObjectSource, RepositoryInfo, ScanSession,
    YearWindow,
};
use std::time::Duration;
use tempfile::TempDir;

fn two_year_repo() -> (TempDir, std::path::PathBuf, git2::Oid) {
    let (dir, path, repo) = create_test_repo();
    add_commit_at(
        &repo,
        &[("a.txt", b"shared content\n"), ("b.txt", b"first year only\n")],
        "initial",
        JUNE_2020,
    );
    let head = add_commit_at(&repo, &[("c.txt", b"added later\n")], "second", JUNE_2021);
    (dir, path, head)
}

#[tokio::test]
async fn test_shared_blob_counted_in_first_year_only() {
    if !git_available() {
        return;
    }
    let (_dir, path, _) = two_year_repo();

    let scanner = GrowthScanner::new(GitObjectSource::new(&path));
    let report = scanner.scan_years(2020..=2021, &NoopObserver).await;
    assert!(report.skipped.is_empty(), "skipped: {:?}", report.skipped);

    let y2020 = report.series.get(2020).unwrap();
    assert_eq!((y2020.commits, y2020.trees, y2020.blobs), (1, 1, 2));
    assert!(y2020.compressed_bytes > 0);

    let y2021 = report.series.get(2021).unwrap();
    assert_eq!((y2021.commits, y2021.trees, y2021.blobs), (2, 2, 3));
    assert!(y2021.compressed_bytes > y2020.compressed_bytes);

    let a = &y2021.largest_files["a.txt"];
    assert_eq!(a.blob_count, 1);
    assert_eq!(y2021.largest_files.len(), 3);
    assert_eq!(report.objects_seen, 7);
}

#[tokio::test]
async fn test_window_outside_history_is_empty() {
    if !git_available() {
        return;
    }
    let (_dir, path, _) = two_year_repo();

    let output = GitObjectSource::new(&path)
        .list_objects(YearWindow::new(2015))
        .await
        .unwrap();
    assert!(output.trim().is_empty());
}

#[tokio::test]
async fn test_non_repository_fails_the_year() {
    if !git_available() {
        return;
    }
    let dir = TempDir::new().unwrap();

    let report = GrowthScanner::new(GitObjectSource::new(dir.path()))
        .scan_years(2020..=2020, &NoopObserver)
        .await;
    assert!(report.series.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.objects_seen, 0);
}

// The clock is paused, so it jumps to the deadline as soon as the runtime
// idles waiting on the git processes
#[tokio::test(start_paused = true)]
async fn test_timeout_fails_the_year_without_touching_ledger() {
    if !git_available() {
        return;
    }
    let (_dir, path, _) = two_year_repo();
    let source = GitObjectSource::new(&path).with_timeout(Some(Duration::from_millis(1)));

    let mut session = ScanSession::new();
    let err = session
        .scan_year(&source, 2020, &NoopObserver)
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::Timeout(_)));
    assert!(session.ledger().is_empty());
    assert!(session.series().is_empty());

    let report = session.finish();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].year, 2020);
}

#[tokio::test]
async fn test_last_change() {
    if !git_available() {
        return;
    }
    let (_dir, path, _) = two_year_repo();
    let source = GitObjectSource::new(&path);

    assert_eq!(source.last_change("a.txt").await, Some(JUNE_2020));
    assert_eq!(source.last_change("c.txt").await, Some(JUNE_2021));
    assert_eq!(source.last_change("missing.txt").await, None);
}

#[test]
fn test_locate_reads_history_span() {
    let (_dir, path, head) = two_year_repo();

    let info = RepositoryInfo::locate(&path).unwrap();
    assert_eq!(info.commit_count, 2);
    assert_eq!(info.first_commit_time, JUNE_2020);
    assert_eq!(info.last_commit_time, JUNE_2021);
    assert_eq!(info.first_year(), 2020);
    assert_eq!(info.head_oid, head.to_string());
}

#[test]
fn test_first_year_follows_committer_time() {
    // An imported commit: authored in 2015, committed in 2020
    let (_dir, path, repo) = create_test_repo();
    add_commit_with_times(&repo, &[("old.txt", b"imported\n")], "import", JUNE_2015, JUNE_2020);
    add_commit_at(&repo, &[("new.txt", b"later\n")], "second", JUNE_2021);

    let info = RepositoryInfo::locate(&path).unwrap();
    assert_eq!(info.first_commit_time, JUNE_2020);
    assert_eq!(info.first_year(), 2020);
}

#[test]
fn test_locate_rejects_non_repository() {
    let dir = TempDir::new().unwrap();
    assert!(RepositoryInfo::locate(dir.path()).is_err());
}

#[tokio::test]
async fn test_end_to_end_report() {
    if !git_available() {
        return;
    }
    let (_dir, path, _) = two_year_repo();

    let info = RepositoryInfo::locate(&path).unwrap();
    let source = GitObjectSource::new(info.path.clone());
    let scanner = GrowthScanner::new(source);
    let scan = scanner.scan_years(2020..=2022, &NoopObserver).await;

    let mut report = GrowthReport::build(info, scan, 2022, &ReportOptions::default());
    report.resolve_last_changes(scanner.source()).await;

    let estimation = report.estimation.as_ref().unwrap();
    assert_eq!((estimation.window_start, estimation.window_end), (2021, 2021));
    assert_eq!(estimation.average.commits, 1);
    assert_eq!(estimation.comparison.selected.method, EstimationMethod::Linear);
    assert_eq!(estimation.comparison.selected.statistics.commits, 3);
    assert!(report.largest_files.iter().all(|f| f.last_change.is_some()));

    let mut text = Vec::new();
    render_text(&report, &mut text).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.contains("2022^"));
    assert!(text.contains("c.txt"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["current_year"], 2022);
    assert_eq!(json["series"].as_array().map(|a| a.len()), Some(3));
}
