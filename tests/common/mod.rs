// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use git2::{Repository, Signature, Time};
use gitgrowth::error::ScanError;
use gitgrowth::model::GrowthStatistics;
use gitgrowth::repository::{ObjectSource, YearWindow};
use rustc_hash::FxHashMap;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

// Mid-year timestamps, far from any window boundary
pub const JUNE_2015: i64 = 1434326400;
pub const JUNE_2020: i64 = 1592179200;
pub const JUNE_2021: i64 = 1623715200;

/// True when a `git` binary is available on PATH
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Create an empty temporary git repository
pub fn create_test_repo() -> (TempDir, PathBuf, Repository) {
    let dir = TempDir::new().unwrap();
    let repo_path = dir.path().to_path_buf();
    let repo = Repository::init(&repo_path).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (dir, repo_path, repo)
}

/// Write files, stage them and commit with author and committer time `when`
pub fn add_commit_at(
    repo: &Repository,
    files: &[(&str, &[u8])],
    message: &str,
    when: i64,
) -> git2::Oid {
    add_commit_with_times(repo, files, message, when, when)
}

/// Like [`add_commit_at`] with distinct author and committer times
pub fn add_commit_with_times(
    repo: &Repository,
    files: &[(&str, &[u8])],
    message: &str,
    author_time: i64,
    committer_time: i64,
) -> git2::Oid {
    let author = Signature::new("Test User", "test@example.com", &Time::new(author_time, 0)).unwrap();
    let committer =
        Signature::new("Test User", "test@example.com", &Time::new(committer_time, 0)).unwrap();
    let mut index = repo.index().unwrap();

    for (path, content) in files {
        let full_path = repo.workdir().unwrap().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full_path, content).unwrap();
        index.add_path(std::path::Path::new(path)).unwrap();
    }

    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &author, &committer, message, &tree, &parents)
        .unwrap()
}

/// Canned per-year outcome for [`FakeSource`]
#[derive(Debug, Clone)]
pub enum Canned {
    Output(String),
    TimedOut,
    Failed,
}

/// Object source replaying canned traversal output
#[derive(Debug, Default)]
pub struct FakeSource {
    years: FxHashMap<i32, Canned>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(mut self, year: i32, lines: &[&str]) -> Self {
        let mut output = lines.join("\n");
        output.push('\n');
        self.years.insert(year, Canned::Output(output));
        self
    }

    pub fn failing(mut self, year: i32, canned: Canned) -> Self {
        self.years.insert(year, canned);
        self
    }
}

impl ObjectSource for FakeSource {
    async fn list_objects(&self, window: YearWindow) -> Result<String, ScanError> {
        match self.years.get(&window.year) {
            Some(Canned::Output(output)) => Ok(output.clone()),
            Some(Canned::TimedOut) => Err(ScanError::Timeout(Duration::from_secs(5))),
            Some(Canned::Failed) => Err(ScanError::Io {
                source: std::io::Error::other("broken pipe"),
            }),
            None => Ok(String::new()),
        }
    }
}

/// Cumulative statistics with no per-path data
pub fn stats(year: i32, commits: u64, trees: u64, blobs: u64, bytes: u64) -> GrowthStatistics {
    GrowthStatistics::new(year, commits, trees, blobs, bytes)
}
