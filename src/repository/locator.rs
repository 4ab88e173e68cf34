//! Repository locator
//!
//! Opens the repository and finds the span of history to scan.

use anyhow::{Context, Result};
use gix::ObjectId;
use gix::prelude::FindExt;
use serde::Serialize;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Basic facts about the repository being analysed
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryInfo {
    pub path: PathBuf,
    pub head_oid: String,
    pub commit_count: usize,
    /// Earliest committer time among commits reachable from HEAD
    pub first_commit_time: i64,
    /// Latest committer time among commits reachable from HEAD
    pub last_commit_time: i64,
}

impl RepositoryInfo {
    /// Open the repository at `path` and walk HEAD's history
    pub fn locate(path: &Path) -> Result<Self> {
        let repo = gix::open(path).context("Failed to open git repository")?;
        let head_commit = repo.head_commit().context("Failed to get HEAD commit")?;
        let head_oid = head_commit.id();
        let head_hex = head_oid.to_hex().to_string();

        let commits = collect_commits(&repo, head_oid.into())?;
        let (first, last) = commit_time_span(&repo, &commits)
            .context("No readable commits reachable from HEAD")?;

        let path = std::fs::canonicalize(path)
            .with_context(|| format!("Could not resolve path: {}", path.display()))?;

        Ok(Self {
            path,
            head_oid: head_hex,
            commit_count: commits.len(),
            first_commit_time: first,
            last_commit_time: last,
        })
    }

    /// Calendar year (UTC) of the first commit
    pub fn first_year(&self) -> i32 {
        year_of(self.first_commit_time)
    }
}

/// Calendar year (UTC) of a unix timestamp; falls back to the current year
pub fn year_of(timestamp: i64) -> i32 {
    OffsetDateTime::from_unix_timestamp(timestamp)
        .map(|dt| dt.year())
        .unwrap_or_else(|_| current_year())
}

pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

/// Collect all commits reachable from `head` via revwalk
fn collect_commits(repo: &gix::Repository, head: ObjectId) -> Result<Vec<ObjectId>> {
    let mut commits: Vec<ObjectId> = Vec::new();
    let walk = repo.rev_walk([head]);
    for commit_info in walk.all()? {
        let commit_info = commit_info?;
        commits.push(commit_info.id);
    }
    Ok(commits)
}

/// Earliest and latest committer time among `commits`.
///
/// Committer time is what `rev-list --after/--before` filters on.
fn commit_time_span(repo: &gix::Repository, commits: &[ObjectId]) -> Option<(i64, i64)> {
    let odb = &repo.objects;
    let mut buf = Vec::new();
    let mut span: Option<(i64, i64)> = None;

    for oid in commits {
        let commit = match odb.find_commit(oid, &mut buf) {
            Ok(c) => c,
            Err(_) => continue,
        };
        let committer = match commit.committer() {
            Ok(sig) => sig,
            Err(_) => continue,
        };
        let seconds = committer.seconds();
        span = Some(match span {
            Some((first, last)) => (first.min(seconds), last.max(seconds)),
            None => (seconds, seconds),
        });
    }

    span
}
