//! Traversal command boundary
//!
//! Decouples the per-year scanner from the external `git` invocation so the
//! accounting logic can be tested against canned output.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::types::YearWindow;
use crate::error::ScanError;

/// Output format requested from `git cat-file --batch-check`
pub const BATCH_CHECK_FORMAT: &str = "%(objecttype) %(objectname) %(objectsize:disk) %(rest)";

/// Source of object records for a year window
#[allow(async_fn_in_trait)]
pub trait ObjectSource {
    /// Complete, buffered traversal output for the window.
    ///
    /// Only returns `Ok` once the command has finished successfully, so a
    /// caller never sees a partial listing.
    async fn list_objects(&self, window: YearWindow) -> Result<String, ScanError>;
}

/// `git rev-list --objects | git cat-file --batch-check` pipeline
#[derive(Debug, Clone)]
pub struct GitObjectSource {
    repo_path: PathBuf,
    timeout: Option<Duration>,
}

impl GitObjectSource {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            timeout: None,
        }
    }

    /// Kill the pipeline and fail the year if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.repo_path)
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn run_pipeline(&self, window: YearWindow) -> Result<String, ScanError> {
        let mut rev_list = self
            .git()
            .args(["rev-list", "--objects", "--all", "--before"])
            .arg(window.before())
            .arg("--after")
            .arg(window.after())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| ScanError::Spawn { source })?;

        let listing: Stdio = rev_list
            .stdout
            .take()
            .ok_or_else(|| ScanError::Io {
                source: std::io::Error::other("rev-list stdout not captured"),
            })?
            .try_into()
            .map_err(|source| ScanError::Io { source })?;

        let cat_file = self
            .git()
            .arg("cat-file")
            .arg(format!("--batch-check={}", BATCH_CHECK_FORMAT))
            .stdin(listing)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| ScanError::Spawn { source })?;

        let (rev_list, cat_file) =
            tokio::join!(rev_list.wait_with_output(), cat_file.wait_with_output());
        let rev_list = rev_list.map_err(|source| ScanError::Io { source })?;
        let cat_file = cat_file.map_err(|source| ScanError::Io { source })?;

        for output in [&rev_list, &cat_file] {
            if !output.status.success() {
                return Err(ScanError::Exit {
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
        }

        Ok(String::from_utf8_lossy(&cat_file.stdout).into_owned())
    }

    /// Unix time of the last commit touching `path`, if any
    pub async fn last_change(&self, path: &str) -> Option<i64> {
        let output = self
            .git()
            .args(["log", "-1", "--format=%ct", "--"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .output()
            .await
            .ok()?;
        if !output.status.success() {
            return None;
        }
        String::from_utf8_lossy(&output.stdout).trim().parse().ok()
    }
}

impl ObjectSource for GitObjectSource {
    async fn list_objects(&self, window: YearWindow) -> Result<String, ScanError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run_pipeline(window))
                .await
                .map_err(|_| ScanError::Timeout(limit))?,
            None => self.run_pipeline(window).await,
        }
    }
}
