//! Error types for the traversal boundary.

use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Failure to scan one year. Never fatal to a session.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The command could not be started.
    #[error("failed to start traversal command: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    /// The command exited unsuccessfully.
    #[error("traversal command exited with {status}: {stderr}")]
    Exit { status: ExitStatus, stderr: String },

    /// The command did not finish within the configured timeout.
    #[error("traversal command timed out after {0:?}")]
    Timeout(Duration),

    /// Reading the command's output failed.
    #[error("failed to read traversal output: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// A session was asked to scan a year at or before one it already scanned.
    #[error("year {year} requested after {last}; years must be scanned in increasing order")]
    OutOfOrder { year: i32, last: i32 },
}

impl ScanError {
    /// Short label used in logs and the skipped-years list
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::Spawn { .. } => "spawn",
            ScanError::Exit { .. } => "exit",
            ScanError::Timeout(_) => "timeout",
            ScanError::Io { .. } => "io",
            ScanError::OutOfOrder { .. } => "order",
        }
    }
}
