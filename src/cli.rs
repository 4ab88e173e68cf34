use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::report::ReportOptions;

#[derive(Parser, Debug)]
#[command(name = "gitgrowth", about = "Measure and project git repository growth per year")]
pub struct Cli {
    /// Path to the git repository
    #[arg(default_value = ".")]
    pub repo_path: PathBuf,

    /// Log timing and the fit comparison of both estimation models
    #[arg(long)]
    pub debug: bool,

    /// Do not draw the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Print the report as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Give up on a year's traversal after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of most recent complete years to average growth over
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub estimation_years: u32,

    /// Number of years to project forward
    #[arg(long, default_value_t = 6)]
    pub projection_years: usize,

    /// Number of largest files and extensions to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

impl Cli {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            estimation_years: self.estimation_years,
            projection_years: self.projection_years,
            top: self.top,
        }
    }

    pub fn traversal_timeout(&self) -> Option<Duration> {
        self.timeout.filter(|&secs| secs > 0).map(Duration::from_secs)
    }
}
