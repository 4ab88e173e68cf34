use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use gitgrowth::cli::Cli;
use gitgrowth::report::{GrowthReport, render_text};
use gitgrowth::repository::{
    GitObjectSource, GrowthScanner, NoopObserver, RepositoryInfo, SpinnerProgress, current_year,
};

fn init_tracing(debug: bool) {
    let default = if debug { "gitgrowth=debug,estimation=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    let start = Instant::now();

    let info = RepositoryInfo::locate(&cli.repo_path)?;
    let first_year = info.first_year();
    let current_year = current_year();
    tracing::debug!(
        path = %info.path.display(),
        commits = info.commit_count,
        first_year,
        current_year,
        "located repository"
    );

    let source = GitObjectSource::new(info.path.clone()).with_timeout(cli.traversal_timeout());
    let scanner = GrowthScanner::new(source);

    let years = first_year..=current_year;
    let scan = if cli.no_progress {
        scanner.scan_years(years, &NoopObserver).await
    } else {
        let spinner = SpinnerProgress::start();
        let scan = scanner.scan_years(years, &spinner).await;
        spinner.finish().await;
        scan
    };

    let mut report = GrowthReport::build(info, scan, current_year, &cli.report_options());
    report.resolve_last_changes(scanner.source()).await;
    report.run_time = start.elapsed();
    tracing::debug!(run_time = ?report.run_time, "report ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report).context("Failed to write JSON report")?;
        writeln!(out)?;
    } else {
        render_text(&report, &mut out).context("Failed to write report")?;
    }
    out.flush()?;

    Ok(())
}
