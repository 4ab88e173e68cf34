use std::io::{self, Write};

use super::{EXTENSION_GROWTH_COLUMNS, GrowthReport, SIGNIFICANT_SHARE};
use crate::model::GrowthStatistics;
use crate::util::{format_duration, format_number, format_size, format_timestamp, percent};

const RULE: &str = "------------------------------------------------------------------------------------------------------------";

fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out)
}

fn count_cell(value: u64, previous: u64, total: u64) -> String {
    format!(
        "{:>11} {:>+9} {:>5.1}%",
        format_number(value),
        value as i128 - previous as i128,
        percent(value, total)
    )
}

fn size_cell(value: u64, previous: u64, total: u64) -> String {
    format!(
        "{:>10} {:>10} {:>5.1}%",
        format_size(value),
        format_size(value.saturating_sub(previous)),
        percent(value, total)
    )
}

fn growth_row(
    out: &mut impl Write,
    label: &str,
    stats: &GrowthStatistics,
    previous: &GrowthStatistics,
    totals: &GrowthStatistics,
) -> io::Result<()> {
    writeln!(
        out,
        "{:<6}│{} │{} │{} │{}",
        label,
        count_cell(stats.commits, previous.commits, totals.commits),
        count_cell(stats.trees, previous.trees, totals.trees),
        count_cell(stats.blobs, previous.blobs, totals.blobs),
        size_cell(stats.compressed_bytes, previous.compressed_bytes, totals.compressed_bytes),
    )
}

/// Render the report as plain-text tables
pub fn render_text(report: &GrowthReport, out: &mut impl Write) -> io::Result<()> {
    section(out, "REPOSITORY")?;
    writeln!(out, "Path                  {}", report.repository.path.display())?;
    writeln!(out, "HEAD                  {}", report.repository.head_oid)?;
    writeln!(
        out,
        "First commit          {}",
        format_timestamp(report.repository.first_commit_time)
    )?;
    writeln!(
        out,
        "Last commit           {}",
        format_timestamp(report.repository.last_commit_time)
    )?;
    writeln!(out, "Commits from HEAD     {}", format_number(report.repository.commit_count as u64))?;

    let Some(totals) = report.totals() else {
        writeln!(out)?;
        writeln!(out, "No year could be scanned.")?;
        return render_skipped(report, out);
    };

    section(out, "HISTORIC AND ESTIMATED GROWTH PER YEAR")?;
    writeln!(
        out,
        "{:<6}│{:>11} {:>9} {:>6} │{:>11} {:>9} {:>6} │{:>11} {:>9} {:>6} │{:>10} {:>10} {:>6}",
        "Year", "Commits", "Δ", "%", "Trees", "Δ", "%", "Blobs", "Δ", "%", "On-disk", "Δ", "%"
    )?;
    writeln!(out, "{}", RULE)?;

    let empty = GrowthStatistics::default();
    let mut previous = &empty;
    for stats in &report.series {
        let label = if stats.year == report.current_year {
            format!("{}^", stats.year)
        } else {
            stats.year.to_string()
        };
        growth_row(out, &label, stats, previous, totals)?;
        previous = stats;
    }

    match &report.estimation {
        Some(estimation) => {
            writeln!(out, "{}", RULE)?;
            if let Some(last) = report.series.at_or_before(estimation.window_end) {
                let mut previous = last;
                for projected in &estimation.projections {
                    growth_row(out, &format!("{}*", projected.year), projected, previous, totals)?;
                    previous = projected;
                }
            }
            writeln!(out, "{}", RULE)?;
            writeln!(out)?;
            writeln!(out, "^ Current year, partial until the year ends")?;
            writeln!(
                out,
                "* Estimated linear growth based on {}-{}",
                estimation.window_start, estimation.window_end
            )?;
            writeln!(out, "% Percentages are relative to the current totals")?;

            let comparison = &estimation.comparison;
            let selected = &comparison.selected;
            section(out, "ESTIMATION")?;
            writeln!(out, "Selected model        {}", selected.method)?;
            writeln!(
                out,
                "Fit (R²)              linear {:.3}, exponential {:.3}",
                comparison.linear_fit, comparison.exponential_fit
            )?;
            writeln!(out, "Mean growth rate      {:.1}% per year", selected.growth_rate * 100.0)?;
            writeln!(
                out,
                "Projected {}        {} commits, {} trees, {} blobs, {} on disk",
                selected.statistics.year,
                format_number(selected.statistics.commits),
                format_number(selected.statistics.trees),
                format_number(selected.statistics.blobs),
                format_size(selected.statistics.compressed_bytes)
            )?;
        }
        None => {
            writeln!(out, "{}", RULE)?;
            writeln!(out, "No growth estimation possible: repository is too young")?;
        }
    }

    render_skipped(report, out)?;
    render_largest_files(report, totals, out)?;
    render_directories(report, out)?;
    render_extensions(report, totals, out)?;
    render_extension_growth(report, out)?;

    writeln!(out)?;
    writeln!(
        out,
        "Finished in {}, {} distinct objects attributed.",
        format_duration(report.run_time),
        format_number(report.objects_seen as u64)
    )
}

fn render_skipped(report: &GrowthReport, out: &mut impl Write) -> io::Result<()> {
    if report.skipped_years.is_empty() {
        return Ok(());
    }
    section(out, "SKIPPED YEARS")?;
    writeln!(
        out,
        "Growth of these years is attributed to the next scanned year, or missing if none followed."
    )?;
    for skipped in &report.skipped_years {
        writeln!(out, "{}  {}", skipped.year, skipped.reason)?;
    }
    Ok(())
}

fn render_largest_files(report: &GrowthReport, totals: &GrowthStatistics, out: &mut impl Write) -> io::Result<()> {
    if report.largest_files.is_empty() {
        return Ok(());
    }
    section(out, "LARGEST FILES")?;
    writeln!(
        out,
        "{:<50} {:>12} {:>10} {:>7} {:>12} {:>7}",
        "File path", "Last change", "Blobs", "%", "On-disk", "%"
    )?;
    writeln!(out, "{}", RULE)?;

    let (mut blobs, mut bytes) = (0, 0);
    for file in &report.largest_files {
        writeln!(
            out,
            "{:<50} {:>12} {:>10} {:>6.1}% {:>12} {:>6.1}%",
            truncate_path(&file.path, 50),
            file.last_change.map(format_timestamp).unwrap_or_else(|| "unknown".to_string()),
            format_number(file.blob_count),
            percent(file.blob_count, totals.blobs),
            format_size(file.compressed_size),
            percent(file.compressed_size, report.total_file_bytes)
        )?;
        blobs += file.blob_count;
        bytes += file.compressed_size;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "{:<50} {:>12} {:>10} {:>6.1}% {:>12} {:>6.1}%",
        format!("├─ Top {}", report.largest_files.len()),
        "",
        format_number(blobs),
        percent(blobs, totals.blobs),
        format_size(bytes),
        percent(bytes, report.total_file_bytes)
    )?;
    writeln!(
        out,
        "{:<50} {:>12} {:>10} {:>6.1}% {:>12} {:>6.1}%",
        format!("└─ Out of {}", format_number(report.tracked_paths as u64)),
        "",
        format_number(totals.blobs),
        100.0,
        format_size(report.total_file_bytes),
        100.0
    )
}

fn render_extensions(report: &GrowthReport, totals: &GrowthStatistics, out: &mut impl Write) -> io::Result<()> {
    if report.extensions.is_empty() {
        return Ok(());
    }
    section(out, "LARGEST FILE EXTENSIONS")?;
    writeln!(
        out,
        "{:<16} {:>10} {:>10} {:>7} {:>12} {:>7}",
        "Extension", "Files", "Blobs", "%", "On-disk", "%"
    )?;
    writeln!(out, "{}", RULE)?;
    for ext in &report.extensions {
        writeln!(
            out,
            "{:<16} {:>10} {:>10} {:>6.1}% {:>12} {:>6.1}%",
            ext.extension,
            format_number(ext.file_count),
            format_number(ext.blob_count),
            percent(ext.blob_count, totals.blobs),
            format_size(ext.compressed_size),
            percent(ext.compressed_size, report.total_file_bytes)
        )?;
    }
    Ok(())
}

fn render_directories(report: &GrowthReport, out: &mut impl Write) -> io::Result<()> {
    let Some(root) = report.directories.first() else {
        return Ok(());
    };
    section(out, "LARGEST DIRECTORIES")?;
    writeln!(
        out,
        "Directories and files holding at least {:.0}% of all file bytes.",
        SIGNIFICANT_SHARE * 100.0
    )?;
    writeln!(out)?;
    writeln!(out, "{:>11} {:>7} {:>12} {:>7}   {}", "Blobs", "%", "On-disk", "%", "Path")?;
    writeln!(out, "{}", RULE)?;
    for entry in &report.directories {
        let indent = "  ".repeat(entry.depth.saturating_sub(1));
        let slash = if entry.is_file { "" } else { "/" };
        writeln!(
            out,
            "{:>11} {:>6.1}% {:>12} {:>6.1}%   {}{}",
            format_number(entry.blob_count),
            percent(entry.blob_count, root.blob_count),
            format_size(entry.compressed_size),
            percent(entry.compressed_size, root.compressed_size),
            indent,
            truncate_path(&format!("{}{}", entry.name, slash), 60)
        )?;
    }
    Ok(())
}

fn render_extension_growth(report: &GrowthReport, out: &mut impl Write) -> io::Result<()> {
    if report.extension_growth.is_empty() {
        return Ok(());
    }
    section(out, "LARGEST FILE EXTENSIONS ON-DISK SIZE GROWTH")?;
    write!(out, "{:<6}", "Year")?;
    for rank in 1..=EXTENSION_GROWTH_COLUMNS {
        write!(out, "│ {:<16}{:>10} ", format!("Extension (#{})", rank), "Growth")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    for year in &report.extension_growth {
        write!(out, "{:<6}", year.year)?;
        for ext in &year.extensions {
            write!(
                out,
                "│ {:<16}{:>10} ",
                truncate_path(&ext.extension, 16),
                format_size(ext.growth)
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Shorten `path` to at most `max` characters by eliding the middle
fn truncate_path(path: &str, max: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= max {
        return path.to_string();
    }
    let half = (max.saturating_sub(3)) / 2;
    let head: String = chars[..half].iter().collect();
    let tail: String = chars[chars.len() - half..].iter().collect();
    format!("{}...{}", head, tail)
}
