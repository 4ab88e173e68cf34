use std::time::Duration;

/// Format a byte count as a human-readable string (B, KB, MB, GB)
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a count with comma thousands separators
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Milliseconds below one second, whole seconds (and minutes) above
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        return format!("{}ms", duration.as_millis());
    }
    let secs = duration.as_secs_f64().round() as u64;
    if secs >= 60 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

/// Percentage of `value` in `total`, 0 when the total is 0
pub fn percent(value: u64, total: u64) -> f64 {
    if total > 0 {
        value as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Format a Unix timestamp as YYYY-MM-DD string
pub fn format_timestamp(timestamp: i64) -> String {
    use time::OffsetDateTime;
    use time::macros::format_description;

    if timestamp == 0 {
        return "unknown".to_string();
    }

    OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .and_then(|dt| {
            let format = format_description!("[year]-[month]-[day]");
            dt.format(&format).ok()
        })
        .unwrap_or_else(|| "unknown".to_string())
}
