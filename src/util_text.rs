use chrono::{DateTime, Local, TimeZone};

/// Format a byte count with 1000-based units.
/// Examples: "0 Bytes", "512 Bytes", "1.50 KB", "2.00 MB"
pub fn format_file_length(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} Bytes")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Shorten a hash for tables: first 10 chars plus "..."
pub fn short_hash(hash: &str) -> String {
    match hash.char_indices().nth(10) {
        Some((idx, _)) => format!("{}...", &hash[..idx]),
        None => hash.to_string(),
    }
}

/// Epoch milliseconds as local `dd/mm/YYYY HH:MM:SS`.
pub fn format_epoch_ms(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => format_local(&dt),
        None => format!("{ms}"),
    }
}

pub fn format_local(dt: &DateTime<Local>) -> String {
    dt.format("%d/%m/%Y %H:%M:%S").to_string()
}

/// Truncate to `max` chars with a trailing ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
