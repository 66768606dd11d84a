//! Date conversion between the link format and form inputs

use tracing::warn;

/// Convert a `DD.MM.YYYY` date to `YYYY-MM-DD`
///
/// Empty input gives an empty string. Input that does not have exactly three
/// dot-separated numeric segments is returned trimmed but otherwise
/// unchanged, so already-ISO dates pass through.
pub fn convert_date_to_iso(date: &str) -> String {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = trimmed.split('.').collect();
    if parts.len() != 3 {
        return trimmed.to_string();
    }

    let parsed: Option<Vec<u32>> = parts.iter().map(|p| p.trim().parse::<u32>().ok()).collect();
    match parsed.as_deref() {
        Some([day, month, year]) => format!("{}-{:02}-{:02}", year, month, day),
        _ => {
            warn!("Invalid date format: {}", date);
            trimmed.to_string()
        }
    }
}
