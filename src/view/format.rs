//! Display formatting for counts, dates and long text.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

/// Placeholder for a missing or unparseable date
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Group digits in threes with commas (en-US style): `100000` -> `"100,000"`
pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Parse the timestamp shapes the API emits.
///
/// Accepts RFC 3339 (`2024-03-05T10:00:00Z`, with offset), naive ISO-8601
/// with optional fractional seconds (`2024-03-05T10:00:00.123456`), and
/// bare dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Short date as `M/D/YYYY`
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_date)
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// Cut `text` to at most `max_chars` characters, appending `...` when
/// anything was removed
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(5), "5");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(100_000), "100,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_date_shapes() {
        assert_eq!(format_date(Some("2024-03-05T10:00:00")), "3/5/2024");
        assert_eq!(format_date(Some("2024-03-05T10:00:00.123456")), "3/5/2024");
        assert_eq!(format_date(Some("2024-12-25T23:59:59+00:00")), "12/25/2024");
        assert_eq!(format_date(Some("2024-01-09")), "1/9/2024");
        assert_eq!(format_date(Some("yesterday")), UNKNOWN_DATE);
        assert_eq!(format_date(None), UNKNOWN_DATE);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");

        let long = "D".repeat(200);
        let cut = truncate(&long, 100);
        assert_eq!(cut, format!("{}...", "D".repeat(100)));

        // Multi-byte characters are counted, not bytes
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
    }
}
