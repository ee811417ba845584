//! Display helpers for dates, numbers and long strings.

use chrono::{DateTime, Utc};

/// "Oct 15, 2026"
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Oct 15, 09:30 AM", used for history rows.
pub fn format_date_time(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %I:%M %p").to_string()
}

/// Group the integer part with commas and keep at most three decimals,
/// trailing zeros dropped: `1234.5` -> `"1,234.5"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Cut `s` to `max_chars` characters, appending "..." when shortened.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

pub const DEFAULT_TRUNCATE: usize = 50;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2026, 10, 5, 9, 30, 0).unwrap();
        assert_eq!(format_date(&date), "Oct 5, 2026");
        assert_eq!(format_date_time(&date), "Oct 5, 09:30 AM");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(104.0), "104");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(1_000_000.0), "1,000,000");
        assert_eq!(format_number(-2500.25), "-2,500.25");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("apple", 10), "apple");
        assert_eq!(truncate("chicken biryani", 7), "chicken...");
        assert_eq!(truncate("crème brûlée", 4), "crèm...");
        assert_eq!(truncate("exact", 5), "exact");
    }
}
