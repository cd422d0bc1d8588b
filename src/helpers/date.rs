//! Date helper functions

use chrono::{DateTime, NaiveDate};

/// Long English form used on cards and post headers ("January 10, 2025")
const DISPLAY_FORMAT: &str = "%B %-d, %Y";

/// Parse a calendar date ("2025-01-10") or a full RFC 3339 timestamp
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

/// Format a post date for display
///
/// # Examples
/// ```
/// assert_eq!(noteme::helpers::display_date("2025-01-10"), "January 10, 2025");
/// ```
///
/// Unparseable input is shown as written.
pub fn display_date(s: &str) -> String {
    match parse_date(s) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => {
            tracing::debug!("Unrecognized date {:?}, showing as-is", s);
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2025-01-10"), "January 10, 2025");
        assert_eq!(display_date("2024-12-28"), "December 28, 2024");
        assert_eq!(display_date("2025-03-05T10:00:00Z"), "March 5, 2025");
    }

    #[test]
    fn test_display_date_fallback() {
        assert_eq!(display_date("someday"), "someday");
        assert_eq!(parse_date(""), None);
    }
}
