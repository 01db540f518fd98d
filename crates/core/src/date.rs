//! Tolerant normalization of heterogeneous spreadsheet date cells.
//!
//! Persisted tables come back from humans and spreadsheet tools, so a date
//! cell can be a serial number, any of several textual formats, or garbage.
//! Normalization is best-effort: a cell that matches no rule passes through
//! unchanged so one malformed row never aborts a whole table read.

use chrono::{Days, NaiveDate};

/// Spreadsheet serial day 0 (the 1900 date system with the Lotus leap bug
/// accounted for).
const SPREADSHEET_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Textual formats accepted, tried in order; first match wins.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%m/%d/%Y",
    "%Y年%m月%d日",
    "%m月%d日%Y年",
];

/// Canonical output format.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Normalize a single date cell to `YYYY-MM-DD`.
///
/// Rules, in order:
/// 1. numeric cell -> day offset from 1899-12-30 (fractions truncate),
/// 2. textual cell -> first matching format in [`DATE_FORMATS`],
/// 3. otherwise the cell passes through unchanged (a warning is logged:
///    such a row can never match a normalized lookup target).
pub fn normalize_date_cell(cell: &str) -> String {
    let trimmed = cell.trim();

    if let Some(date) = parse_serial(trimmed) {
        return date.format(CANONICAL_FORMAT).to_string();
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date.format(CANONICAL_FORMAT).to_string();
        }
    }

    tracing::warn!(cell = %trimmed, "date cell matches no known format, passing through unchanged");
    trimmed.to_string()
}

/// Interpret a numeric cell as a spreadsheet serial date.
fn parse_serial(cell: &str) -> Option<NaiveDate> {
    let serial: f64 = cell.parse().ok()?;
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let days = serial.trunc() as u64;
    let (y, m, d) = SPREADSHEET_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_days(Days::new(days))
}

/// Today's date in canonical form.
pub fn today() -> String {
    chrono::Local::now().date_naive().format(CANONICAL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_string_round_trips() {
        assert_eq!(normalize_date_cell("2025-09-20"), "2025-09-20");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_date_cell("2025/09/20");
        let twice = normalize_date_cell(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn serial_number_offsets_from_spreadsheet_epoch() {
        // 1899-12-30 + 45900 days = 2025-09-00 window; verify against chrono.
        let expected = NaiveDate::from_ymd_opt(1899, 12, 30)
            .unwrap()
            .checked_add_days(Days::new(45900))
            .unwrap()
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(normalize_date_cell("45900"), expected);
    }

    #[test]
    fn fractional_serial_truncates() {
        assert_eq!(normalize_date_cell("45900.75"), normalize_date_cell("45900"));
    }

    #[test]
    fn small_serial() {
        // Serial 1 is 1899-12-31 in the 1900 system with the epoch at 12-30.
        assert_eq!(normalize_date_cell("1"), "1899-12-31");
    }

    #[test]
    fn slash_format() {
        assert_eq!(normalize_date_cell("2025/01/05"), "2025-01-05");
    }

    #[test]
    fn us_formats() {
        assert_eq!(normalize_date_cell("09-20-2025"), "2025-09-20");
        assert_eq!(normalize_date_cell("09/20/2025"), "2025-09-20");
    }

    #[test]
    fn chinese_formats() {
        assert_eq!(normalize_date_cell("2025年09月20日"), "2025-09-20");
        assert_eq!(normalize_date_cell("09月20日2025年"), "2025-09-20");
    }

    #[test]
    fn unparseable_cell_passes_through() {
        assert_eq!(normalize_date_cell("next tuesday"), "next tuesday");
        assert_eq!(normalize_date_cell(""), "");
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(normalize_date_cell("  2025-09-20  "), "2025-09-20");
    }

    #[test]
    fn negative_number_is_not_a_serial() {
        assert_eq!(normalize_date_cell("-5"), "-5");
    }
}
