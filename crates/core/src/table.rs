//! Generated rotation-table domain types.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One day of the generated rotation: contiguous calendar days, one entry
/// per day, no gaps, no duplicate dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationEntry {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub person: String,
}

/// An ordered run of [`RotationEntry`], always produced in ascending date
/// order by the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationTable {
    pub entries: Vec<RotationEntry>,
}

impl RotationTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookup by exact date.
    pub fn person_on(&self, date: NaiveDate) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.date == date)
            .map(|e| e.person.as_str())
    }
}

/// Chinese weekday label as written to the persisted table (周一..周日).
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "周一",
        Weekday::Tue => "周二",
        Weekday::Wed => "周三",
        Weekday::Thu => "周四",
        Weekday::Fri => "周五",
        Weekday::Sat => "周六",
        Weekday::Sun => "周日",
    }
}

/// Whether a date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_on_matches_exact_date() {
        let table = RotationTable {
            entries: vec![RotationEntry {
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                weekday: Weekday::Wed,
                person: "alice".into(),
            }],
        };
        assert_eq!(
            table.person_on(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            Some("alice")
        );
        assert_eq!(table.person_on(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()), None);
    }

    #[test]
    fn weekend_detection() {
        // 2025-01-04 is a Saturday.
        assert!(is_weekend(NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()));
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()));
    }
}
