//! Rotation-fairness analysis of a generated table.
//!
//! Pure analysis, no side effects: used to validate generator output in
//! tests and operator tooling. Not invoked by the lookup path.

use std::collections::BTreeMap;

use serde::Serialize;

use oncall_core::{is_weekend, RotationTable};

/// Minimum allowed days between one person's consecutive duty days.
const MIN_GAP_DAYS: i64 = 5;

/// Maximum allowed spread between weekend-duty counts across people.
const MAX_WEEKEND_SPREAD: usize = 1;

/// Per-person duty statistics, computed regardless of pass/fail.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonStats {
    pub total_days: usize,
    pub min_gap: Option<i64>,
    pub max_gap: Option<i64>,
    pub avg_gap: Option<f64>,
    pub weekend_days: usize,
}

/// Result of checking one table against the fairness rules.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    pub passed: bool,
    pub violations: Vec<String>,
    pub stats: BTreeMap<String, PersonStats>,
}

/// A cell that means "nobody covers this day".
fn is_rest_marker(person: &str) -> bool {
    let trimmed = person.trim();
    trimmed.is_empty() || trimmed == "休" || trimmed.eq_ignore_ascii_case("rest")
}

/// Check a rotation table against the fairness rules:
/// every day covered by a real assignee, per-person duty gaps >= 5 days,
/// weekend-duty spread across people <= 1.
pub fn check(table: &RotationTable) -> BalanceReport {
    let mut violations = Vec::new();
    let mut duty_dates: BTreeMap<String, Vec<chrono::NaiveDate>> = BTreeMap::new();

    for entry in &table.entries {
        if is_rest_marker(&entry.person) {
            violations.push(format!("{} has no assignee", entry.date));
            continue;
        }
        duty_dates.entry(entry.person.clone()).or_default().push(entry.date);
    }

    let mut stats = BTreeMap::new();
    for (person, dates) in &mut duty_dates {
        dates.sort_unstable();

        let mut gaps = Vec::with_capacity(dates.len().saturating_sub(1));
        for pair in dates.windows(2) {
            let gap = (pair[1] - pair[0]).num_days();
            if gap < MIN_GAP_DAYS {
                violations.push(format!(
                    "{} duty gap of {} days between {} and {} (minimum {})",
                    person, gap, pair[0], pair[1], MIN_GAP_DAYS
                ));
            }
            gaps.push(gap);
        }

        let weekend_days = dates.iter().filter(|d| is_weekend(**d)).count();
        stats.insert(
            person.clone(),
            PersonStats {
                total_days: dates.len(),
                min_gap: gaps.iter().min().copied(),
                max_gap: gaps.iter().max().copied(),
                avg_gap: if gaps.is_empty() {
                    None
                } else {
                    Some(gaps.iter().sum::<i64>() as f64 / gaps.len() as f64)
                },
                weekend_days,
            },
        );
    }

    // Weekend fairness is a global property, checked across all people.
    let weekend_counts: Vec<usize> = stats.values().map(|s| s.weekend_days).collect();
    if let (Some(max), Some(min)) = (weekend_counts.iter().max(), weekend_counts.iter().min()) {
        if max - min > MAX_WEEKEND_SPREAD {
            violations.push(format!(
                "weekend duty imbalance: max {} vs min {} (allowed spread {})",
                max, min, MAX_WEEKEND_SPREAD
            ));
        }
    }

    BalanceReport {
        passed: violations.is_empty(),
        violations,
        stats,
    }
}
