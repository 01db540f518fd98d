//! Modular round-robin assignment against a fixed epoch.

use chrono::NaiveDate;

use oncall_core::{OncallError, Person};

/// Fixed epoch for the stateless bug-triage rotation.
pub fn bug_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid epoch date")
}

/// Pick the assignee for `target` from an ordered roster.
///
/// `index = (target - epoch).days mod len(roster)`. Deterministic and pure:
/// identical inputs always yield the identical person. Dates before the
/// epoch wrap via euclidean remainder so the index stays in range.
pub fn assign<'a>(
    roster: &'a [Person],
    target: NaiveDate,
    epoch: NaiveDate,
) -> Result<&'a Person, OncallError> {
    if roster.is_empty() {
        return Err(OncallError::EmptyRoster);
    }
    let days = (target - epoch).num_days();
    let index = days.rem_euclid(roster.len() as i64) as usize;
    Ok(&roster[index])
}

/// Caller-facing wrapper for the secondary rotation: an empty roster is a
/// logged no-op rather than an error (the roster is optional configuration).
pub fn assignment_person(roster: &[Person], target: NaiveDate) -> Option<String> {
    if roster.is_empty() {
        tracing::warn!("bug-triage roster is empty, no assignment computed");
        return None;
    }
    assign(roster, target, bug_epoch())
        .ok()
        .map(|p| p.name.clone())
}
