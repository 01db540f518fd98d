//! Balanced-cycle rotation table generation.
//!
//! The default cycle length is `lcm(roster_size, 7)`: over one full cycle
//! every roster position touches every weekday offset equally often, which
//! is what produces long-run weekend fairness. Regeneration always starts a
//! fresh cycle at the requested date; rotation phase is NOT continuous
//! across regenerations that don't align to exact cycle boundaries (known
//! limitation, inherited from the schedule design).

use chrono::{Datelike, Days, NaiveDate};

use oncall_core::{OncallError, Person, RotationEntry, RotationTable};

/// Minimum staffing floor. Strict round-robin gives each person a duty
/// stride equal to the roster size, so a 5-day minimum gap requires at
/// least 5 people.
pub const MIN_ROSTER_SIZE: usize = 5;

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn lcm(a: u32, b: u32) -> u32 {
    a / gcd(a, b) * b
}

/// Generate a rotation table of `cycle_days` entries starting at `start`.
///
/// `cycle_days` defaults to `lcm(roster_size, 7)`. Entry `i` gets date
/// `start + i`, its calendar weekday, and `roster[i % roster_size]`.
///
/// Rejected with [`OncallError::InsufficientRoster`] when the roster has
/// fewer than [`MIN_ROSTER_SIZE`] people; no table is produced.
pub fn generate(
    roster: &[Person],
    start: NaiveDate,
    cycle_days: Option<u32>,
) -> Result<RotationTable, OncallError> {
    if roster.is_empty() {
        return Err(OncallError::EmptyRoster);
    }
    let people = roster.len();
    if people < MIN_ROSTER_SIZE {
        return Err(OncallError::InsufficientRoster {
            required: MIN_ROSTER_SIZE,
            actual: people,
        });
    }

    let cycle = match cycle_days {
        Some(days) => days,
        None => {
            let days = lcm(people as u32, 7);
            tracing::debug!(people, cycle_days = days, "cycle defaulted to lcm(people, 7)");
            days
        }
    };

    let mut entries = Vec::with_capacity(cycle as usize);
    for i in 0..cycle {
        let date = start
            .checked_add_days(Days::new(i as u64))
            .ok_or_else(|| OncallError::Other(format!("date overflow at {} + {} days", start, i)))?;
        entries.push(RotationEntry {
            date,
            weekday: date.weekday(),
            person: roster[i as usize % people].name.clone(),
        });
    }

    tracing::info!(
        people,
        cycle_days = cycle,
        start = %start,
        "generated rotation table"
    );
    Ok(RotationTable { entries })
}
