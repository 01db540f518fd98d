//! Cron schedule for the two daily announcement jobs.
//!
//! Holds the due-check state; the server drives it from a fixed tick loop.
//! Times are wall-clock local, matching how operators configure "08:30".

use std::str::FromStr;

use chrono::{DateTime, Local};
use cron::Schedule;

use oncall_core::OncallError;

/// Which announcement fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Mid-morning: issue-triage assignee.
    MorningAssignment,
    /// End-of-day: combined duty + assignment.
    EveningCombined,
}

struct JobEntry {
    kind: JobKind,
    schedule: Schedule,
    last_run: DateTime<Local>,
}

/// Normalize a 5-field cron expression to the 6-field form the `cron` crate
/// requires by prepending a seconds field.
fn normalize_cron(cron_5field: &str) -> String {
    let trimmed = cron_5field.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// A job is due when a scheduled tick falls in `(last_run, now]`.
fn is_due(schedule: &Schedule, now: DateTime<Local>, last_run: DateTime<Local>) -> bool {
    match schedule.after(&last_run).next() {
        Some(next) => next <= now,
        None => false,
    }
}

/// Tracks when each daily announcement last fired and which are due.
///
/// `last_run` starts at construction time, so a process started mid-day
/// never replays slots that passed before it came up.
pub struct AnnouncementScheduler {
    jobs: Vec<JobEntry>,
}

impl AnnouncementScheduler {
    /// Build from the two configured 5-field cron expressions.
    pub fn new(morning_cron: &str, evening_cron: &str) -> Result<Self, OncallError> {
        Self::new_at(morning_cron, evening_cron, Local::now())
    }

    /// Build with an explicit start instant (deterministic tests).
    pub fn new_at(
        morning_cron: &str,
        evening_cron: &str,
        started: DateTime<Local>,
    ) -> Result<Self, OncallError> {
        let jobs = [
            (JobKind::MorningAssignment, morning_cron),
            (JobKind::EveningCombined, evening_cron),
        ]
        .into_iter()
        .map(|(kind, expr)| {
            let normalized = normalize_cron(expr);
            let schedule = Schedule::from_str(&normalized).map_err(|e| {
                OncallError::Config(format!("invalid cron expression '{}': {}", expr, e))
            })?;
            Ok(JobEntry {
                kind,
                schedule,
                last_run: started,
            })
        })
        .collect::<Result<Vec<_>, OncallError>>()?;

        Ok(Self { jobs })
    }

    /// Jobs due at `now`. Each returned job has its `last_run` advanced, so
    /// a slot fires exactly once.
    pub fn due_jobs(&mut self, now: DateTime<Local>) -> Vec<JobKind> {
        let mut due = Vec::new();
        for job in &mut self.jobs {
            if is_due(&job.schedule, now, job.last_run) {
                job.last_run = now;
                due.push(job.kind);
            }
        }
        due
    }
}
