//! Background announcement loop.
//!
//! A 60-second tick drives the [`AnnouncementScheduler`]; due jobs query
//! the rotations and push a message to the group chat. The loop is started
//! through a one-shot compare-and-set guard so that re-entrant startup
//! paths cannot spawn a second announcer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{info, warn};

use oncall_duty::{announce, AnnouncementScheduler, JobKind};

use crate::state::AppState;

static ANNOUNCER_STARTED: AtomicBool = AtomicBool::new(false);

/// Spawn the announcement loop exactly once per process.
///
/// Returns `false` (without spawning) when the loop is already running.
pub fn spawn_announcer(state: Arc<AppState>, scheduler: AnnouncementScheduler) -> bool {
    if ANNOUNCER_STARTED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        warn!("announcement loop already running, skipping duplicate start");
        return false;
    }

    tokio::spawn(run_announcer(state, scheduler));
    true
}

async fn run_announcer(state: Arc<AppState>, mut scheduler: AnnouncementScheduler) {
    info!("announcement loop started");
    let mut tick = tokio::time::interval(Duration::from_secs(60));
    loop {
        tick.tick().await;
        for job in scheduler.due_jobs(Local::now()) {
            run_job(&state, job).await;
        }
    }
}

async fn run_job(state: &AppState, job: JobKind) {
    let today = oncall_core::date::today();
    let message = match job {
        JobKind::MorningAssignment => match state.lookup.assignment_person(&today) {
            Some(person) => Some(announce::bug_assignment_message(&today, &person)),
            None => {
                info!(date = %today, "no triage assignee, skipping morning announcement");
                None
            }
        },
        JobKind::EveningCombined => {
            let work = state.lookup.daily_work(&today).await;
            let message = announce::combined_message(
                &work.date,
                work.duty_person.as_deref(),
                work.bug_assignment_person.as_deref(),
            );
            if message.is_none() {
                info!(date = %today, "no arrangement found, skipping combined announcement");
            }
            message
        }
    };

    if let Some(message) = message {
        match state.notifier.send_text(&message, true).await {
            Ok(()) => info!(?job, date = %today, "announcement delivered"),
            Err(e) => warn!(
                ?job,
                channel = state.notifier.channel_name(),
                error = %e,
                "announcement delivery failed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use oncall_core::{Person, RosterConfig};
    use oncall_duty::DutyLookupService;
    use oncall_notify::NullNotifier;
    use oncall_store::DutyTableStore;

    use super::*;

    fn test_state(dir: &tempfile::TempDir) -> Arc<AppState> {
        let table_path = dir.path().join("duty.csv");
        let notifier = Arc::new(NullNotifier);
        let lookup = DutyLookupService::new(
            RosterConfig {
                duty: (0..9)
                    .map(|i| Person {
                        id: i + 1,
                        name: format!("p{}", i),
                    })
                    .collect(),
                bug: Vec::new(),
            },
            DutyTableStore::new(&table_path),
            notifier.clone(),
            String::new(),
        );
        Arc::new(AppState {
            lookup,
            notifier,
            table_path,
        })
    }

    #[tokio::test]
    async fn announcer_starts_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let first = AnnouncementScheduler::new("30 8 * * *", "20 17 * * *").unwrap();
        let second = AnnouncementScheduler::new("30 8 * * *", "20 17 * * *").unwrap();

        assert!(spawn_announcer(state.clone(), first));
        assert!(!spawn_announcer(state, second));
    }
}
