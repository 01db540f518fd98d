//! Duty lookup with on-miss table regeneration.
//!
//! A lookup walks `Querying -> Found` on a table hit. On a miss it walks
//! `Regenerating -> Requerying -> Found | NotFound`: the stored table is
//! replaced wholesale by a fresh cycle starting at the requested date, the
//! group chat is told the table changed, and the new table is re-queried.
//!
//! The whole read -> maybe-regenerate -> write -> re-read sequence runs
//! under a mutex scoped to the table file: two concurrent misses must not
//! race to overwrite the file and double-announce.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use oncall_core::date::normalize_date_cell;
use oncall_core::{OncallError, RosterConfig};
use oncall_notify::Notifier;
use oncall_store::{DutyTableStore, TableRow};

use crate::announce;

/// Outcome of scanning the stored table for one date.
enum Query {
    /// Row exists; the assignee cell may still be blank.
    Found(Option<String>),
    /// No row carries the date.
    Missing,
}

/// The day's complete arrangement, as served to HTTP callers.
#[derive(Debug, Clone, Serialize)]
pub struct DailyWork {
    pub date: String,
    pub duty_person: Option<String>,
    pub bug_assignment_person: Option<String>,
}

/// Orchestrates duty lookups over the persisted rotation table.
pub struct DutyLookupService {
    rosters: RosterConfig,
    store: DutyTableStore,
    notifier: Arc<dyn Notifier>,
    download_url: String,
    /// Serializes read-then-maybe-regenerate-then-write on the table file.
    table_lock: Mutex<()>,
}

impl DutyLookupService {
    pub fn new(
        rosters: RosterConfig,
        store: DutyTableStore,
        notifier: Arc<dyn Notifier>,
        download_url: String,
    ) -> Self {
        Self {
            rosters,
            store,
            notifier,
            download_url,
            table_lock: Mutex::new(()),
        }
    }

    /// Who is on duty on `date` (canonical `YYYY-MM-DD`).
    ///
    /// A miss regenerates the table starting at `date`, persists it,
    /// announces the refresh, and re-queries. All failures surface as
    /// `None`; nothing propagates to the caller.
    pub async fn duty_person(&self, date: &str) -> Option<String> {
        let _guard = self.table_lock.lock().await;

        match self.query_table(date) {
            Ok(Query::Found(person)) => person,
            Ok(Query::Missing) => {
                warn!(date, "date not in stored table, regenerating schedule");
                self.regenerate_and_requery(date).await
            }
            Err(e) => {
                error!(date, error = %e, "duty lookup aborted");
                None
            }
        }
    }

    /// Who triages issues on `date`. Stateless: computed from the secondary
    /// roster and the fixed epoch, never backed by a table.
    pub fn assignment_person(&self, date: &str) -> Option<String> {
        let target = parse_target_date(date)?;
        oncall_rotation::assigner::assignment_person(&self.rosters.bug, target)
    }

    /// The day's combined arrangement.
    pub async fn daily_work(&self, date: &str) -> DailyWork {
        DailyWork {
            date: date.to_string(),
            duty_person: self.duty_person(date).await,
            bug_assignment_person: self.assignment_person(date),
        }
    }

    fn query_table(&self, date: &str) -> Result<Query, OncallError> {
        let rows = self.store.load()?;
        Ok(search_rows(&rows, date))
    }

    async fn regenerate_and_requery(&self, date: &str) -> Option<String> {
        let start = parse_target_date(date)?;

        let table = match oncall_rotation::generate(&self.rosters.duty, start, None) {
            Ok(table) => table,
            Err(e) => {
                warn!(date, error = %e, "schedule generation rejected");
                return None;
            }
        };

        if let Err(e) = self.store.save(&table) {
            error!(date, error = %e, "failed to persist regenerated table");
            return None;
        }
        info!(date, rows = table.len(), "rotation table regenerated");

        // Deliberate observable side effect: operators must know the table
        // changed shape. Delivery failure does not affect the lookup result.
        let notice = announce::table_refreshed_message(date, &self.download_url);
        if let Err(e) = self.notifier.send_text(&notice, true).await {
            warn!(
                channel = self.notifier.channel_name(),
                error = %e,
                "failed to announce table refresh"
            );
        }

        match self.query_table(date) {
            Ok(Query::Found(person)) => person,
            Ok(Query::Missing) => {
                // Generation always includes the start date, so this is an anomaly.
                error!(date, "date still missing after regeneration");
                None
            }
            Err(e) => {
                error!(date, error = %e, "re-query after regeneration failed");
                None
            }
        }
    }
}

/// Scan raw rows for a normalized-date match against `target`.
fn search_rows(rows: &[TableRow], target: &str) -> Query {
    for row in rows {
        if normalize_date_cell(&row.date) == target {
            let name = row.name.trim();
            return Query::Found(if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            });
        }
    }
    Query::Missing
}

/// Lookup targets arrive as strings; regeneration needs a real date.
fn parse_target_date(date: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            warn!(date, "target date is not YYYY-MM-DD");
            None
        }
    }
}
