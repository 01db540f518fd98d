//! Duty lookup orchestration and daily announcements.
//!
//! This crate provides:
//! - `DutyLookupService`: table lookup with on-miss regeneration
//! - announcement message builders for the daily notifications
//! - the cron schedule driving the two daily announcement jobs

pub mod announce;
pub mod lookup;
pub mod scheduler;

pub use lookup::{DailyWork, DutyLookupService};
pub use scheduler::{AnnouncementScheduler, JobKind};
