//! Persistence for the duty rotation table.
//!
//! The table lives in a single CSV file with columns `日期` (date, required),
//! `姓名` (name, required) and `周几` (weekday, optional). The file is
//! overwritten wholesale on regeneration; `oncall-duty` is its sole writer.

mod table_file;

pub use table_file::{DutyTableStore, TableRow};
