use std::path::PathBuf;
use std::sync::Arc;

use oncall_duty::DutyLookupService;
use oncall_notify::Notifier;

pub struct AppState {
    pub lookup: DutyLookupService,
    pub notifier: Arc<dyn Notifier>,
    /// Path of the persisted table, served by the download endpoint.
    pub table_path: PathBuf,
}
