//! HTTP handlers.

mod download;
mod duty;
mod health;
mod webhook;

pub use download::download_schedule;
pub use duty::{get_bug_assignment, get_daily_work};
pub use health::health;
pub use webhook::{webhook_message, webhook_probe};

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

pub(crate) fn error(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            status: "error",
            message: message.into(),
        }),
    )
}
