//! Rotation-table download endpoint.

use std::io::ErrorKind;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::state::AppState;

use super::error;

/// Serve the persisted table as a CSV attachment with a dated filename.
pub async fn download_schedule(State(state): State<Arc<AppState>>) -> Response {
    let bytes = match tokio::fs::read(&state.table_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %state.table_path.display(), "download requested but table file is absent");
            return error(StatusCode::NOT_FOUND, "值班计划表文件不存在").into_response();
        }
        Err(e) => {
            warn!(path = %state.table_path.display(), error = %e, "failed to read table file");
            return error(StatusCode::INTERNAL_SERVER_ERROR, "读取值班计划表失败").into_response();
        }
    };

    let filename = format!(
        "duty_schedule_{}.csv",
        chrono::Local::now().format("%Y%m%d")
    );
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}
