//! Daily-work and bug-assignment query endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use oncall_duty::DailyWork;

use crate::state::AppState;

use super::{error, ErrorBody};

#[derive(Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct DailyWorkResponse {
    pub status: &'static str,
    pub data: DailyWork,
}

/// The day's complete arrangement: duty person plus triage assignee.
pub async fn get_daily_work(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DailyWorkResponse>, (StatusCode, Json<ErrorBody>)> {
    let date = query
        .date
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "缺少日期参数"))?;

    let data = state.lookup.daily_work(&date).await;
    info!(
        date,
        duty = data.duty_person.as_deref().unwrap_or("<none>"),
        assignment = data.bug_assignment_person.as_deref().unwrap_or("<none>"),
        "daily work queried"
    );
    Ok(Json(DailyWorkResponse {
        status: "success",
        data,
    }))
}

#[derive(Serialize)]
pub struct BugAssignmentResponse {
    pub status: &'static str,
    pub data: BugAssignmentData,
}

#[derive(Serialize)]
pub struct BugAssignmentData {
    pub date: String,
    pub bug_assignment_person: String,
}

/// The triage assignee only; 404 when the secondary rotation has nobody.
pub async fn get_bug_assignment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<BugAssignmentResponse>, (StatusCode, Json<ErrorBody>)> {
    let date = query
        .date
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "缺少日期参数"))?;

    match state.lookup.assignment_person(&date) {
        Some(person) => Ok(Json(BugAssignmentResponse {
            status: "success",
            data: BugAssignmentData {
                date,
                bug_assignment_person: person,
            },
        })),
        None => Err(error(
            StatusCode::NOT_FOUND,
            format!("未找到{}的禅道指派人员", date),
        )),
    }
}
