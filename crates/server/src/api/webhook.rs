//! Inbound DingTalk robot webhook.
//!
//! The robot POSTs every message that @-mentions it; the reply body is
//! itself a robot message. Whatever the payload looks like, the handler
//! answers 200 with a text reply, never an error status: a broken reply
//! would surface as a silent bot in the group.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tracing::{info, warn};

use oncall_duty::DailyWork;

use crate::state::AppState;

const USAGE_REPLY: &str =
    "您好！我是OnCall值班机器人🤖\n\n发送「值班」或「今天谁值班」可以查询今日工作安排";
const ERROR_REPLY: &str = "处理消息时出现错误，请稍后重试";

/// Connectivity probe (the robot console sends a GET when binding).
pub async fn webhook_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "success",
        "message": "webhook连接正常"
    }))
}

/// Handle an @-message: the keyword 值班 gets the day's arrangement,
/// anything else a usage hint.
pub async fn webhook_message(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Json<serde_json::Value> {
    let payload: serde_json::Value = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "malformed webhook payload");
            return Json(text_reply(ERROR_REPLY));
        }
    };

    match extract_text(&payload) {
        Some(content) if content.contains("值班") => {
            info!(content, "duty keyword matched");
            let today = oncall_core::date::today();
            let work = state.lookup.daily_work(&today).await;
            Json(text_reply(&arrangement_reply(&work)))
        }
        _ => Json(text_reply(USAGE_REPLY)),
    }
}

/// Pull the text content out of a robot message payload.
fn extract_text(payload: &serde_json::Value) -> Option<String> {
    if payload.get("msgtype")?.as_str()? != "text" {
        return None;
    }
    let content = payload.get("text")?.get("content")?.as_str()?;
    Some(content.trim().to_string())
}

/// The robot reply envelope.
fn text_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "msgtype": "text",
        "text": { "content": content }
    })
}

fn arrangement_reply(work: &DailyWork) -> String {
    let mut parts = vec![format!("📅 {} 工作安排：", work.date)];
    match &work.duty_person {
        Some(person) => parts.push(format!("🔧 值班人：{}", person)),
        None => parts.push("❌ 未找到值班人员".to_string()),
    }
    if let Some(person) = &work.bug_assignment_person {
        parts.push(format!("🐛 禅道指派：{}", person));
    }
    parts.join("\n")
}
