//! HTTP router construction.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/get_daily_work", get(api::get_daily_work))
        .route("/api/get_bug_assignment", get(api::get_bug_assignment))
        .route("/api/download_duty_schedule", get(api::download_schedule))
        .route(
            "/api/dingtalk/webhook",
            get(api::webhook_probe).post(api::webhook_message),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use oncall_core::{Person, RosterConfig};
    use oncall_duty::DutyLookupService;
    use oncall_notify::{Notifier, NotifyError};
    use oncall_store::DutyTableStore;

    use super::*;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_text(&self, _content: &str, _at_all: bool) -> Result<(), NotifyError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn channel_name(&self) -> &str {
            "recording"
        }
    }

    fn roster(n: usize) -> Vec<Person> {
        (0..n)
            .map(|i| Person {
                id: i as u32 + 1,
                name: format!("p{}", i),
            })
            .collect()
    }

    fn test_state(dir: &tempfile::TempDir) -> Arc<AppState> {
        let table_path = dir.path().join("duty.csv");
        let notifier = Arc::new(RecordingNotifier::default());
        let lookup = DutyLookupService::new(
            RosterConfig {
                duty: roster(9),
                bug: roster(2),
            },
            DutyTableStore::new(&table_path),
            notifier.clone(),
            "http://localhost:5008/api/download_duty_schedule".to_string(),
        );
        Arc::new(AppState {
            lookup,
            notifier,
            table_path,
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn daily_work_requires_date_param() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir));
        let response = app
            .oneshot(Request::get("/api/get_daily_work").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn daily_work_serves_both_rotations() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        std::fs::write(&state.table_path, "日期,姓名\n2025-01-02,alice\n").unwrap();

        let app = build_router(state);
        let response = app
            .oneshot(
                Request::get("/api/get_daily_work?date=2025-01-02")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["duty_person"], "alice");
        assert_eq!(json["data"]["bug_assignment_person"], "p1");
    }

    #[tokio::test]
    async fn bug_assignment_404_when_roster_empty() {
        let dir = tempfile::tempdir().unwrap();
        let table_path = dir.path().join("duty.csv");
        let notifier = Arc::new(RecordingNotifier::default());
        let lookup = DutyLookupService::new(
            RosterConfig {
                duty: roster(9),
                bug: Vec::new(),
            },
            DutyTableStore::new(&table_path),
            notifier.clone(),
            String::new(),
        );
        let app = build_router(Arc::new(AppState {
            lookup,
            notifier,
            table_path,
        }));

        let response = app
            .oneshot(
                Request::get("/api/get_bug_assignment?date=2025-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bug_assignment_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir));
        let response = app
            .oneshot(
                Request::get("/api/get_bug_assignment?date=2025-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["bug_assignment_person"], "p0");
    }

    #[tokio::test]
    async fn download_404_without_table() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir));
        let response = app
            .oneshot(
                Request::get("/api/download_duty_schedule")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn download_serves_csv_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        std::fs::write(&state.table_path, "日期,姓名\n2025-01-01,alice\n").unwrap();

        let app = build_router(state);
        let response = app
            .oneshot(
                Request::get("/api/download_duty_schedule")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(axum::http::header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
    }

    #[tokio::test]
    async fn webhook_probe_answers_success() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir));
        let response = app
            .oneshot(
                Request::get("/api/dingtalk/webhook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "success");
    }

    #[tokio::test]
    async fn webhook_malformed_payload_gets_friendly_reply() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir));
        let response = app
            .oneshot(
                Request::post("/api/dingtalk/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from("not json at all"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["msgtype"], "text");
    }

    #[tokio::test]
    async fn webhook_duty_keyword_replies_with_arrangement() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        // Cover today so the reply can name someone without regenerating.
        let today = oncall_core::date::today();
        std::fs::write(
            &state.table_path,
            format!("日期,姓名\n{},alice\n", today),
        )
        .unwrap();

        let app = build_router(state);
        let payload = serde_json::json!({
            "msgtype": "text",
            "text": { "content": "今天谁值班" }
        });
        let response = app
            .oneshot(
                Request::post("/api/dingtalk/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let content = json["text"]["content"].as_str().unwrap();
        assert!(content.contains("alice"), "reply was: {}", content);
    }
}
