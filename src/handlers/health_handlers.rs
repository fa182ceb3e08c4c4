//! Health & readiness handlers.
//!
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks the upload buffer directory

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::collections::HashMap;
use tokio::fs;
use uuid::Uuid;

/// `GET /healthz`
///
/// Very small liveness probe — always returns 200 OK with a plain JSON body.
/// This endpoint should be cheap and never perform I/O.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /readyz`
///
/// Performs a best-effort write/read/delete in the temp directory, where
/// uploads are buffered. Storage is not probed.
///
/// HTTP 200 when the check passes, HTTP 503 otherwise.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let temp_dir = &state.intake.temp_dir;
    let tmp_path = temp_dir.join(format!(".readyz-{}", Uuid::new_v4()));

    let temp_check = match state.intake.ensure_temp_dir().await {
        Err(e) => (false, Some(format!("could not create temp dir: {}", e))),
        Ok(_) => match fs::write(&tmp_path, b"readyz").await {
            Ok(_) => match fs::read(&tmp_path).await {
                Ok(bytes) if bytes == b"readyz" => match fs::remove_file(&tmp_path).await {
                    Ok(_) => (true, None::<String>),
                    Err(e) => (true, Some(format!("could not remove tmp file: {}", e))),
                },
                Ok(_) => {
                    let _ = fs::remove_file(&tmp_path).await;
                    (false, Some("file content mismatch".to_string()))
                }
                Err(e) => {
                    let _ = fs::remove_file(&tmp_path).await;
                    (false, Some(format!("could not read tmp file: {}", e)))
                }
            },
            Err(e) => (false, Some(format!("could not write tmp file: {}", e))),
        },
    };

    let overall_ok = temp_check.0;
    let mut checks = HashMap::new();
    checks.insert(
        "temp_dir",
        CheckStatus {
            ok: temp_check.0,
            error: temp_check.1,
        },
    );

    let body = ReadyResponse {
        status: if overall_ok {
            "ok".into()
        } else {
            "error".into()
        },
        checks,
    };

    let status = if overall_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    checks: HashMap<&'static str, CheckStatus>,
}

#[derive(Serialize)]
struct CheckStatus {
    ok: bool,
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::{
        routes::routes::app,
        services::{intake_service::IntakeService, storage_service::StorageService},
        state::AppState,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use std::path::Path;

    fn server_with_temp_dir(temp_dir: &Path) -> TestServer {
        let state = AppState::new(
            IntakeService::new(temp_dir, 1024),
            StorageService::new(reqwest::Client::new(), "http://127.0.0.1:9", "key", "shared"),
        );
        TestServer::new(app(state, None)).unwrap()
    }

    #[tokio::test]
    async fn healthz_is_always_ok() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_with_temp_dir(dir.path());
        let response = server.get("/healthz").await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readyz_passes_with_writable_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_with_temp_dir(&dir.path().join("buffers"));
        let response = server.get("/readyz").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["checks"]["temp_dir"]["ok"], true);
        assert!(std::fs::read_dir(dir.path().join("buffers")).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn readyz_fails_when_temp_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();
        let server = server_with_temp_dir(&blocker);
        let response = server.get("/readyz").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "error");
    }
}
