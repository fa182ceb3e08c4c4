//! Defines the routes of the share service.
//!
//! ## Structure
//! - `GET  /`        — landing page with the upload form
//! - `POST /upload`  — upload one file, answer with link + QR code
//! - `GET  /healthz` — liveness
//! - `GET  /readyz`  — readiness (temp dir writable)
//!
//! When a public directory is configured, every other path is served from it.

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        upload_handlers::{index, upload},
    },
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::path::PathBuf;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Build the router carrying `AppState` to all handlers.
///
/// The upload route gets its own body limit sized from `max_upload_bytes`;
/// exact per-file enforcement happens while the file is buffered.
pub fn routes(max_upload_bytes: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES))
        .unwrap_or(usize::MAX);

    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/", get(index))
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(body_limit)),
        )
}

/// Assemble the complete application: routes, state, static fallback and
/// request tracing.
pub fn app(state: AppState, public_dir: Option<PathBuf>) -> Router {
    let mut router = routes(state.intake.max_upload_bytes).with_state(state);

    if let Some(dir) = public_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}
