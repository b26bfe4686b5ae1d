//! Router assembly: versioned API, static frontend, CORS, and HTTP tracing.

use std::{path::PathBuf, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

const DEFAULT_STATIC_DIR: &str = "./static";

/// API routes, mounted under `/api/v1`.
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(http::http_health))
        .route("/words", get(http::http_get_words))
        .route("/score", post(http::http_post_score))
        .route("/voice", post(http::http_post_voice))
        .route("/users/:user_id/assessments", post(http::http_post_assessment))
        .route("/users/:user_id/assessments/latest", get(http::http_get_latest_assessment))
        .route(
            "/users/:user_id/lesson-plan",
            get(http::http_get_lesson_plan).post(http::http_post_lesson_plan),
        )
        .route("/users/:user_id/lesson-plan/completions", post(http::http_post_completion))
        .route("/users/:user_id/lesson-plan/progress", get(http::http_get_progress))
        .route(
            "/users/:user_id/profile",
            get(http::http_get_profile).patch(http::http_patch_profile),
        )
}

/// Frontend bundle directory; `STATIC_DIR` overrides the default.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
}

/// Build the application router:
/// - `/api/v1/...` JSON endpoints
/// - SPA fallback to `index.html` for client-side routes
/// - permissive CORS (the frontend may be served from a dev server)
/// - per-request spans with method, path, status and latency
pub fn build_router(state: Arc<AppState>) -> Router {
    let dir = static_dir();
    let spa = ServeDir::new(&dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(dir.join("index.html")));

    Router::new()
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(spa)
}
