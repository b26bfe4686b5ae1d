//! Speech Coach · assessment and lesson-plan backend
//!
//! - Axum HTTP API (assessments, lesson plans, progress, profiles, utterance scoring)
//! - In-memory per-user store (development use; data is lost on restart)
//! - Static SPA fallback (STATIC_DIR/index.html)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   COACH_CONFIG_PATH : path to TOML config (word bank, sentence prompts, seed)
//!   COACH_RNG_SEED    : u64, makes plan generation reproducible
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default), "compact" or "json"
//!   STATIC_DIR        : frontend bundle directory (default ./static)

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use speech_coach::routes::build_router;
use speech_coach::state::AppState;
use speech_coach::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared application state (store, planner content, random source).
  let state = Arc::new(AppState::new());

  let app = build_router(state);

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "speech_coach", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "speech_coach", error = %e, "Failed to listen for Ctrl-C; serving until killed");
    std::future::pending::<()>().await;
  }
  info!(target: "speech_coach", "Shutdown requested, draining connections");
}
