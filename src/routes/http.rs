//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_words(
  State(state): State<Arc<AppState>>,
  Query(q): Query<WordsQuery>,
) -> Result<Json<WordsOut>, ApiError> {
  let out = words_for_level(&state, q.difficulty.as_deref())?;
  info!(target: "assessment", difficulty = ?out.difficulty, count = out.words.len(), "HTTP word list served");
  Ok(Json(out))
}

#[instrument(level = "info", skip(body), fields(target_word = %body.target))]
pub async fn http_post_score(Json(body): Json<ScoreIn>) -> Result<Json<ScoreOut>, ApiError> {
  let out = score_attempt(&body)?;
  info!(target: "assessment", word = %out.attempt.word, accuracy = %format!("{:.1}", out.attempt.accuracy), "HTTP utterance scored");
  Ok(Json(out))
}

#[instrument(level = "info", skip(body), fields(samples = body.samples.len()))]
pub async fn http_post_voice(Json(body): Json<VoiceIn>) -> impl IntoResponse {
  Json(analyze_voice(&body))
}

#[instrument(level = "info", skip(state, body), fields(%user_id, attempts = body.attempted_words.len()))]
pub async fn http_post_assessment(
  State(state): State<Arc<AppState>>,
  Path(user_id): Path<String>,
  Json(body): Json<AssessmentIn>,
) -> Result<impl IntoResponse, ApiError> {
  let stored = submit_assessment(&state, &user_id, body)?;
  Ok((StatusCode::CREATED, Json(stored)))
}

/// Responds with JSON `null` when the user has no assessment yet.
#[instrument(level = "info", skip(state), fields(%user_id))]
pub async fn http_get_latest_assessment(
  State(state): State<Arc<AppState>>,
  Path(user_id): Path<String>,
) -> impl IntoResponse {
  Json(latest_assessment(&state, &user_id))
}

#[instrument(level = "info", skip(state), fields(%user_id))]
pub async fn http_post_lesson_plan(
  State(state): State<Arc<AppState>>,
  Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  let plan = generate_plan_for_user(&state, &user_id)?;
  info!(target: "lesson_plan", %user_id, total_duration = plan.total_duration_minutes, "HTTP lesson plan generated");
  Ok((StatusCode::CREATED, Json(plan)))
}

#[instrument(level = "info", skip(state), fields(%user_id))]
pub async fn http_get_lesson_plan(
  State(state): State<Arc<AppState>>,
  Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  Ok(Json(stored_plan(&state, &user_id)?))
}

#[instrument(level = "info", skip(state, body), fields(%user_id))]
pub async fn http_post_completion(
  State(state): State<Arc<AppState>>,
  Path(user_id): Path<String>,
  Json(body): Json<CompletionIn>,
) -> Result<impl IntoResponse, ApiError> {
  Ok(Json(record_completion(&state, &user_id, body)?))
}

#[instrument(level = "info", skip(state), fields(%user_id))]
pub async fn http_get_progress(
  State(state): State<Arc<AppState>>,
  Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  let report = progress_report(&state, &user_id)?;
  info!(target: "lesson_plan", %user_id, progress = %format!("{:.1}", report.progress), "HTTP progress report served");
  Ok(Json(report))
}

#[instrument(level = "info", skip(state), fields(%user_id))]
pub async fn http_get_profile(
  State(state): State<Arc<AppState>>,
  Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  Ok(Json(user_profile(&state, &user_id)?))
}

/// Body is taken as raw JSON so unknown keys can be reported as "Invalid updates".
#[instrument(level = "info", skip(state, body), fields(%user_id))]
pub async fn http_patch_profile(
  State(state): State<Arc<AppState>>,
  Path(user_id): Path<String>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
  Ok(Json(update_profile(&state, &user_id, body)?))
}
