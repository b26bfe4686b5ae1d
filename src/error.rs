//! Error types: boundary validation, store failures and their HTTP mapping.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Caller contract violations detected when assessment data enters the system.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
  #[error("{field} must be a finite number, got {value}")]
  NotFinite { field: &'static str, value: f64 },
  #[error("{field} must be within [0, 100], got {value}")]
  OutOfRange { field: &'static str, value: f64 },
  #[error("attempt #{index} has an empty word")]
  EmptyWord { index: usize },
  #[error("confidence must be within [0, 1], got {0}")]
  Confidence(f64),
  #[error("completion score must be a non-negative number, got {0}")]
  CompletionScore(f64),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
  #[error("user id must not be empty")]
  EmptyUserId,
  #[error("no lesson plan on record")]
  NoPlan,
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Validation(#[from] ValidationError),
  #[error(transparent)]
  Store(#[from] StoreError),
  #[error("{0}")]
  BadRequest(String),
  #[error("{0}")]
  NotFound(String),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::Store(StoreError::EmptyUserId) | ApiError::BadRequest(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Store(StoreError::NoPlan) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> axum::response::Response {
    let status = self.status();
    (status, Json(json!({ "message": self.to_string() }))).into_response()
  }
}
