//! Completion tracking against the current lesson plan, and the progress report.
//!
//! A completion names either a scheduled exercise (`day` 1..=7 and its position
//! in that day) or a recommended activity (by id). Re-recording the same target
//! overwrites the earlier record; recording it with `completed: false` undoes it.
//! Completions belong to one plan and are dropped when a new plan replaces it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::LessonPlan;
use crate::error::ValidationError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionTarget {
  Exercise { day: u8, index: usize },
  Activity { id: String },
}

impl CompletionTarget {
  /// Whether `plan` actually contains the target.
  pub fn exists_in(&self, plan: &LessonPlan) -> bool {
    match self {
      CompletionTarget::Exercise { day, index } => plan
        .weekly_plan
        .iter()
        .find(|d| d.day_number == *day)
        .is_some_and(|d| *index < d.exercises.len()),
      CompletionTarget::Activity { id } => plan.activities.iter().any(|a| &a.id == id),
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletionRecord {
  pub target: CompletionTarget,
  pub completed: bool,
  /// Activity result, e.g. words matched; not a percentage.
  pub score: Option<f64>,
  pub timestamp: DateTime<Utc>,
}

impl CompletionRecord {
  pub fn new(target: CompletionTarget, completed: bool, score: Option<f64>) -> Result<Self, ValidationError> {
    if let Some(s) = score {
      if !s.is_finite() || s < 0.0 {
        return Err(ValidationError::CompletionScore(s));
      }
    }
    Ok(Self { target, completed, score, timestamp: Utc::now() })
  }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
  pub start_date: DateTime<Utc>,
  pub completed_exercises: usize,
  pub total_exercises: usize,
  pub completed_activities: usize,
  pub total_activities: usize,
  pub recommendations: Vec<String>,
  /// Share of scheduled exercises completed, in [0, 100].
  pub progress: f64,
}

pub fn build_report(plan: &LessonPlan, completions: &[CompletionRecord]) -> ProgressReport {
  let done = |exercise: bool| {
    completions
      .iter()
      .filter(|c| c.completed && c.target.exists_in(plan))
      .filter(|c| matches!(c.target, CompletionTarget::Exercise { .. }) == exercise)
      .count()
  };
  let total_exercises: usize = plan.weekly_plan.iter().map(|d| d.exercises.len()).sum();
  let completed_exercises = done(true);
  let progress = if total_exercises == 0 {
    0.0
  } else {
    completed_exercises as f64 / total_exercises as f64 * 100.0
  };

  ProgressReport {
    start_date: plan.start_date,
    completed_exercises,
    total_exercises,
    completed_activities: done(false),
    total_activities: plan.activities.len(),
    recommendations: plan.notes.clone(),
    progress,
  }
}
