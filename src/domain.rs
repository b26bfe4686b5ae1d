//! Domain models: attempt records, session scores, exercises, daily/weekly plans,
//! practice activities and the lesson plan aggregate.
//!
//! Wire names follow the frontend's camelCase shape (`weeklyPlan`, `targetWords`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Scores are percentages.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Skill category an exercise or problem belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkillDomain {
  Articulation,
  Fluency,
  Pronunciation,
}

impl SkillDomain {
  pub fn as_str(&self) -> &'static str {
    match self {
      SkillDomain::Articulation => "articulation",
      SkillDomain::Fluency => "fluency",
      SkillDomain::Pronunciation => "pronunciation",
    }
  }
}

/// Difficulty bucket derived from a score (see `catalog::difficulty_tier`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
  Easy,
  Medium,
  Hard,
}

/// One scored utterance of a single target word.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttemptRecord {
  #[serde(alias = "text")]
  pub word: String,
  pub accuracy: f64,
  pub pronunciation: f64,
  pub fluency: f64,
}

impl AttemptRecord {
  pub fn new(word: impl Into<String>, accuracy: f64, pronunciation: f64, fluency: f64) -> Self {
    Self { word: word.into(), accuracy, pronunciation, fluency }
  }

  /// Reject empty words and scores that are not finite percentages.
  pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
    if self.word.trim().is_empty() {
      return Err(ValidationError::EmptyWord { index });
    }
    check_score("accuracy", self.accuracy)?;
    check_score("pronunciation", self.pronunciation)?;
    check_score("fluency", self.fluency)
  }
}

/// Session-level aggregate, typically the mean of the per-word scores.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct AssessmentScores {
  pub accuracy: f64,
  pub pronunciation: f64,
  pub fluency: f64,
}

impl AssessmentScores {
  /// Validated constructor used at the API boundary.
  pub fn new(accuracy: f64, pronunciation: f64, fluency: f64) -> Result<Self, ValidationError> {
    let scores = Self { accuracy, pronunciation, fluency };
    scores.validate()?;
    Ok(scores)
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    check_score("accuracy", self.accuracy)?;
    check_score("pronunciation", self.pronunciation)?;
    check_score("fluency", self.fluency)
  }
}

fn check_score(field: &'static str, value: f64) -> Result<(), ValidationError> {
  if !value.is_finite() {
    return Err(ValidationError::NotFinite { field, value });
  }
  if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
    return Err(ValidationError::OutOfRange { field, value });
  }
  Ok(())
}

/// A per-word deficiency detected in an assessment. Lives only for one generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct ProblemArea {
  pub domain: SkillDomain,
  /// The source score; lower is worse.
  pub severity: f64,
  pub words: Vec<String>,
  pub description: String,
}

/// Static catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExerciseTemplate {
  pub kind: &'static str,
  pub duration_minutes: u32,
  pub description: &'static str,
}

/// An exercise scheduled in a daily plan.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(rename = "duration")]
  pub duration_minutes: u32,
  pub description: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target_words: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub problem_area: Option<String>,
}

impl From<&ExerciseTemplate> for Exercise {
  fn from(t: &ExerciseTemplate) -> Self {
    Exercise {
      kind: t.kind.to_string(),
      duration_minutes: t.duration_minutes,
      description: t.description.to_string(),
      target_words: None,
      problem_area: None,
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
  #[serde(rename = "day")]
  pub day_number: u8,
  pub exercises: Vec<Exercise>,
  #[serde(rename = "totalDuration")]
  pub total_duration_minutes: u32,
  pub focus_areas: Vec<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
  Matching,
  Pronunciation,
  Sentence,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityDifficulty {
  Beginner,
  Intermediate,
  Advanced,
}

/// Sentence-building prompt: a short sentence and the picture that illustrates it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentencePrompt {
  pub text: String,
  #[serde(alias = "image_url")]
  pub image_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ActivityPayload {
  Words { words: Vec<String> },
  Sentences { sentences: Vec<SentencePrompt> },
}

/// Interactive practice activity recommended next to the weekly schedule.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActivityDescriptor {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: ActivityKind,
  pub title: String,
  pub description: String,
  pub difficulty: ActivityDifficulty,
  #[serde(flatten)]
  pub payload: ActivityPayload,
}

/// Root aggregate returned by plan generation. Never mutated after construction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlan {
  pub user_id: String,
  pub start_date: DateTime<Utc>,
  pub weekly_plan: Vec<DailyPlan>,
  pub assessment_results: AssessmentScores,
  pub attempted_words: Vec<AttemptRecord>,
  pub activities: Vec<ActivityDescriptor>,
  #[serde(rename = "totalDuration")]
  pub total_duration_minutes: u32,
  pub recommended_frequency: String,
  pub notes: Vec<String>,
}
