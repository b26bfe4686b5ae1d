//! Assessment-side scoring: turning a recognized utterance into an attempt record,
//! aggregating a session, per-word feedback, and the graded word bank.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analysis::PROBLEM_THRESHOLD;
use crate::domain::{AssessmentScores, AttemptRecord};
use crate::error::ValidationError;
use crate::similarity::accuracy_score;
use crate::util::{clamp_pct, mean};

/// Pronunciation is estimated as slightly below word accuracy.
const PRONUNCIATION_FACTOR: f64 = 0.9;
const EXCELLENT_ACCURACY: f64 = 90.0;

/// Score one recognized utterance against its target word. `confidence` is the
/// recognizer's confidence in [0, 1] and drives fluency.
#[instrument(level = "debug", skip_all, fields(word = %target))]
pub fn score_utterance(target: &str, transcript: &str, confidence: f64) -> Result<AttemptRecord, ValidationError> {
  if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
    return Err(ValidationError::Confidence(confidence));
  }
  if target.trim().is_empty() {
    return Err(ValidationError::EmptyWord { index: 0 });
  }
  let accuracy = accuracy_score(transcript, target);
  let record = AttemptRecord {
    word: target.trim().to_string(),
    accuracy,
    pronunciation: accuracy * PRONUNCIATION_FACTOR,
    fluency: clamp_pct(confidence * 100.0),
  };
  debug!(target: "assessment", accuracy = record.accuracy, fluency = record.fluency, "Scored utterance");
  Ok(record)
}

/// Per-field mean over the session. No attempts means all zeros.
pub fn aggregate(attempts: &[AttemptRecord]) -> AssessmentScores {
  let field = |f: fn(&AttemptRecord) -> f64| mean(&attempts.iter().map(f).collect::<Vec<_>>());
  AssessmentScores {
    accuracy: field(|a| a.accuracy),
    pronunciation: field(|a| a.pronunciation),
    fluency: field(|a| a.fluency),
  }
}

/// Mean over attempts of each attempt's three-score average.
pub fn average_score(attempts: &[AttemptRecord]) -> f64 {
  let per_word: Vec<f64> =
    attempts.iter().map(|a| (a.accuracy + a.pronunciation + a.fluency) / 3.0).collect();
  mean(&per_word)
}

/// Immediate feedback shown after a single word.
pub fn attempt_feedback(record: &AttemptRecord) -> Vec<String> {
  let mut out = Vec::new();
  if record.accuracy < PROBLEM_THRESHOLD {
    out.push("Try speaking more clearly and slowly.".to_string());
  }
  if record.pronunciation < PROBLEM_THRESHOLD {
    out.push("Focus on each sound in the word.".to_string());
  }
  if record.fluency < PROBLEM_THRESHOLD {
    out.push("Practice saying the word smoothly without pauses.".to_string());
  }
  if record.accuracy >= EXCELLENT_ACCURACY {
    out.push("Excellent pronunciation!".to_string());
  }
  out
}

/// Assessment word levels, presented in order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WordLevel {
  Simple,
  Moderate,
  Complex,
}

impl WordLevel {
  pub fn next(self) -> Option<WordLevel> {
    match self {
      WordLevel::Simple => Some(WordLevel::Moderate),
      WordLevel::Moderate => Some(WordLevel::Complex),
      WordLevel::Complex => None,
    }
  }

  pub fn parse(s: &str) -> Option<WordLevel> {
    match s.trim().to_ascii_lowercase().as_str() {
      "simple" => Some(WordLevel::Simple),
      "moderate" => Some(WordLevel::Moderate),
      "complex" => Some(WordLevel::Complex),
      _ => None,
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordBank {
  pub simple: Vec<String>,
  pub moderate: Vec<String>,
  pub complex: Vec<String>,
}

impl WordBank {
  pub fn words(&self, level: WordLevel) -> &[String] {
    match level {
      WordLevel::Simple => &self.simple,
      WordLevel::Moderate => &self.moderate,
      WordLevel::Complex => &self.complex,
    }
  }
}
