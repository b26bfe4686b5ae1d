//! Public HTTP request/response structs (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::assessment::WordLevel;
use crate::domain::AttemptRecord;
use crate::phonetics::StressAnalysis;
use crate::progress::CompletionTarget;
use crate::prosody::VoiceQuality;
use crate::store::StoredAssessment;

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct WordsQuery {
    pub difficulty: Option<String>,
}
#[derive(Debug, Serialize)]
pub struct WordsOut {
    pub difficulty: WordLevel,
    pub words: Vec<String>,
    pub next: Option<WordLevel>,
}

/// One recognized utterance: what the recognizer heard for `target`.
#[derive(Debug, Deserialize)]
pub struct ScoreIn {
    pub target: String,
    pub transcript: String,
    pub confidence: f64,
}
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreOut {
    pub attempt: AttemptRecord,
    pub feedback: Vec<String>,
    /// Positional agreement of transcript and target phonemes.
    pub phoneme_accuracy: f64,
}

/// Session upload. Missing session scores are derived from the attempts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentIn {
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub pronunciation: Option<f64>,
    #[serde(default)]
    pub fluency: Option<f64>,
    #[serde(default)]
    pub attempted_words: Vec<AttemptRecord>,
}

/// Stored assessment plus the overall score shown on the results view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentOut {
    #[serde(flatten)]
    pub assessment: StoredAssessment,
    pub average_score: f64,
}

/// Marks an exercise or activity of the current plan as done (or undone).
#[derive(Debug, Deserialize)]
pub struct CompletionIn {
    pub target: CompletionTarget,
    #[serde(default = "completed_by_default")]
    pub completed: bool,
    #[serde(default)]
    pub score: Option<f64>,
}

fn completed_by_default() -> bool {
    true
}

/// Raw analyser samples plus optional timing for rate scoring.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceIn {
    #[serde(default)]
    pub samples: Vec<f64>,
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub word_count: Option<usize>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
}
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceOut {
    pub pitch: f64,
    pub rhythm: f64,
    pub voice: VoiceQuality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words_per_minute: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<StressAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonemes: Option<Vec<String>>,
}
