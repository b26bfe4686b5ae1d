//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Serving the assessment word list per level
//!   - Scoring a single recognized utterance
//!   - Validating and storing a finished assessment session
//!   - Generating (and storing) a lesson plan from the latest assessment
//!   - Recording exercise/activity completions and reporting progress
//!   - Reading and partially updating the user profile
//!   - Coarse voice analysis over analyser samples

use tracing::{debug, info, instrument, warn};

use serde_json::Value;

use crate::assessment::{aggregate, attempt_feedback, average_score, score_utterance, WordLevel};
use crate::domain::{AssessmentScores, LessonPlan};
use crate::error::ApiError;
use crate::phonetics::{extract_phonemes, phoneme_accuracy, stress_patterns};
use crate::profile::{ProfileUpdate, UserProfile};
use crate::progress::{build_report, CompletionRecord, ProgressReport};
use crate::prosody::{normalized_rate, pitch_score, rhythm_score, speech_rate, voice_quality};
use crate::protocol::{AssessmentIn, AssessmentOut, CompletionIn, ScoreIn, ScoreOut, VoiceIn, VoiceOut, WordsOut};
use crate::state::AppState;
use crate::store::StoredAssessment;
use crate::util::{normalize, trunc_for_log};

pub fn words_for_level(state: &AppState, difficulty: Option<&str>) -> Result<WordsOut, ApiError> {
  let level = match difficulty {
    None => WordLevel::Simple,
    Some(raw) => WordLevel::parse(raw)
      .ok_or_else(|| ApiError::BadRequest(format!("Unknown difficulty: {}", trunc_for_log(raw, 32))))?,
  };
  Ok(WordsOut { difficulty: level, words: state.word_bank.words(level).to_vec(), next: level.next() })
}

#[instrument(level = "info", skip(body), fields(target_word = %body.target, transcript_len = body.transcript.len()))]
pub fn score_attempt(body: &ScoreIn) -> Result<ScoreOut, ApiError> {
  let attempt = score_utterance(&body.target, &body.transcript, body.confidence)?;
  let feedback = attempt_feedback(&attempt);
  let heard = extract_phonemes(&normalize(&body.transcript));
  let expected = extract_phonemes(&normalize(&body.target));
  let phoneme_accuracy = phoneme_accuracy(&heard, Some(expected.as_slice()));
  debug!(target: "assessment", transcript = %trunc_for_log(&body.transcript, 64), accuracy = attempt.accuracy, phoneme_accuracy, "Utterance scored");
  Ok(ScoreOut { attempt, feedback, phoneme_accuracy })
}

#[instrument(level = "info", skip(state, body), fields(%user_id, attempts = body.attempted_words.len()))]
pub fn submit_assessment(state: &AppState, user_id: &str, body: AssessmentIn) -> Result<AssessmentOut, ApiError> {
  for (i, a) in body.attempted_words.iter().enumerate() {
    a.validate(i)?;
  }

  let scores = match (body.accuracy, body.pronunciation, body.fluency) {
    (Some(a), Some(p), Some(f)) => AssessmentScores::new(a, p, f)?,
    (a, p, f) => {
      // Fill whatever the client left out from the per-word mean.
      let mean = aggregate(&body.attempted_words);
      AssessmentScores::new(
        a.unwrap_or(mean.accuracy),
        p.unwrap_or(mean.pronunciation),
        f.unwrap_or(mean.fluency),
      )?
    }
  };

  let stored = state.store.save_assessment(user_id, scores, body.attempted_words)?;
  info!(target: "assessment", %user_id, id = %stored.id, accuracy = scores.accuracy, pronunciation = scores.pronunciation, fluency = scores.fluency, "Assessment accepted");
  Ok(with_average(stored))
}

pub fn latest_assessment(state: &AppState, user_id: &str) -> Option<AssessmentOut> {
  state.store.latest_assessment(user_id).map(with_average)
}

fn with_average(assessment: StoredAssessment) -> AssessmentOut {
  let average_score = average_score(&assessment.results.attempted_words);
  AssessmentOut { assessment, average_score }
}

#[instrument(level = "info", skip(state), fields(%user_id))]
pub fn generate_plan_for_user(state: &AppState, user_id: &str) -> Result<LessonPlan, ApiError> {
  let Some((scores, attempts)) = state.store.load(user_id) else {
    warn!(target: "lesson_plan", %user_id, "No assessment on record; cannot build a plan");
    return Err(ApiError::NotFound(format!("No assessment found for user {}", user_id)));
  };
  let plan = state.generate_plan(user_id, &scores, &attempts);
  state.store.save_plan(user_id, plan.clone())?;
  Ok(plan)
}

pub fn stored_plan(state: &AppState, user_id: &str) -> Result<LessonPlan, ApiError> {
  state
    .store
    .load_plan(user_id)
    .ok_or_else(|| ApiError::NotFound(format!("No lesson plan found for user {}", user_id)))
}

/// Record a completion against the stored plan and return the refreshed report.
#[instrument(level = "info", skip(state, body), fields(%user_id, completion = ?body.target))]
pub fn record_completion(state: &AppState, user_id: &str, body: CompletionIn) -> Result<ProgressReport, ApiError> {
  let plan = stored_plan(state, user_id)?;
  if !body.target.exists_in(&plan) {
    return Err(ApiError::BadRequest(format!("Target is not part of the current plan: {:?}", body.target)));
  }
  let record = CompletionRecord::new(body.target, body.completed, body.score)?;
  let completions = state.store.record_completion(user_id, record)?;
  let report = build_report(&plan, &completions);
  info!(target: "lesson_plan", %user_id, completed = report.completed_exercises, total = report.total_exercises, "Completion recorded");
  Ok(report)
}

pub fn progress_report(state: &AppState, user_id: &str) -> Result<ProgressReport, ApiError> {
  let plan = stored_plan(state, user_id)?;
  Ok(build_report(&plan, &state.store.completions(user_id)))
}

pub fn user_profile(state: &AppState, user_id: &str) -> Result<UserProfile, ApiError> {
  state
    .store
    .load_profile(user_id)
    .ok_or_else(|| ApiError::NotFound(format!("No profile found for user {}", user_id)))
}

#[instrument(level = "info", skip(state, body), fields(%user_id))]
pub fn update_profile(state: &AppState, user_id: &str, body: Value) -> Result<UserProfile, ApiError> {
  let update = ProfileUpdate::from_json(body).map_err(|e| {
    warn!(target: "speech_coach", %user_id, error = %e, "Rejected profile update");
    e
  })?;
  let profile = state.store.update_profile(user_id, update)?;
  info!(target: "speech_coach", %user_id, intake = profile.has_completed_intake, "Profile updated");
  Ok(profile)
}

#[instrument(level = "debug", skip(body), fields(samples = body.samples.len()))]
pub fn analyze_voice(body: &VoiceIn) -> VoiceOut {
  let (words_per_minute, rate_score) = match (body.word_count, body.duration_ms) {
    (Some(n), Some(ms)) => {
      let wpm = speech_rate(n, ms);
      (Some(wpm), Some(normalized_rate(wpm)))
    }
    _ => (None, None),
  };
  let word = body.word.as_deref().map(str::trim).filter(|w| !w.is_empty());

  VoiceOut {
    pitch: pitch_score(&body.samples),
    rhythm: rhythm_score(&body.samples),
    voice: voice_quality(&body.samples),
    words_per_minute,
    rate_score,
    stress: word.map(stress_patterns),
    phonemes: word.map(|w| extract_phonemes(&w.to_lowercase())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::AttemptRecord;
  use crate::progress::CompletionTarget;
  use serde_json::json;

  fn body(attempts: Vec<AttemptRecord>) -> AssessmentIn {
    AssessmentIn { accuracy: None, pronunciation: None, fluency: None, attempted_words: attempts }
  }

  #[test]
  fn missing_session_scores_are_aggregated() {
    let state = AppState::default();
    let mut b = body(vec![
      AttemptRecord::new("cat", 100.0, 90.0, 80.0),
      AttemptRecord::new("dog", 50.0, 40.0, 60.0),
    ]);
    b.fluency = Some(10.0);
    let stored = submit_assessment(&state, "u1", b).unwrap();
    assert_eq!(stored.average_score, (90.0 + 50.0) / 2.0);
    assert_eq!(stored.assessment.results.scores, AssessmentScores { accuracy: 75.0, pronunciation: 65.0, fluency: 10.0 });
  }

  #[test]
  fn invalid_attempt_is_rejected_before_storing() {
    let state = AppState::default();
    let err = submit_assessment(&state, "u1", body(vec![AttemptRecord::new("cat", 120.0, 90.0, 80.0)])).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(latest_assessment(&state, "u1").is_none());
  }

  #[test]
  fn plan_requires_an_assessment_and_is_stored() {
    let state = AppState::default();
    assert!(matches!(generate_plan_for_user(&state, "u9"), Err(ApiError::NotFound(_))));

    submit_assessment(&state, "u9", body(vec![AttemptRecord::new("dog", 30.0, 30.0, 30.0)])).unwrap();
    let plan = generate_plan_for_user(&state, "u9").unwrap();
    assert_eq!(plan.weekly_plan.len(), 7);
    assert_eq!(stored_plan(&state, "u9").unwrap(), plan);
  }

  #[test]
  fn completions_update_the_report_and_unknown_targets_are_rejected() {
    let state = AppState::default();
    let target = CompletionTarget::Exercise { day: 1, index: 0 };
    let mark = |target: CompletionTarget, completed| CompletionIn { target, completed, score: None };
    assert!(matches!(record_completion(&state, "u3", mark(target.clone(), true)), Err(ApiError::NotFound(_))));

    submit_assessment(&state, "u3", body(vec![AttemptRecord::new("dog", 30.0, 30.0, 30.0)])).unwrap();
    generate_plan_for_user(&state, "u3").unwrap();
    assert_eq!(progress_report(&state, "u3").unwrap().completed_exercises, 0);

    let report = record_completion(&state, "u3", mark(target.clone(), true)).unwrap();
    assert_eq!(report.completed_exercises, 1);
    assert!(report.progress > 0.0);
    let report = record_completion(&state, "u3", mark(target, false)).unwrap();
    assert_eq!(report.completed_exercises, 0);

    let bogus = mark(CompletionTarget::Exercise { day: 8, index: 0 }, true);
    assert!(matches!(record_completion(&state, "u3", bogus), Err(ApiError::BadRequest(_))));
    let bad_score = CompletionIn { target: CompletionTarget::Activity { id: "sentence-1".into() }, completed: true, score: Some(-2.0) };
    assert!(matches!(record_completion(&state, "u3", bad_score), Err(ApiError::Validation(_))));
  }

  #[test]
  fn profile_updates_only_allowed_fields() {
    let state = AppState::default();
    assert!(matches!(user_profile(&state, "u4"), Err(ApiError::NotFound(_))));
    assert!(matches!(update_profile(&state, "u4", json!({ "password": "x" })), Err(ApiError::BadRequest(_))));
    assert!(user_profile(&state, "u4").is_err());

    let p = update_profile(&state, "u4", json!({ "name": "Sam", "intakeData": { "canRead": true } })).unwrap();
    assert_eq!(p.name, "Sam");
    assert_eq!(user_profile(&state, "u4").unwrap(), p);
  }

  #[test]
  fn score_reports_phoneme_agreement() {
    let exact = score_attempt(&ScoreIn { target: "Thin".into(), transcript: "thin".into(), confidence: 0.9 }).unwrap();
    assert_eq!(exact.phoneme_accuracy, 100.0);
    // θ ɪ n against s ɪ n
    let off = score_attempt(&ScoreIn { target: "thin".into(), transcript: "sin".into(), confidence: 0.9 }).unwrap();
    assert!((off.phoneme_accuracy - 200.0 / 3.0).abs() < 1e-9);
  }

  #[test]
  fn unknown_word_level_is_a_bad_request() {
    let state = AppState::default();
    assert_eq!(words_for_level(&state, None).unwrap().words[0], "cat");
    assert_eq!(words_for_level(&state, Some("moderate")).unwrap().next, Some(WordLevel::Complex));
    assert!(matches!(words_for_level(&state, Some("hsk3")), Err(ApiError::BadRequest(_))));
  }

  #[test]
  fn voice_analysis_reports_rate_only_with_timing() {
    let out = analyze_voice(&VoiceIn { samples: vec![100.0; 20], word: Some("Banana".into()), word_count: None, duration_ms: None });
    assert!(out.words_per_minute.is_none());
    assert_eq!(out.stress.unwrap().syllables, 3);
    assert_eq!(out.rhythm, 100.0);

    let out = analyze_voice(&VoiceIn { samples: vec![], word: None, word_count: Some(9), duration_ms: Some(4000.0) });
    assert_eq!(out.rate_score, Some(100.0));
    assert_eq!(out.pitch, 0.0);
  }
}
