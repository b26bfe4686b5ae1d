//! Lesson plan assembly: the single entry point of the planning core.
//!
//! Assessment results in, a weekly schedule with activities and coaching notes out.
//! Generation is synchronous and shares no state between calls; the only inputs
//! besides the arguments are the clock and the supplied random source.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, instrument};

use crate::activities::build_activities;
use crate::domain::{AssessmentScores, AttemptRecord, LessonPlan, SentencePrompt};
use crate::notes::build_notes;
use crate::planner::build_week;
use crate::seeds::seed_sentences;

pub const RECOMMENDED_FREQUENCY: &str = "daily";

/// Plan generator holding the configurable activity content.
#[derive(Clone, Debug)]
pub struct LessonPlanner {
  sentences: Vec<SentencePrompt>,
}

impl Default for LessonPlanner {
  fn default() -> Self {
    Self { sentences: seed_sentences() }
  }
}

impl LessonPlanner {
  /// Use custom sentence prompts; an empty list falls back to the built-in ones.
  pub fn with_sentences(sentences: Vec<SentencePrompt>) -> Self {
    if sentences.is_empty() { Self::default() } else { Self { sentences } }
  }

  pub fn sentences(&self) -> &[SentencePrompt] {
    &self.sentences
  }

  pub fn generate<R: Rng + ?Sized>(
    &self,
    user_id: &str,
    scores: &AssessmentScores,
    attempts: &[AttemptRecord],
    rng: &mut R,
  ) -> LessonPlan {
    self.generate_at(user_id, scores, attempts, Utc::now(), rng)
  }

  /// Same as `generate` with an explicit start date.
  #[instrument(level = "info", skip(self, scores, attempts, rng), fields(attempts = attempts.len()))]
  pub fn generate_at<R: Rng + ?Sized>(
    &self,
    user_id: &str,
    scores: &AssessmentScores,
    attempts: &[AttemptRecord],
    start_date: DateTime<Utc>,
    rng: &mut R,
  ) -> LessonPlan {
    let weekly_plan = build_week(scores, attempts, rng);
    let activities = build_activities(scores, attempts, &self.sentences);
    let notes = build_notes(scores, attempts);
    let total_duration_minutes = weekly_plan.iter().map(|d| d.total_duration_minutes).sum();

    info!(
      target: "lesson_plan",
      %user_id,
      total_duration_minutes,
      activities = activities.len(),
      notes = notes.len(),
      "Generated lesson plan"
    );

    LessonPlan {
      user_id: user_id.to_string(),
      start_date,
      weekly_plan,
      assessment_results: *scores,
      attempted_words: attempts.to_vec(),
      activities,
      total_duration_minutes,
      recommended_frequency: RECOMMENDED_FREQUENCY.to_string(),
      notes,
    }
  }
}

/// Generate with the built-in content.
pub fn generate<R: Rng + ?Sized>(
  user_id: &str,
  scores: &AssessmentScores,
  attempts: &[AttemptRecord],
  rng: &mut R,
) -> LessonPlan {
  LessonPlanner::default().generate(user_id, scores, attempts, rng)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn plan_totals_and_metadata() {
    let scores = AssessmentScores { accuracy: 55.0, pronunciation: 62.0, fluency: 75.0 };
    let attempts = [AttemptRecord::new("house", 55.0, 62.0, 75.0)];
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    let plan = LessonPlanner::default().generate_at("u7", &scores, &attempts, start, &mut StdRng::seed_from_u64(5));

    assert_eq!(plan.user_id, "u7");
    assert_eq!(plan.start_date, start);
    assert_eq!(plan.recommended_frequency, "daily");
    assert_eq!(plan.attempted_words, attempts.to_vec());
    assert_eq!(plan.assessment_results, scores);
    let sum: u32 = plan.weekly_plan.iter().map(|d| d.total_duration_minutes).sum();
    assert_eq!(plan.total_duration_minutes, sum);
  }

  #[test]
  fn custom_sentences_flow_into_activity() {
    let custom = vec![SentencePrompt { text: "The sun is hot".into(), image_url: "/img/sun.png".into() }];
    let planner = LessonPlanner::with_sentences(custom.clone());
    assert_eq!(planner.sentences(), custom.as_slice());
    assert_eq!(LessonPlanner::with_sentences(Vec::new()).sentences().len(), 3);

    let scores = AssessmentScores { accuracy: 90.0, pronunciation: 90.0, fluency: 50.0 };
    let plan = planner.generate("u1", &scores, &[], &mut StdRng::seed_from_u64(1));
    let sentence = plan.activities.iter().find(|a| a.id == "sentence-1").unwrap();
    assert_eq!(
      sentence.payload,
      crate::domain::ActivityPayload::Sentences { sentences: custom }
    );
  }
}
