//! Interactive practice activities recommended alongside the weekly schedule.

use crate::analysis::PROBLEM_THRESHOLD;
use crate::domain::{
  ActivityDescriptor, ActivityDifficulty, ActivityKind, ActivityPayload, AssessmentScores, AttemptRecord,
  SentencePrompt,
};

/// Scores below this still benefit from the matching/sentence games.
pub const ACTIVITY_THRESHOLD: f64 = 80.0;
const MAX_ACTIVITY_WORDS: usize = 5;

/// At most one activity of each kind:
/// - matching when pronunciation < 80 (first five attempted words),
/// - pronunciation drill when any word scored pronunciation < 70,
/// - sentence building when fluency < 80.
pub fn build_activities(
  scores: &AssessmentScores,
  attempts: &[AttemptRecord],
  sentences: &[SentencePrompt],
) -> Vec<ActivityDescriptor> {
  let mut activities = Vec::new();

  if scores.pronunciation < ACTIVITY_THRESHOLD {
    activities.push(ActivityDescriptor {
      id: "word-matching-1".into(),
      kind: ActivityKind::Matching,
      title: "Word Recognition".into(),
      description: "Match words with their corresponding pictures".into(),
      difficulty: ActivityDifficulty::Beginner,
      payload: ActivityPayload::Words { words: first_words(attempts.iter()) },
    });
  }

  let challenging: Vec<&AttemptRecord> =
    attempts.iter().filter(|a| a.pronunciation < PROBLEM_THRESHOLD).collect();
  if !challenging.is_empty() {
    activities.push(ActivityDescriptor {
      id: "pronunciation-1".into(),
      kind: ActivityKind::Pronunciation,
      title: "Pronunciation Practice".into(),
      description: "Practice pronouncing challenging words".into(),
      difficulty: ActivityDifficulty::Intermediate,
      payload: ActivityPayload::Words { words: first_words(challenging.into_iter()) },
    });
  }

  if scores.fluency < ACTIVITY_THRESHOLD {
    activities.push(ActivityDescriptor {
      id: "sentence-1".into(),
      kind: ActivityKind::Sentence,
      title: "Sentence Building".into(),
      description: "Create sentences using simple words".into(),
      difficulty: ActivityDifficulty::Intermediate,
      payload: ActivityPayload::Sentences { sentences: sentences.to_vec() },
    });
  }

  activities
}

fn first_words<'a>(attempts: impl Iterator<Item = &'a AttemptRecord>) -> Vec<String> {
  attempts.take(MAX_ACTIVITY_WORDS).map(|a| a.word.clone()).collect()
}
