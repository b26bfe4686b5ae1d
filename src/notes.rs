//! Human-readable coaching notes attached to a lesson plan.

use crate::analysis::PROBLEM_THRESHOLD;
use crate::domain::{AssessmentScores, AttemptRecord};
use crate::util::fill_template;

const FOCUS_WORDS_TPL: &str = "Focus on practicing these specific words: {words}";
const ARTICULATION_NOTE: &str = "Focus on clear articulation of individual sounds";
const PRONUNCIATION_NOTE: &str = "Practice mouth positioning and sound formation";
const FLUENCY_NOTE: &str = "Work on smooth speech transitions and breathing techniques";

pub fn build_notes(scores: &AssessmentScores, attempts: &[AttemptRecord]) -> Vec<String> {
  let mut notes = Vec::new();

  let problem_words: Vec<&str> = attempts
    .iter()
    .filter(|a| a.accuracy < PROBLEM_THRESHOLD || a.pronunciation < PROBLEM_THRESHOLD)
    .map(|a| a.word.as_str())
    .collect();
  if !problem_words.is_empty() {
    notes.push(fill_template(FOCUS_WORDS_TPL, &[("words", &problem_words.join(", "))]));
  }

  if scores.accuracy < PROBLEM_THRESHOLD { notes.push(ARTICULATION_NOTE.into()); }
  if scores.pronunciation < PROBLEM_THRESHOLD { notes.push(PRONUNCIATION_NOTE.into()); }
  if scores.fluency < PROBLEM_THRESHOLD { notes.push(FLUENCY_NOTE.into()); }

  notes
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn focus_note_comes_first_then_fixed_order() {
    let scores = AssessmentScores { accuracy: 40.0, pronunciation: 40.0, fluency: 40.0 };
    let attempts = [
      AttemptRecord::new("dog", 30.0, 90.0, 30.0),
      AttemptRecord::new("cat", 95.0, 95.0, 10.0),
      AttemptRecord::new("book", 90.0, 50.0, 90.0),
    ];
    let notes = build_notes(&scores, &attempts);
    assert_eq!(
      notes,
      vec![
        "Focus on practicing these specific words: dog, book".to_string(),
        ARTICULATION_NOTE.to_string(),
        PRONUNCIATION_NOTE.to_string(),
        FLUENCY_NOTE.to_string(),
      ]
    );
  }

  #[test]
  fn only_weak_scores_produce_notes() {
    let scores = AssessmentScores { accuracy: 90.0, pronunciation: 90.0, fluency: 69.0 };
    assert_eq!(build_notes(&scores, &[]), vec![FLUENCY_NOTE.to_string()]);
    let good = AssessmentScores { accuracy: 70.0, pronunciation: 70.0, fluency: 70.0 };
    assert!(build_notes(&good, &[AttemptRecord::new("ball", 70.0, 70.0, 70.0)]).is_empty());
  }
}
