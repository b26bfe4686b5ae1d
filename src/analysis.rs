//! Problem detection over per-word attempts.

use tracing::debug;

use crate::domain::{AttemptRecord, ProblemArea, SkillDomain};
use crate::util::fill_template;

/// Scores below this mark a word (or a whole session) as needing work.
pub const PROBLEM_THRESHOLD: f64 = 70.0;

const ARTICULATION_TPL: &str = "Difficulty with word \"{word}\"";
const PRONUNCIATION_TPL: &str = "Pronunciation issues with \"{word}\"";

/// One problem area per weak score, in input order; for the same attempt the
/// articulation problem precedes the pronunciation one. No merging across words.
pub fn analyze(attempts: &[AttemptRecord]) -> Vec<ProblemArea> {
  let mut problems = Vec::new();
  for a in attempts {
    if a.accuracy < PROBLEM_THRESHOLD {
      problems.push(problem(SkillDomain::Articulation, a.accuracy, &a.word, ARTICULATION_TPL));
    }
    if a.pronunciation < PROBLEM_THRESHOLD {
      problems.push(problem(SkillDomain::Pronunciation, a.pronunciation, &a.word, PRONUNCIATION_TPL));
    }
  }
  debug!(target: "lesson_plan", attempts = attempts.len(), problems = problems.len(), "Analyzed attempts");
  problems
}

fn problem(domain: SkillDomain, severity: f64, word: &str, tpl: &str) -> ProblemArea {
  ProblemArea {
    domain,
    severity,
    words: vec![word.to_string()],
    description: fill_template(tpl, &[("word", word)]),
  }
}
