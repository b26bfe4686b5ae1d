//! Word accuracy scoring: how close a recognized transcript is to the target word.

use crate::util::normalize;

/// Classic Levenshtein distance over chars (insert/delete/substitute cost 1).
pub fn levenshtein(a: &str, b: &str) -> usize {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();
  if a.is_empty() { return b.len(); }
  if b.is_empty() { return a.len(); }

  // Two rolling rows are enough.
  let mut prev: Vec<usize> = (0..=b.len()).collect();
  let mut cur = vec![0usize; b.len() + 1];
  for (i, ca) in a.iter().enumerate() {
    cur[0] = i + 1;
    for (j, cb) in b.iter().enumerate() {
      cur[j + 1] = if ca == cb {
        prev[j]
      } else {
        1 + prev[j].min(prev[j + 1]).min(cur[j])
      };
    }
    std::mem::swap(&mut prev, &mut cur);
  }
  prev[b.len()]
}

/// Accuracy in [0, 100]. Exact match after trim/lowercase is 100; an empty side
/// (with the other non-empty) is 0; otherwise `100 * (1 - d / max_len)`.
pub fn accuracy_score(transcript: &str, target: &str) -> f64 {
  let t = normalize(transcript);
  let g = normalize(target);
  if t == g {
    return 100.0;
  }
  if t.is_empty() || g.is_empty() {
    return 0.0;
  }
  let d = levenshtein(&t, &g) as f64;
  let max_len = t.chars().count().max(g.chars().count()) as f64;
  (100.0 * (1.0 - d / max_len)).max(0.0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  #[test]
  fn distance_matches_known_pairs() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("flaw", "lawn"), 2);
    assert_eq!(levenshtein("same", "same"), 0);
  }

  #[test]
  fn exact_match_ignores_case_and_whitespace() {
    assert_eq!(accuracy_score("  Elephant ", "elephant"), 100.0);
    assert_eq!(accuracy_score("", ""), 100.0);
    assert_eq!(accuracy_score("   ", ""), 100.0);
  }

  #[test]
  fn one_side_empty_scores_zero() {
    assert_eq!(accuracy_score("", "dog"), 0.0);
    assert_eq!(accuracy_score("dog", "  "), 0.0);
  }

  #[test]
  fn partial_match_is_scaled_by_longest_word() {
    // "cap" vs "cat": one substitution over three letters.
    assert_relative_eq!(accuracy_score("cap", "cat"), 100.0 * (2.0 / 3.0), epsilon = 1e-9);
    // Completely different words floor at zero.
    assert_eq!(accuracy_score("xyz", "cat"), 0.0);
  }

  #[test]
  fn score_is_symmetric_and_stateless() {
    for (a, b) in [("butterfly", "butter"), ("octopus", "Octopi"), ("ball", "bowl")] {
      assert_eq!(accuracy_score(a, b), accuracy_score(b, a));
      assert_eq!(accuracy_score(a, b), accuracy_score(a, b));
    }
  }
}
