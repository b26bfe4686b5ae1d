//! Spelling-based phonetic helpers: syllable estimation, stress patterns and a rough
//! grapheme-to-phoneme mapping. None of this is real phonetic analysis.

use serde::Serialize;

const DIGRAPHS: [(&str, &str); 4] = [("th", "θ"), ("sh", "ʃ"), ("ch", "tʃ"), ("ng", "ŋ")];
const VOWELS: [(char, &str); 5] = [('a', "æ"), ('e', "ɛ"), ('i', "ɪ"), ('o', "ɒ"), ('u', "ʌ")];

fn is_vowel(c: char) -> bool {
  matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Letters that keep a trailing "e"/"es" audible (`table`, `free`, ...).
fn keeps_final_e(c: char) -> bool {
  c == 'l' || is_vowel(c)
}

/// Drop a silent ending: consonant + "es", "ed", or consonant + "e".
fn strip_silent_suffix(word: &str) -> &str {
  let drop_with_consonant = |stem: &'_ str| -> Option<usize> {
    let c = stem.chars().last()?;
    (!keeps_final_e(c)).then(|| stem.len() - c.len_utf8())
  };
  if let Some(stem) = word.strip_suffix("es") {
    if let Some(end) = drop_with_consonant(stem) {
      return &word[..end];
    }
  }
  if let Some(stem) = word.strip_suffix("ed") {
    return stem;
  }
  if let Some(stem) = word.strip_suffix('e') {
    if let Some(end) = drop_with_consonant(stem) {
      return &word[..end];
    }
  }
  word
}

/// Heuristic syllable count: vowel clusters after removing silent endings and a
/// leading "y". Never less than 1.
pub fn syllable_count(word: &str) -> usize {
  let lower = word.trim().to_lowercase();
  let stem = strip_silent_suffix(&lower);
  let stem = stem.strip_prefix('y').unwrap_or(stem);

  let mut count = 0;
  let mut in_cluster = false;
  for c in stem.chars() {
    let v = is_vowel(c);
    if v && !in_cluster {
      count += 1;
    }
    in_cluster = v;
  }
  count.max(1)
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StressAnalysis {
  pub syllables: usize,
  /// Candidate primary-stress placements ("010" = stress on the second syllable).
  pub expected_patterns: Vec<String>,
}

/// Words longer than four syllables get no candidate patterns.
pub fn stress_patterns(word: &str) -> StressAnalysis {
  let syllables = syllable_count(word);
  let expected_patterns: Vec<String> = if syllables <= 4 {
    (0..syllables)
      .map(|stressed| (0..syllables).map(|i| if i == stressed { '1' } else { '0' }).collect::<String>())
      .collect()
  } else {
    Vec::new()
  };
  StressAnalysis { syllables, expected_patterns }
}

/// Greedy left-to-right mapping; digraphs win over single letters, unknown
/// characters pass through unchanged.
pub fn extract_phonemes(text: &str) -> Vec<String> {
  let chars: Vec<char> = text.chars().collect();
  let mut out = Vec::with_capacity(chars.len());
  let mut i = 0;
  while i < chars.len() {
    if i + 1 < chars.len() {
      let pair: String = chars[i..i + 2].iter().collect();
      if let Some((_, ipa)) = DIGRAPHS.iter().find(|(g, _)| *g == pair) {
        out.push(ipa.to_string());
        i += 2;
        continue;
      }
    }
    let c = chars[i];
    match VOWELS.iter().find(|(g, _)| *g == c) {
      Some((_, ipa)) => out.push(ipa.to_string()),
      None => out.push(c.to_string()),
    }
    i += 1;
  }
  out
}

/// Positional phoneme agreement in [0, 100]. Without a reference, longer
/// productions score higher (10 points per phoneme, capped).
pub fn phoneme_accuracy(phonemes: &[String], expected: Option<&[String]>) -> f64 {
  let Some(expected) = expected else {
    return (phonemes.len() as f64 * 10.0).min(100.0);
  };
  let total = phonemes.len().max(expected.len());
  if total == 0 {
    return 0.0;
  }
  let correct = phonemes.iter().zip(expected).filter(|(a, b)| a == b).count();
  correct as f64 / total as f64 * 100.0
}
