//! Exercise catalog: three fixed templates per skill domain and difficulty tier.
//!
//! The table is process-wide constant data; lookups hand out `'static` slices.

use crate::domain::{ExerciseTemplate, SkillDomain, Tier};
use crate::util::clamp_pct;

const fn t(kind: &'static str, duration_minutes: u32, description: &'static str) -> ExerciseTemplate {
  ExerciseTemplate { kind, duration_minutes, description }
}

const ARTICULATION_EASY: [ExerciseTemplate; 3] = [
  t("word-repetition", 10, "Repeat simple words with target sound"),
  t("sound-isolation", 5, "Practice target sound in isolation"),
  t("minimal-pairs", 10, "Practice similar-sounding words"),
];
const ARTICULATION_MEDIUM: [ExerciseTemplate; 3] = [
  t("sentence-practice", 15, "Use target sounds in simple sentences"),
  t("word-chains", 10, "Create chains of words with target sounds"),
  t("reading-practice", 10, "Read short passages with target sounds"),
];
const ARTICULATION_HARD: [ExerciseTemplate; 3] = [
  t("conversation", 20, "Practice in conversational speech"),
  t("storytelling", 15, "Tell stories using target sounds"),
  t("tongue-twisters", 10, "Practice challenging tongue twisters"),
];

const FLUENCY_EASY: [ExerciseTemplate; 3] = [
  t("breathing", 5, "Deep breathing exercises"),
  t("slow-speech", 10, "Practice speaking slowly and deliberately"),
  t("rhythm-practice", 10, "Speaking with rhythmic patterns"),
];
const FLUENCY_MEDIUM: [ExerciseTemplate; 3] = [
  t("paced-reading", 15, "Read text at a controlled pace"),
  t("delayed-auditory", 10, "Practice with delayed auditory feedback"),
  t("stress-patterns", 10, "Work on speech stress patterns"),
];
const FLUENCY_HARD: [ExerciseTemplate; 3] = [
  t("phone-calls", 15, "Practice phone conversations"),
  t("presentations", 20, "Give short presentations"),
  t("debate-practice", 15, "Engage in structured debates"),
];

const PRONUNCIATION_EASY: [ExerciseTemplate; 3] = [
  t("mirror-practice", 10, "Practice mouth positions using a mirror"),
  t("sound-matching", 10, "Match sounds to pictures"),
  t("syllable-tapping", 5, "Tap out syllables in words"),
];
const PRONUNCIATION_MEDIUM: [ExerciseTemplate; 3] = [
  t("word-stress", 15, "Practice word stress patterns"),
  t("sound-blending", 10, "Blend sounds together smoothly"),
  t("rhythm-matching", 10, "Match speech to rhythmic patterns"),
];
const PRONUNCIATION_HARD: [ExerciseTemplate; 3] = [
  t("rapid-naming", 15, "Quick naming of objects/pictures"),
  t("minimal-pairs-advanced", 15, "Practice subtle sound differences"),
  t("prosody-practice", 15, "Work on intonation and expression"),
];

/// The three templates for a domain at a tier.
pub fn templates(domain: SkillDomain, tier: Tier) -> &'static [ExerciseTemplate] {
  match (domain, tier) {
    (SkillDomain::Articulation, Tier::Easy) => &ARTICULATION_EASY,
    (SkillDomain::Articulation, Tier::Medium) => &ARTICULATION_MEDIUM,
    (SkillDomain::Articulation, Tier::Hard) => &ARTICULATION_HARD,
    (SkillDomain::Fluency, Tier::Easy) => &FLUENCY_EASY,
    (SkillDomain::Fluency, Tier::Medium) => &FLUENCY_MEDIUM,
    (SkillDomain::Fluency, Tier::Hard) => &FLUENCY_HARD,
    (SkillDomain::Pronunciation, Tier::Easy) => &PRONUNCIATION_EASY,
    (SkillDomain::Pronunciation, Tier::Medium) => &PRONUNCIATION_MEDIUM,
    (SkillDomain::Pronunciation, Tier::Hard) => &PRONUNCIATION_HARD,
  }
}

/// `[0,60)` easy, `[60,80)` medium, `[80,100]` hard. Out-of-range scores are
/// clamped first, NaN counts as 0.
pub fn difficulty_tier(score: f64) -> Tier {
  let s = clamp_pct(score);
  if s < 60.0 {
    Tier::Easy
  } else if s < 80.0 {
    Tier::Medium
  } else {
    Tier::Hard
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const DOMAINS: [SkillDomain; 3] = [SkillDomain::Articulation, SkillDomain::Fluency, SkillDomain::Pronunciation];
  const TIERS: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

  #[test]
  fn every_cell_has_three_positive_duration_templates() {
    for d in DOMAINS {
      for tier in TIERS {
        let cell = templates(d, tier);
        assert_eq!(cell.len(), 3, "{:?}/{:?}", d, tier);
        assert!(cell.iter().all(|e| e.duration_minutes > 0 && !e.kind.is_empty()));
      }
    }
  }

  #[test]
  fn tier_boundaries_are_half_open() {
    assert_eq!(difficulty_tier(0.0), Tier::Easy);
    assert_eq!(difficulty_tier(59.0), Tier::Easy);
    assert_eq!(difficulty_tier(59.999), Tier::Easy);
    assert_eq!(difficulty_tier(60.0), Tier::Medium);
    assert_eq!(difficulty_tier(79.0), Tier::Medium);
    assert_eq!(difficulty_tier(80.0), Tier::Hard);
    assert_eq!(difficulty_tier(100.0), Tier::Hard);
  }

  #[test]
  fn tier_is_monotonic_and_total() {
    let mut last = Tier::Easy;
    for i in -20..=140 {
      let tier = difficulty_tier(i as f64);
      assert!(tier >= last);
      last = tier;
    }
    assert_eq!(difficulty_tier(-5.0), Tier::Easy);
    assert_eq!(difficulty_tier(250.0), Tier::Hard);
    assert_eq!(difficulty_tier(f64::NAN), Tier::Easy);
  }
}
