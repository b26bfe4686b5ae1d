//! Daily and weekly exercise scheduling.
//!
//! Flow per day:
//! 1) Detect per-word problems and pick ONE random template per problem at the
//!    tier of its score (word-specific remediation stays narrow).
//! 2) Add ALL templates of the pronunciation/fluency tier when the session score
//!    for that skill is weak (general remediation is broad).
//! 3) Shuffle the pool and keep the first 3 or 4 exercises.
//!
//! Every day re-derives the same candidate pool; only order and subset vary.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::analysis::{analyze, PROBLEM_THRESHOLD};
use crate::catalog::{difficulty_tier, templates};
use crate::domain::{AssessmentScores, AttemptRecord, DailyPlan, Exercise, SkillDomain};

pub const DAYS_PER_WEEK: u8 = 7;
const MIN_EXERCISES_PER_DAY: usize = 3;
const MAX_EXERCISES_PER_DAY: usize = 4;

/// Candidate exercise pool for one day, before shuffling and trimming.
pub fn build_daily<R: Rng + ?Sized>(
  scores: &AssessmentScores,
  attempts: &[AttemptRecord],
  rng: &mut R,
) -> Vec<Exercise> {
  let mut exercises = Vec::new();

  for problem in analyze(attempts) {
    let tier = difficulty_tier(problem.severity);
    let pool = templates(problem.domain, tier);
    // Catalog cells are never empty.
    if let Some(template) = pool.choose(rng) {
      debug!(target: "lesson_plan", domain = problem.domain.as_str(), ?tier, kind = template.kind, "Targeted exercise picked");
      let mut ex = Exercise::from(template);
      ex.target_words = Some(problem.words);
      ex.problem_area = Some(problem.description);
      exercises.push(ex);
    }
  }

  if scores.pronunciation < PROBLEM_THRESHOLD {
    let tier = difficulty_tier(scores.pronunciation);
    exercises.extend(templates(SkillDomain::Pronunciation, tier).iter().map(Exercise::from));
  }
  if scores.fluency < PROBLEM_THRESHOLD {
    let tier = difficulty_tier(scores.fluency);
    exercises.extend(templates(SkillDomain::Fluency, tier).iter().map(Exercise::from));
  }

  exercises
}

/// Assemble one day from a freshly built candidate pool.
pub fn build_day<R: Rng + ?Sized>(
  day_number: u8,
  scores: &AssessmentScores,
  attempts: &[AttemptRecord],
  rng: &mut R,
) -> DailyPlan {
  let mut pool = build_daily(scores, attempts, rng);
  let candidates = pool.len();
  pool.shuffle(rng);
  let wanted = rng.gen_range(MIN_EXERCISES_PER_DAY..=MAX_EXERCISES_PER_DAY);
  pool.truncate(wanted);

  let total_duration_minutes = pool.iter().map(|e| e.duration_minutes).sum();
  let focus_areas = pool
    .iter()
    .filter_map(|e| e.problem_area.clone())
    .filter(|s| !s.is_empty())
    .collect();

  debug!(target: "lesson_plan", day = day_number, candidates, chosen = pool.len(), total_duration_minutes, "Built daily plan");
  DailyPlan { day_number, exercises: pool, total_duration_minutes, focus_areas }
}

/// Seven independent days.
#[instrument(level = "debug", skip_all, fields(attempts = attempts.len()))]
pub fn build_week<R: Rng + ?Sized>(
  scores: &AssessmentScores,
  attempts: &[AttemptRecord],
  rng: &mut R,
) -> Vec<DailyPlan> {
  (1..=DAYS_PER_WEEK).map(|day| build_day(day, scores, attempts, rng)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Tier;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn scores(accuracy: f64, pronunciation: f64, fluency: f64) -> AssessmentScores {
    AssessmentScores { accuracy, pronunciation, fluency }
  }

  fn kinds(domain: SkillDomain, tier: Tier) -> Vec<&'static str> {
    templates(domain, tier).iter().map(|t| t.kind).collect()
  }

  #[test]
  fn weak_pronunciation_without_attempts_adds_whole_tier() {
    let mut rng = StdRng::seed_from_u64(1);
    // 59 is easy, 60 would already be medium.
    let pool = build_daily(&scores(90.0, 59.0, 90.0), &[], &mut rng);
    let got: Vec<&str> = pool.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(got, kinds(SkillDomain::Pronunciation, Tier::Easy));
    assert!(pool.iter().all(|e| e.target_words.is_none() && e.problem_area.is_none()));

    let pool = build_daily(&scores(90.0, 60.0, 90.0), &[], &mut rng);
    let got: Vec<&str> = pool.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(got, kinds(SkillDomain::Pronunciation, Tier::Medium));
  }

  #[test]
  fn one_targeted_exercise_per_problem_then_general_blocks() {
    let mut rng = StdRng::seed_from_u64(7);
    let attempts = [AttemptRecord::new("dog", 30.0, 65.0, 30.0)];
    let pool = build_daily(&scores(40.0, 40.0, 40.0), &attempts, &mut rng);
    // articulation(dog) + pronunciation(dog) + 3 pronunciation + 3 fluency
    assert_eq!(pool.len(), 8);

    assert!(kinds(SkillDomain::Articulation, Tier::Easy).contains(&pool[0].kind.as_str()));
    assert_eq!(pool[0].target_words.as_deref(), Some(&["dog".to_string()][..]));
    assert_eq!(pool[0].problem_area.as_deref(), Some("Difficulty with word \"dog\""));

    assert!(kinds(SkillDomain::Pronunciation, Tier::Medium).contains(&pool[1].kind.as_str()));
    assert_eq!(pool[1].problem_area.as_deref(), Some("Pronunciation issues with \"dog\""));

    let tail: Vec<&str> = pool[5..].iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(tail, kinds(SkillDomain::Fluency, Tier::Easy));
  }

  #[test]
  fn strong_session_has_empty_pool_and_empty_days() {
    let mut rng = StdRng::seed_from_u64(3);
    let week = build_week(&scores(95.0, 95.0, 95.0), &[], &mut rng);
    assert_eq!(week.len(), 7);
    assert!(week.iter().all(|d| d.exercises.is_empty() && d.total_duration_minutes == 0));
  }

  #[test]
  fn week_days_are_numbered_and_sized() {
    let mut rng = StdRng::seed_from_u64(42);
    let attempts = [
      AttemptRecord::new("cat", 50.0, 55.0, 80.0),
      AttemptRecord::new("house", 65.0, 90.0, 80.0),
    ];
    let week = build_week(&scores(60.0, 60.0, 50.0), &attempts, &mut rng);
    let numbers: Vec<u8> = week.iter().map(|d| d.day_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
    for day in &week {
      assert!((3..=4).contains(&day.exercises.len()));
      let sum: u32 = day.exercises.iter().map(|e| e.duration_minutes).sum();
      assert_eq!(day.total_duration_minutes, sum);
      let focus: Vec<String> = day.exercises.iter().filter_map(|e| e.problem_area.clone()).collect();
      assert_eq!(day.focus_areas, focus);
    }
  }

  #[test]
  fn small_pool_is_not_padded() {
    let mut rng = StdRng::seed_from_u64(9);
    let attempts = [AttemptRecord::new("ball", 20.0, 95.0, 95.0)];
    let day = build_day(1, &scores(90.0, 90.0, 90.0), &attempts, &mut rng);
    assert_eq!(day.exercises.len(), 1);
    assert_eq!(day.focus_areas, vec!["Difficulty with word \"ball\"".to_string()]);
  }

  #[test]
  fn day_size_is_drawn_from_three_and_four() {
    let attempts = [
      AttemptRecord::new("cat", 45.0, 40.0, 90.0),
      AttemptRecord::new("octopus", 85.0, 55.0, 90.0),
    ];
    let s = scores(64.0, 54.0, 90.0);
    let mut sizes = Vec::new();
    for seed in 0..20 {
      let week = build_week(&s, &attempts, &mut StdRng::seed_from_u64(seed));
      sizes.extend(week.iter().map(|d| d.exercises.len()));
    }
    assert!(sizes.contains(&3));
    assert!(sizes.contains(&4));
    assert!(sizes.iter().all(|n| *n == 3 || *n == 4));
  }

  #[test]
  fn days_are_shuffled_subsets_of_the_same_pool() {
    // No attempts: the pool is deterministic (3 pronunciation then 3 fluency).
    let s = scores(90.0, 50.0, 50.0);
    let pool = build_daily(&s, &[], &mut StdRng::seed_from_u64(0));
    assert_eq!(pool.len(), 6);

    let week = build_week(&s, &[], &mut StdRng::seed_from_u64(21));
    for day in &week {
      assert!(day.exercises.iter().all(|e| pool.contains(e)));
    }
    assert!(week.iter().any(|d| d.exercises[..] != pool[..d.exercises.len()]));
    assert!(week.iter().any(|d| d.exercises != week[0].exercises));
  }

  #[test]
  fn same_seed_same_week() {
    let attempts = [AttemptRecord::new("dog", 30.0, 30.0, 30.0)];
    let s = scores(40.0, 40.0, 40.0);
    let a = build_week(&s, &attempts, &mut StdRng::seed_from_u64(11));
    let b = build_week(&s, &attempts, &mut StdRng::seed_from_u64(11));
    assert_eq!(a, b);
  }
}
