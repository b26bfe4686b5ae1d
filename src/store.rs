//! Per-user persistence: assessments, the current lesson plan with its
//! completions, and the profile.
//!
//! The planning core never touches storage; handlers go through `AssessmentStore`.
//! `MemoryStore` keeps everything in process memory and loses it on restart:
//!   - assessment history per user, latest last, capped at a fixed length
//!   - the most recent lesson plan per user (a new plan replaces the old one
//!     and discards the old plan's completions)
//!   - one profile per user, created on first update

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{AssessmentScores, AttemptRecord, LessonPlan};
use crate::error::StoreError;
use crate::profile::{ProfileUpdate, UserProfile};
use crate::progress::CompletionRecord;

/// Assessments kept per user by `MemoryStore::new`.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Session scores plus the per-word attempts they were derived from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResults {
    #[serde(flatten)]
    pub scores: AssessmentScores,
    #[serde(default)]
    pub attempted_words: Vec<AttemptRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredAssessment {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub results: AssessmentResults,
}

pub trait AssessmentStore: Send + Sync {
    fn save_assessment(
        &self,
        user_id: &str,
        scores: AssessmentScores,
        attempts: Vec<AttemptRecord>,
    ) -> Result<StoredAssessment, StoreError>;

    fn latest_assessment(&self, user_id: &str) -> Option<StoredAssessment>;

    /// Most recent scores and attempts for a user.
    fn load(&self, user_id: &str) -> Option<(AssessmentScores, Vec<AttemptRecord>)> {
        self.latest_assessment(user_id)
            .map(|a| (a.results.scores, a.results.attempted_words))
    }

    fn save_plan(&self, user_id: &str, plan: LessonPlan) -> Result<(), StoreError>;

    fn load_plan(&self, user_id: &str) -> Option<LessonPlan>;

    /// Store a completion for the current plan, replacing any record with the
    /// same target. Returns all completions of that plan.
    fn record_completion(
        &self,
        user_id: &str,
        record: CompletionRecord,
    ) -> Result<Vec<CompletionRecord>, StoreError>;

    fn completions(&self, user_id: &str) -> Vec<CompletionRecord>;

    /// Apply a partial update, creating the profile if needed.
    fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<UserProfile, StoreError>;

    fn load_profile(&self, user_id: &str) -> Option<UserProfile>;
}

pub struct MemoryStore {
    history_limit: usize,
    assessments: RwLock<HashMap<String, Vec<StoredAssessment>>>,
    plans: RwLock<HashMap<String, LessonPlan>>,
    completions: RwLock<HashMap<String, Vec<CompletionRecord>>>,
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` assessments per user (at least one).
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history_limit: limit.max(1),
            assessments: RwLock::default(),
            plans: RwLock::default(),
            completions: RwLock::default(),
            profiles: RwLock::default(),
        }
    }
}

fn check_user(user_id: &str) -> Result<(), StoreError> {
    if user_id.trim().is_empty() {
        Err(StoreError::EmptyUserId)
    } else {
        Ok(())
    }
}

impl AssessmentStore for MemoryStore {
    #[instrument(level = "debug", skip(self, scores, attempts), fields(attempts = attempts.len()))]
    fn save_assessment(
        &self,
        user_id: &str,
        scores: AssessmentScores,
        attempts: Vec<AttemptRecord>,
    ) -> Result<StoredAssessment, StoreError> {
        check_user(user_id)?;
        let stored = StoredAssessment {
            id: Uuid::new_v4(),
            date: Utc::now(),
            results: AssessmentResults { scores, attempted_words: attempts },
        };
        let mut map = self.assessments.write();
        let history = map.entry(user_id.to_string()).or_default();
        history.push(stored.clone());
        let excess = history.len().saturating_sub(self.history_limit);
        if excess > 0 {
            history.drain(..excess);
        }
        info!(target: "assessment", %user_id, id = %stored.id, history = history.len(), dropped = excess, "Stored assessment");
        Ok(stored)
    }

    fn latest_assessment(&self, user_id: &str) -> Option<StoredAssessment> {
        self.assessments.read().get(user_id).and_then(|h| h.last().cloned())
    }

    #[instrument(level = "debug", skip(self, plan))]
    fn save_plan(&self, user_id: &str, plan: LessonPlan) -> Result<(), StoreError> {
        check_user(user_id)?;
        let mut plans = self.plans.write();
        let replaced = plans.insert(user_id.to_string(), plan).is_some();
        let cleared = self.completions.write().remove(user_id).map_or(0, |c| c.len());
        debug!(target: "lesson_plan", %user_id, replaced, cleared, "Stored lesson plan");
        Ok(())
    }

    fn load_plan(&self, user_id: &str) -> Option<LessonPlan> {
        self.plans.read().get(user_id).cloned()
    }

    #[instrument(level = "debug", skip(self, record), fields(completed = record.completed))]
    fn record_completion(
        &self,
        user_id: &str,
        record: CompletionRecord,
    ) -> Result<Vec<CompletionRecord>, StoreError> {
        check_user(user_id)?;
        // Plan lock first, same order as save_plan.
        let plans = self.plans.read();
        if !plans.contains_key(user_id) {
            return Err(StoreError::NoPlan);
        }
        let mut map = self.completions.write();
        let records = map.entry(user_id.to_string()).or_default();
        records.retain(|r| r.target != record.target);
        records.push(record);
        Ok(records.clone())
    }

    fn completions(&self, user_id: &str) -> Vec<CompletionRecord> {
        self.completions.read().get(user_id).cloned().unwrap_or_default()
    }

    #[instrument(level = "debug", skip(self, update))]
    fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<UserProfile, StoreError> {
        check_user(user_id)?;
        let mut map = self.profiles.write();
        let profile = map
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::new(user_id));
        profile.apply(update);
        Ok(profile.clone())
    }

    fn load_profile(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.read().get(user_id).cloned()
    }
}
