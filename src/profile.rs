//! User profile and intake questionnaire.
//!
//! Profiles are partially updated from client JSON. Only `name`,
//! `hasCompletedIntake` and `intakeData` may be written; any other key rejects
//! the whole update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

pub const UPDATABLE_FIELDS: [&str; 3] = ["name", "hasCompletedIntake", "intakeData"];

/// Answers from the intake form filled in by a parent or therapist.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntakeData {
  #[serde(default)]
  pub child_name: Option<String>,
  #[serde(default)]
  pub child_age: Option<u32>,
  #[serde(default)]
  pub can_read: Option<bool>,
  #[serde(default)]
  pub preferred_learning_style: Vec<String>,
  #[serde(default)]
  pub diagnoses: Vec<String>,
  #[serde(default)]
  pub current_therapies: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub user_id: String,
  pub name: String,
  pub has_completed_intake: bool,
  pub intake_data: Option<IntakeData>,
  pub created_at: DateTime<Utc>,
}

impl UserProfile {
  pub fn new(user_id: &str) -> Self {
    Self {
      user_id: user_id.to_string(),
      name: String::new(),
      has_completed_intake: false,
      intake_data: None,
      created_at: Utc::now(),
    }
  }

  /// Overwrite every field present in `update`; absent fields are kept.
  pub fn apply(&mut self, update: ProfileUpdate) {
    if let Some(name) = update.name {
      self.name = name;
    }
    if let Some(done) = update.has_completed_intake {
      self.has_completed_intake = done;
    }
    if let Some(intake) = update.intake_data {
      self.intake_data = Some(intake);
    }
  }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub has_completed_intake: Option<bool>,
  #[serde(default)]
  pub intake_data: Option<IntakeData>,
}

impl ProfileUpdate {
  /// Parse a PATCH body. Unknown keys fail with "Invalid updates" before any
  /// value is looked at.
  pub fn from_json(body: Value) -> Result<Self, ApiError> {
    let Value::Object(map) = &body else {
      return Err(ApiError::BadRequest("Profile update must be a JSON object".into()));
    };
    if !map.keys().all(|k| UPDATABLE_FIELDS.contains(&k.as_str())) {
      return Err(ApiError::BadRequest("Invalid updates".into()));
    }
    let update: ProfileUpdate = serde_json::from_value(body)
      .map_err(|e| ApiError::BadRequest(format!("Error updating profile: {}", e)))?;
    if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
      return Err(ApiError::BadRequest("Error updating profile: name must not be empty".into()));
    }
    Ok(update)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn unknown_keys_reject_the_whole_update() {
    let err = ProfileUpdate::from_json(json!({ "name": "Sam", "email": "x@y.z" })).unwrap_err();
    assert_eq!(err.to_string(), "Invalid updates");
    assert!(matches!(ProfileUpdate::from_json(json!([1, 2])), Err(ApiError::BadRequest(_))));
  }

  #[test]
  fn wrong_value_types_are_rejected() {
    let err = ProfileUpdate::from_json(json!({ "intakeData": { "childAge": "six" } })).unwrap_err();
    assert!(err.to_string().starts_with("Error updating profile"));
    assert!(ProfileUpdate::from_json(json!({ "name": "   " })).is_err());
  }

  #[test]
  fn partial_update_keeps_other_fields() {
    let mut profile = UserProfile::new("u1");
    profile.apply(ProfileUpdate::from_json(json!({ "name": "Sam" })).unwrap());
    profile.apply(
      ProfileUpdate::from_json(json!({
        "hasCompletedIntake": true,
        "intakeData": { "childName": "Mia", "childAge": 6, "canRead": false, "diagnoses": ["apraxia"] }
      }))
      .unwrap(),
    );
    assert_eq!(profile.name, "Sam");
    assert!(profile.has_completed_intake);
    let intake = profile.intake_data.unwrap();
    assert_eq!(intake.child_age, Some(6));
    assert_eq!(intake.can_read, Some(false));
    assert!(intake.current_therapies.is_empty());
  }
}
