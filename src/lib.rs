//! Speech-therapy planning core and its HTTP service.
//!
//! Assessment results (session scores plus per-word attempts) go in; a weekly lesson
//! plan with targeted exercises, practice activities and coaching notes comes out.
//! Around that core sit per-user storage, profiles, completion tracking and the
//! HTTP API.
//! See `lesson::generate` for the entry point.

pub mod activities;
pub mod analysis;
pub mod assessment;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod lesson;
pub mod logic;
pub mod notes;
pub mod phonetics;
pub mod planner;
pub mod profile;
pub mod progress;
pub mod prosody;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod similarity;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;

pub use domain::{AssessmentScores, AttemptRecord, DailyPlan, Exercise, LessonPlan};
pub use lesson::{generate, LessonPlanner};
