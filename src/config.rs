//! Loading coach configuration (content overrides + RNG seed) from TOML.
//!
//! Expected schema:
//!
//! ```toml
//! seed = 42
//!
//! [words]
//! simple = ["cat", "dog"]
//! moderate = ["banana"]
//! complex = ["helicopter"]
//!
//! [[sentences]]
//! text = "The cat is sleeping"
//! image_url = "/sentence-images/sleeping-cat.png"
//! ```

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::assessment::WordBank;
use crate::domain::SentencePrompt;
use crate::seeds::seed_word_bank;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CoachConfig {
  #[serde(default)]
  pub seed: Option<u64>,
  #[serde(default)]
  pub words: Option<WordsCfg>,
  #[serde(default)]
  pub sentences: Vec<SentenceCfg>,
}

/// Word bank override; a missing or empty level keeps the built-in words.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct WordsCfg {
  #[serde(default)]
  pub simple: Vec<String>,
  #[serde(default)]
  pub moderate: Vec<String>,
  #[serde(default)]
  pub complex: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SentenceCfg {
  pub text: String,
  #[serde(default)]
  pub image_url: String,
}

impl CoachConfig {
  pub fn word_bank(&self) -> WordBank {
    let mut bank = seed_word_bank();
    if let Some(w) = &self.words {
      if !w.simple.is_empty() { bank.simple = w.simple.clone(); }
      if !w.moderate.is_empty() { bank.moderate = w.moderate.clone(); }
      if !w.complex.is_empty() { bank.complex = w.complex.clone(); }
    }
    bank
  }

  /// Configured sentence prompts, skipping entries with blank text.
  pub fn sentence_prompts(&self) -> Vec<SentencePrompt> {
    self
      .sentences
      .iter()
      .filter(|s| {
        let keep = !s.text.trim().is_empty();
        if !keep {
          warn!(target: "speech_coach", "Skipping sentence prompt with empty text");
        }
        keep
      })
      .map(|s| SentencePrompt { text: s.text.trim().to_string(), image_url: s.image_url.clone() })
      .collect()
  }
}

pub fn parse_config(s: &str) -> Result<CoachConfig, toml::de::Error> {
  toml::from_str::<CoachConfig>(s)
}

/// Attempt to load `CoachConfig` from COACH_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_coach_config_from_env() -> Option<CoachConfig> {
  let path = std::env::var("COACH_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "speech_coach", %path, sentences = cfg.sentences.len(), "Loaded coach config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "speech_coach", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "speech_coach", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// COACH_RNG_SEED, if set and numeric.
pub fn rng_seed_from_env() -> Option<u64> {
  let raw = std::env::var("COACH_RNG_SEED").ok()?;
  match raw.trim().parse::<u64>() {
    Ok(seed) => Some(seed),
    Err(e) => {
      warn!(target: "speech_coach", %raw, error = %e, "Ignoring non-numeric COACH_RNG_SEED");
      None
    }
  }
}
