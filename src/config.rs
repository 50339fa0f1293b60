//! Loading an optional content pack (challenge copy overrides) from TOML.
//!
//! See `ContentConfig` and `ChallengeOverride` for the expected schema.

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::Challenge;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ContentConfig {
  #[serde(default)]
  pub challenges: Vec<ChallengeOverride>,
}

/// Per-level override accepted in TOML configuration.
/// Only the copy can be replaced. Acceptance rules and tier assignment stay
/// with the built-in table.
#[derive(Clone, Debug, Deserialize)]
pub struct ChallengeOverride {
  pub ordinal: usize,
  #[serde(default)] pub title: Option<String>,
  #[serde(default)] pub instructions: Option<String>,
  #[serde(default)] pub starting_code: Option<String>,
  #[serde(default)] pub hints: Option<Vec<String>>,
  #[serde(default)] pub learning_objective: Option<String>,
}

/// Attempt to load `ContentConfig` from CONTENT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_content_config_from_env() -> Option<ContentConfig> {
  let path = std::env::var("CONTENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<ContentConfig>(&s) {
      Ok(cfg) => {
        info!(target: "catflex_backend", %path, "Loaded content config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "catflex_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "catflex_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// Apply copy overrides onto the built-in challenge table.
/// Hints are capped at three per level, matching what the hint flow serves.
pub fn apply_overrides(challenges: &mut [Challenge], cfg: &ContentConfig) {
  for ov in &cfg.challenges {
    let ch = match challenges.get_mut(ov.ordinal) {
      Some(ch) => ch,
      None => {
        warn!(target: "challenge", ordinal = ov.ordinal, "Ignoring override for unknown level");
        continue;
      }
    };
    if let Some(title) = &ov.title {
      ch.title = title.clone();
    }
    if let Some(instructions) = &ov.instructions {
      ch.instructions = instructions.clone();
    }
    if let Some(starting_code) = &ov.starting_code {
      ch.starting_code = starting_code.clone();
    }
    if let Some(hints) = &ov.hints {
      let mut hints = hints.clone();
      hints.truncate(3);
      ch.hints = hints;
    }
    if let Some(learning_objective) = &ov.learning_objective {
      ch.learning_objective = learning_objective.clone();
    }
  }
}
