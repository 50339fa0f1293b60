//! Domain models used by the backend: difficulty tiers, challenge
//! definitions with their acceptance rules, themes, and per-level progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty band a level belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
  Beginner,
  Intermediate,
  Advanced,
}

impl Tier {
  /// Band for a level ordinal: 0-3 beginner, 4-6 intermediate, 7-8 advanced.
  pub fn for_ordinal(ordinal: usize) -> Tier {
    if ordinal < 4 {
      Tier::Beginner
    } else if ordinal < 7 {
      Tier::Intermediate
    } else {
      Tier::Advanced
    }
  }

  /// Localization key for the band, also its wire spelling.
  pub fn key(&self) -> &'static str {
    match self {
      Tier::Beginner => "beginner",
      Tier::Intermediate => "intermediate",
      Tier::Advanced => "advanced",
    }
  }
}

/// Where an element should land in the preview container, in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPosition {
  pub x: u8,
  pub y: u8,
}

/// One `property: value` pair a solution must contain.
#[derive(Clone, Copy, Debug)]
pub struct RequiredDeclaration {
  pub property: &'static str,
  pub value: &'static str,
}

/// Acceptance predicate for a level. Substring checks over the raw editor
/// text, not parsed CSS; upgrading to real parsing would change which
/// submissions pass.
#[derive(Clone, Debug)]
pub enum SolutionRule {
  /// Every listed declaration must appear, accepting both `prop: value`
  /// and `prop:value` spacing.
  All(&'static [RequiredDeclaration]),
  /// `flex-direction: row` explicitly, or no `flex-direction` at all while
  /// `display: flex` is still present.
  RowOrDefault,
}

impl SolutionRule {
  /// True if the raw editor text satisfies the rule. Total over any input.
  pub fn matches(&self, css: &str) -> bool {
    match self {
      SolutionRule::All(required) => required
        .iter()
        .all(|d| contains_declaration(css, d.property, d.value)),
      SolutionRule::RowOrDefault => {
        contains_declaration(css, "flex-direction", "row")
          || (!css.contains("flex-direction") && css.contains("display: flex"))
      }
    }
  }
}

/// Loose containment check for a declaration, with or without the space
/// after the colon. Note `row` also matches inside `row-reverse`; that
/// looseness is part of the observable behavior.
fn contains_declaration(css: &str, property: &str, value: &str) -> bool {
  css.contains(&format!("{}: {}", property, value)) || css.contains(&format!("{}:{}", property, value))
}

/// A single level: the copy shown to the learner plus the acceptance rule.
#[derive(Clone, Debug)]
pub struct Challenge {
  pub ordinal: usize,
  pub title: String,
  pub tier: Tier,
  pub instructions: String,
  pub starting_code: String,
  pub hints: Vec<String>,
  pub target_positions: Option<Vec<TargetPosition>>,
  pub learning_objective: String,
  pub rule: SolutionRule,
}

/// Element labels and emoji for a theme.
#[derive(Clone, Debug, Serialize)]
pub struct ThemeElements {
  pub emoji: [&'static str; 3],
  pub names: [&'static str; 3],
}

/// Visual identity served to the frontend. The backend never interprets any
/// of this; it only stores the selected theme id.
#[derive(Clone, Debug, Serialize)]
pub struct Theme {
  pub id: &'static str,
  pub name: &'static str,
  pub icon: &'static str,
  pub gradient: &'static str,
  pub elements: ThemeElements,
  #[serde(rename = "celebrationAnimation")]
  pub celebration_animation: &'static str,
}

/// Per-level progress, persisted as the JSON array under `catflex-progress`.
/// Field names match the long-lived stored payload. An entry exists only for
/// solved levels, so `completed` is always true in practice.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressEntry {
  pub level: usize,
  pub completed: bool,
  pub score: u8,
  pub attempts: u32,
  #[serde(rename = "hintsUsed")]
  pub hints_used: u32,
  #[serde(rename = "completedAt", default)]
  pub completed_at: Option<DateTime<Utc>>,
}
