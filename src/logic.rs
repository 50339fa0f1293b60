//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Scoring a solve from attempt and hint counters
//!   - Computing the live style preview
//!   - Checking a submitted solution (syntax gate, rule match, progress, tier)
//!   - Serving progressive hints

use tracing::{debug, info, instrument};

use crate::css::{self, StyleDecl};
use crate::domain::{Challenge, ProgressEntry, Tier};
use crate::i18n;
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Everything a check produces, shared by the HTTP and WS responses.
#[derive(Clone, Debug)]
pub struct CheckOutcome {
  pub valid: bool,
  pub solved: bool,
  pub score: u8,
  pub message: Option<String>,
  pub tier_completed: Option<Tier>,
  pub next_ordinal: Option<usize>,
  pub best_score: Option<u8>,
}

/// Score for a solve: 100 minus 10 per hint, plus an up-to-20 bonus that
/// shrinks by one per attempt, clamped to 0..=100.
pub fn score_attempt(attempts: u32, hints_used: u32) -> u8 {
  let base = 100 - 10 * i64::from(hints_used);
  let mut bonus = 20 - i64::from(attempts);
  if bonus < 0 {
    bonus = 0;
  }
  let mut score = base + bonus;
  if score > 100 {
    score = 100;
  }
  if score < 0 {
    score = 0;
  }
  score as u8
}

/// Solving the last level of a tier completes that tier.
pub fn tier_completed(ordinal: usize) -> Option<Tier> {
  match ordinal {
    3 => Some(Tier::Beginner),
    6 => Some(Tier::Intermediate),
    8 => Some(Tier::Advanced),
    _ => None,
  }
}

/// A level is playable once the one before it has been completed.
pub fn is_unlocked(progress: &[ProgressEntry], ordinal: usize) -> bool {
  if ordinal == 0 {
    return true;
  }
  progress.iter().any(|p| p.level == ordinal - 1 && p.completed)
}

/// The hints visible after `hints_used` requests, plus how many are left.
/// At most three hints are ever served per level.
pub fn reveal_hints(challenge: &Challenge, hints_used: u32) -> (Vec<String>, u32) {
  let cap = challenge.hints.len().min(3);
  let shown = (hints_used as usize).min(cap);
  (challenge.hints[..shown].to_vec(), (cap - shown) as u32)
}

/// Resolve the declarations the preview pane should render for `css`.
pub fn run_preview(css: &str) -> Vec<StyleDecl> {
  let declarations = css::preview_declarations(css);
  debug!(target: "catflex_backend", css = %trunc_for_log(css, 120), count = declarations.len(), "Preview computed");
  declarations
}

/// Check a submission against a level. Syntax errors come back as an invalid
/// outcome with the offending line; a rule match records the solve and reports
/// tier completion and the next level to play.
#[instrument(level = "info", skip(state, css), fields(css_len = css.len()))]
pub async fn run_check(
  state: &AppState,
  ordinal: usize,
  css: &str,
  attempts: u32,
  hints_used: u32,
) -> Result<CheckOutcome, String> {
  let challenge = match state.challenge(ordinal) {
    Some(ch) => ch,
    None => return Err(format!("Unknown level: {}", ordinal)),
  };

  if let Err(message) = css::validate_syntax(css) {
    info!(target: "challenge", ordinal, "Check blocked by invalid syntax");
    return Ok(CheckOutcome {
      valid: false,
      solved: false,
      score: score_attempt(attempts, hints_used),
      message: Some(message),
      tier_completed: None,
      next_ordinal: None,
      best_score: state.best_score(ordinal).await,
    });
  }

  if challenge.rule.matches(css) {
    let score = score_attempt(attempts, hints_used);
    let entry = state.record_solve(ordinal, score, attempts, hints_used).await;
    let tier = tier_completed(ordinal);
    let next_ordinal = if ordinal + 1 < state.challenges.len() { Some(ordinal + 1) } else { None };
    info!(target: "challenge", ordinal, score, tier = ?tier, "Solution accepted");
    Ok(CheckOutcome {
      valid: true,
      solved: true,
      score,
      message: None,
      tier_completed: tier,
      next_ordinal,
      best_score: Some(entry.score),
    })
  } else {
    let settings = state.settings_snapshot().await;
    let name = settings.username.unwrap_or_default();
    let message = i18n::t(settings.language, "notCorrectYet", &[("name", &name)]);
    info!(target: "challenge", ordinal, attempts, "Solution rejected");
    Ok(CheckOutcome {
      valid: true,
      solved: false,
      score: score_attempt(attempts, hints_used),
      message: Some(message),
      tier_completed: None,
      next_ordinal: None,
      best_score: state.best_score(ordinal).await,
    })
  }
}

/// Hints for a level at the given usage count.
#[instrument(level = "info", skip(state))]
pub fn get_hints(
  state: &AppState,
  ordinal: usize,
  hints_used: u32,
) -> Result<(Vec<String>, u32), String> {
  let challenge = state
    .challenge(ordinal)
    .ok_or_else(|| format!("Unknown level: {}", ordinal))?;
  let (hints, remaining) = reveal_hints(challenge, hints_used);
  info!(target: "challenge", ordinal, served = hints.len(), remaining, "Hints served");
  Ok((hints, remaining))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::i18n::Language;
  use crate::state::AppState;
  use crate::storage::MemoryStore;
  use std::sync::Arc;

  fn fresh_state() -> AppState {
    AppState::with_content(None, Arc::new(MemoryStore::default()))
  }

  #[test]
  fn scoring_rewards_fast_hint_free_solves() {
    assert_eq!(score_attempt(0, 0), 100);
    assert_eq!(score_attempt(20, 0), 100);
    assert_eq!(score_attempt(25, 0), 100);
    assert_eq!(score_attempt(0, 1), 100);
    assert_eq!(score_attempt(15, 1), 95);
    assert_eq!(score_attempt(20, 2), 80);
    assert_eq!(score_attempt(18, 3), 72);
    assert_eq!(score_attempt(50, 10), 0);
    assert_eq!(score_attempt(0, 12), 0);
    assert_eq!(score_attempt(30, 11), 0);
  }

  #[test]
  fn tier_completes_on_its_last_level_only() {
    assert_eq!(tier_completed(3), Some(Tier::Beginner));
    assert_eq!(tier_completed(6), Some(Tier::Intermediate));
    assert_eq!(tier_completed(8), Some(Tier::Advanced));
    assert_eq!(tier_completed(0), None);
    assert_eq!(tier_completed(5), None);
    assert_eq!(tier_completed(7), None);
  }

  #[test]
  fn unlock_requires_previous_completion() {
    let none: Vec<ProgressEntry> = vec![];
    assert!(is_unlocked(&none, 0));
    assert!(!is_unlocked(&none, 1));

    let progress = vec![ProgressEntry {
      level: 0,
      completed: true,
      score: 100,
      attempts: 1,
      hints_used: 0,
      completed_at: None,
    }];
    assert!(is_unlocked(&progress, 1));
    assert!(!is_unlocked(&progress, 2));

    let incomplete = vec![ProgressEntry { completed: false, ..progress[0].clone() }];
    assert!(!is_unlocked(&incomplete, 1));
  }

  #[test]
  fn hints_reveal_progressively_and_cap_at_three() {
    let state = fresh_state();
    let (hints, remaining) = get_hints(&state, 0, 0).expect("known level");
    assert!(hints.is_empty());
    assert_eq!(remaining, 3);

    let (hints, remaining) = get_hints(&state, 0, 2).expect("known level");
    assert_eq!(hints.len(), 2);
    assert_eq!(remaining, 1);

    let (hints, remaining) = get_hints(&state, 0, 9).expect("known level");
    assert_eq!(hints.len(), 3);
    assert_eq!(remaining, 0);

    assert!(get_hints(&state, 99, 0).is_err());
  }

  #[tokio::test]
  async fn check_accepts_a_solution_and_reports_tier() {
    let state = fresh_state();
    let css = ".flex-container {\n  display: flex;\n  align-items: center;\n}";
    let out = run_check(&state, 3, css, 0, 0).await.expect("known level");
    assert!(out.valid);
    assert!(out.solved);
    assert_eq!(out.score, 100);
    assert_eq!(out.tier_completed, Some(Tier::Beginner));
    assert_eq!(out.next_ordinal, Some(4));
    assert_eq!(out.best_score, Some(100));

    let entries = state.progress_entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, 3);
  }

  #[tokio::test]
  async fn check_blocks_invalid_syntax() {
    let state = fresh_state();
    let out = run_check(&state, 0, "display flex", 1, 0).await.expect("known level");
    assert!(!out.valid);
    assert!(!out.solved);
    let message = out.message.expect("message");
    assert!(message.starts_with("Invalid CSS syntax:"));
    assert!(state.progress_entries().await.is_empty());
  }

  #[tokio::test]
  async fn rejection_message_is_localized_and_personal() {
    let state = fresh_state();
    state
      .update_settings(Some("Mona".to_string()), None, Some(Language::Ar), None)
      .await;
    let out = run_check(&state, 1, "display: flex;", 2, 1).await.expect("known level");
    assert!(out.valid);
    assert!(!out.solved);
    assert_eq!(out.tier_completed, None);
    let message = out.message.expect("message");
    assert!(message.contains("Mona"));
    assert!(message.contains("CSS"));
  }

  #[tokio::test]
  async fn last_level_has_no_next() {
    let state = fresh_state();
    let css = ".flex-container {\n  display: flex;\n  flex-direction: column-reverse;\n  justify-content: space-between;\n  align-items: center;\n}";
    let out = run_check(&state, 8, css, 3, 1).await.expect("known level");
    assert!(out.solved);
    assert_eq!(out.next_ordinal, None);
    assert_eq!(out.tier_completed, Some(Tier::Advanced));

    let err = run_check(&state, 99, "display: flex;", 0, 0).await.expect_err("unknown level");
    assert!(err.contains("99"));
  }
}
