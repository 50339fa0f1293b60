//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::css::StyleDecl;
use crate::domain::{Challenge, ProgressEntry, TargetPosition, Tier};
use crate::i18n::Language;
use crate::logic::CheckOutcome;
use crate::state::SessionSettings;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Preview {
        css: String,
    },
    CheckSolution {
        ordinal: usize,
        css: String,
        #[serde(default)]
        attempts: u32,
        #[serde(default, rename = "hintsUsed")]
        hints_used: u32,
    },
    Hint {
        ordinal: usize,
        #[serde(default, rename = "hintsUsed")]
        hints_used: u32,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Preview {
        declarations: Vec<StyleDecl>,
    },
    CheckResult {
        valid: bool,
        solved: bool,
        score: u8,
        message: Option<String>,
        #[serde(rename = "tierCompleted")]
        tier_completed: Option<Tier>,
        #[serde(rename = "nextOrdinal")]
        next_ordinal: Option<usize>,
        #[serde(rename = "bestScore")]
        best_score: Option<u8>,
    },
    Hint {
        hints: Vec<String>,
        remaining: u32,
    },
    Error {
        message: String,
    },
}

/// DTO used by both WS and HTTP for challenge delivery.
/// Hints travel through the hint endpoint only, so delivering a level never
/// leaks the full list; the rule never leaves the server at all.
#[derive(Debug, Serialize)]
pub struct ChallengeOut {
    pub ordinal: usize,
    pub title: String,
    pub tier: Tier,
    pub instructions: String,
    #[serde(rename = "startingCode")]
    pub starting_code: String,
    #[serde(rename = "targetPositions")]
    pub target_positions: Option<Vec<TargetPosition>>,
    #[serde(rename = "hintCount")]
    pub hint_count: usize,
    #[serde(rename = "learningObjective")]
    pub learning_objective: String,
}

/// Convert full `Challenge` (internal) to the public DTO.
pub fn to_out(c: &Challenge) -> ChallengeOut {
    ChallengeOut {
        ordinal: c.ordinal,
        title: c.title.clone(),
        tier: c.tier,
        instructions: c.instructions.clone(),
        starting_code: c.starting_code.clone(),
        target_positions: c.target_positions.clone(),
        hint_count: c.hints.len().min(3),
        learning_objective: c.learning_objective.clone(),
    }
}

/// One row of the level picker: identity plus lock/completion state.
#[derive(Debug, Serialize)]
pub struct ChallengeSummaryOut {
    pub ordinal: usize,
    pub title: String,
    pub tier: Tier,
    pub unlocked: bool,
    pub completed: bool,
    #[serde(rename = "bestScore")]
    pub best_score: Option<u8>,
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ChallengeQuery {
    pub ordinal: usize,
}

#[derive(Deserialize)]
pub struct PreviewIn {
    pub css: String,
}
#[derive(Serialize)]
pub struct PreviewOut {
    pub declarations: Vec<StyleDecl>,
}

#[derive(Deserialize)]
pub struct CheckIn {
    pub ordinal: usize,
    pub css: String,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default, rename = "hintsUsed")]
    pub hints_used: u32,
}
#[derive(Serialize)]
pub struct CheckOut {
    pub valid: bool,
    pub solved: bool,
    pub score: u8,
    pub message: Option<String>,
    #[serde(rename = "tierCompleted")]
    pub tier_completed: Option<Tier>,
    #[serde(rename = "nextOrdinal")]
    pub next_ordinal: Option<usize>,
    #[serde(rename = "bestScore")]
    pub best_score: Option<u8>,
}

/// Convert a check outcome into the HTTP response body.
pub fn check_out(outcome: CheckOutcome) -> CheckOut {
    CheckOut {
        valid: outcome.valid,
        solved: outcome.solved,
        score: outcome.score,
        message: outcome.message,
        tier_completed: outcome.tier_completed,
        next_ordinal: outcome.next_ordinal,
        best_score: outcome.best_score,
    }
}

/// Convert a check outcome into the WebSocket payload.
pub fn check_result(outcome: CheckOutcome) -> ServerWsMessage {
    ServerWsMessage::CheckResult {
        valid: outcome.valid,
        solved: outcome.solved,
        score: outcome.score,
        message: outcome.message,
        tier_completed: outcome.tier_completed,
        next_ordinal: outcome.next_ordinal,
        best_score: outcome.best_score,
    }
}

#[derive(Debug, Deserialize)]
pub struct HintQuery {
    pub ordinal: usize,
    #[serde(default, rename = "hintsUsed")]
    pub hints_used: u32,
}
#[derive(Serialize)]
pub struct HintOut {
    pub hints: Vec<String>,
    pub remaining: u32,
}

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    #[serde(default)]
    pub attempts: u32,
    #[serde(default, rename = "hintsUsed")]
    pub hints_used: u32,
}
#[derive(Serialize)]
pub struct ScoreOut {
    pub score: u8,
}

#[derive(Deserialize)]
pub struct FormatIn {
    pub css: String,
}
#[derive(Serialize)]
pub struct FormatOut {
    pub css: String,
}

/// Full session view: settings plus per-level progress and the headline
/// completion numbers the progress bar renders.
#[derive(Serialize)]
pub struct SessionOut {
    pub username: Option<String>,
    #[serde(rename = "darkMode")]
    pub dark_mode: bool,
    pub language: Language,
    #[serde(rename = "themeId")]
    pub theme_id: String,
    pub progress: Vec<ProgressEntry>,
    #[serde(rename = "completedCount")]
    pub completed_count: usize,
    #[serde(rename = "totalChallenges")]
    pub total_challenges: usize,
    #[serde(rename = "overallPercent")]
    pub overall_percent: u8,
}

/// Assemble the session DTO. Percent is rounded to the nearest whole point.
pub fn session_out(
    settings: &SessionSettings,
    progress: Vec<ProgressEntry>,
    total: usize,
) -> SessionOut {
    let completed = progress.iter().filter(|p| p.completed).count();
    let overall_percent = if total == 0 { 0 } else { ((completed * 100 + total / 2) / total) as u8 };
    SessionOut {
        username: settings.username.clone(),
        dark_mode: settings.dark_mode,
        language: settings.language,
        theme_id: settings.theme_id.clone(),
        progress,
        completed_count: completed,
        total_challenges: total,
        overall_percent,
    }
}

/// Partial settings update; absent fields stay as they are.
#[derive(Debug, Default, Deserialize)]
pub struct SessionPatch {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, rename = "darkMode")]
    pub dark_mode: Option<bool>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default, rename = "themeId")]
    pub theme_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StringsQuery {
    #[serde(default)]
    pub lang: Option<String>,
}
#[derive(Serialize)]
pub struct StringsOut {
    pub lang: &'static str,
    pub strings: BTreeMap<&'static str, &'static str>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}
