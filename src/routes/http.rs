//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; logs include parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument};

use crate::i18n::{self, Language};
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

fn not_found(error: String) -> Response {
  (StatusCode::NOT_FOUND, Json(ErrorOut { error })).into_response()
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let (settings, progress) = state.session_snapshot().await;
  Json(session_out(&settings, progress, state.challenges.len()))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_patch_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionPatch>,
) -> impl IntoResponse {
  let settings = state
    .update_settings(body.username, body.dark_mode, body.language, body.theme_id)
    .await;
  let progress = state.progress_entries().await;
  info!(target: "catflex_backend", "HTTP session updated");
  Json(session_out(&settings, progress, state.challenges.len()))
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_challenges(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let progress = state.progress_entries().await;
  let rows: Vec<ChallengeSummaryOut> = state
    .challenges
    .iter()
    .map(|ch| {
      let entry = progress.iter().find(|p| p.level == ch.ordinal);
      ChallengeSummaryOut {
        ordinal: ch.ordinal,
        title: ch.title.clone(),
        tier: ch.tier,
        unlocked: is_unlocked(&progress, ch.ordinal),
        completed: entry.map(|p| p.completed).unwrap_or(false),
        best_score: entry.map(|p| p.score),
      }
    })
    .collect();
  Json(rows)
}

#[instrument(level = "info", skip(state), fields(ordinal = q.ordinal))]
pub async fn http_get_challenge(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ChallengeQuery>,
) -> Response {
  match state.challenge(q.ordinal) {
    Some(ch) => {
      info!(target: "challenge", ordinal = ch.ordinal, title = %ch.title, "HTTP challenge served");
      Json(to_out(ch)).into_response()
    }
    None => not_found(format!("Unknown level: {}", q.ordinal)),
  }
}

#[instrument(level = "info", skip(body), fields(css_len = body.css.len()))]
pub async fn http_post_preview(Json(body): Json<PreviewIn>) -> impl IntoResponse {
  let declarations = run_preview(&body.css);
  Json(PreviewOut { declarations })
}

#[instrument(level = "info", skip(state, body), fields(ordinal = body.ordinal, css_len = body.css.len()))]
pub async fn http_post_check(
  State(state): State<Arc<AppState>>,
  Json(body): Json<CheckIn>,
) -> Response {
  match run_check(&state, body.ordinal, &body.css, body.attempts, body.hints_used).await {
    Ok(outcome) => {
      info!(target: "challenge", ordinal = body.ordinal, solved = outcome.solved, score = outcome.score, "HTTP check evaluated");
      Json(check_out(outcome)).into_response()
    }
    Err(error) => not_found(error),
  }
}

#[instrument(level = "info", skip(state), fields(ordinal = q.ordinal))]
pub async fn http_get_hint(
  State(state): State<Arc<AppState>>,
  Query(q): Query<HintQuery>,
) -> Response {
  match get_hints(&state, q.ordinal, q.hints_used) {
    Ok((hints, remaining)) => {
      info!(target: "challenge", ordinal = q.ordinal, served = hints.len(), "HTTP hint served");
      Json(HintOut { hints, remaining }).into_response()
    }
    Err(error) => not_found(error),
  }
}

#[instrument(level = "info")]
pub async fn http_get_score(Query(q): Query<ScoreQuery>) -> impl IntoResponse {
  Json(ScoreOut { score: score_attempt(q.attempts, q.hints_used) })
}

#[instrument(level = "info", skip(body), fields(css_len = body.css.len()))]
pub async fn http_post_format(Json(body): Json<FormatIn>) -> impl IntoResponse {
  Json(FormatOut { css: crate::css::format_css(&body.css) })
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_reset_progress(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  state.reset_progress().await;
  let (settings, progress) = state.session_snapshot().await;
  Json(session_out(&settings, progress, state.challenges.len()))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_themes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.themes.clone())
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_strings(
  State(state): State<Arc<AppState>>,
  Query(q): Query<StringsQuery>,
) -> impl IntoResponse {
  let lang = match q.lang.as_deref().and_then(Language::from_code) {
    Some(lang) => lang,
    None => state.settings_snapshot().await.language,
  };
  let strings = i18n::table_for(lang).iter().copied().collect();
  Json(StringsOut { lang: lang.code(), strings })
}
