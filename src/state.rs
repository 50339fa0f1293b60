//! Application state: the challenge table, themes, and the live session.
//!
//! This module owns:
//!   - the ordered challenge table (built-in seeds + optional TOML overrides)
//!   - the theme catalog
//!   - the mutable session (settings + per-level progress) behind RwLocks
//!   - persistence of the session through a `KvStore`
//!
//! One process serves one learner session, mirroring the single
//! localStorage profile the browser build kept.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::{apply_overrides, load_content_config_from_env, ContentConfig};
use crate::domain::{Challenge, ProgressEntry, Theme};
use crate::i18n::Language;
use crate::seeds::{seed_challenges, seed_themes};
use crate::storage::{
    KvStore, KEY_DARK_MODE, KEY_LANGUAGE, KEY_PROGRESS, KEY_THEME, KEY_USERNAME,
};

/// The learner-facing knobs of the session.
#[derive(Clone, Debug)]
pub struct SessionSettings {
    pub username: Option<String>,
    pub dark_mode: bool,
    pub language: Language,
    pub theme_id: String,
}

#[derive(Clone)]
pub struct AppState {
    pub challenges: Vec<Challenge>,
    pub themes: Vec<Theme>,
    pub settings: Arc<RwLock<SessionSettings>>,
    pub progress: Arc<RwLock<Vec<ProgressEntry>>>,
    store: Arc<dyn KvStore>,
}

impl AppState {
    /// Build state from env: load the optional content config, seed the
    /// challenge table, and restore the saved session from the store.
    #[instrument(level = "info", skip_all)]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_content(load_content_config_from_env(), store)
    }

    /// Same as `new` but with the content config supplied directly.
    pub fn with_content(cfg: Option<ContentConfig>, store: Arc<dyn KvStore>) -> Self {
        let mut challenges = seed_challenges();
        if let Some(cfg) = &cfg {
            apply_overrides(&mut challenges, cfg);
        }
        let themes = seed_themes();

        let settings = load_settings(store.as_ref(), &themes);
        let progress = load_progress(store.as_ref());

        // Inventory summary by tier.
        let mut count_by_tier: HashMap<&'static str, usize> = HashMap::new();
        for ch in &challenges {
            *count_by_tier.entry(ch.tier.key()).or_insert(0) += 1;
        }
        for (tier, levels) in count_by_tier {
            info!(target: "challenge", %tier, levels, "Startup challenge inventory");
        }
        if !progress.is_empty() {
            info!(target: "catflex_backend", entries = progress.len(), "Restored saved progress");
        }

        Self {
            challenges,
            themes,
            settings: Arc::new(RwLock::new(settings)),
            progress: Arc::new(RwLock::new(progress)),
            store,
        }
    }

    /// Read-only access to a challenge by its ordinal.
    pub fn challenge(&self, ordinal: usize) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.ordinal == ordinal)
    }

    /// Record a successful solve for `ordinal` and persist the result.
    /// An existing entry keeps its best score; attempt and hint counters
    /// always reflect the latest run.
    #[instrument(level = "debug", skip(self))]
    pub async fn record_solve(
        &self,
        ordinal: usize,
        score: u8,
        attempts: u32,
        hints_used: u32,
    ) -> ProgressEntry {
        let mut progress = self.progress.write().await;
        let entry = match progress.iter_mut().find(|p| p.level == ordinal) {
            Some(p) => {
                p.completed = true;
                if score > p.score {
                    p.score = score;
                }
                p.attempts = attempts;
                p.hints_used = hints_used;
                p.completed_at = Some(Utc::now());
                p.clone()
            }
            None => {
                let entry = ProgressEntry {
                    level: ordinal,
                    completed: true,
                    score,
                    attempts,
                    hints_used,
                    completed_at: Some(Utc::now()),
                };
                progress.push(entry.clone());
                entry
            }
        };
        self.persist_progress(&progress);
        info!(target: "challenge", ordinal, score = entry.score, attempts, hints_used, "Recorded solve");
        entry
    }

    fn persist_progress(&self, progress: &[ProgressEntry]) {
        match serde_json::to_string(progress) {
            Ok(json) => self.store.set(KEY_PROGRESS, &json),
            Err(e) => warn!(target: "catflex_backend", error = %e, "Failed to serialize progress"),
        }
    }

    /// Wipe all per-level progress, in memory and in the store.
    #[instrument(level = "info", skip(self))]
    pub async fn reset_progress(&self) {
        let mut progress = self.progress.write().await;
        progress.clear();
        self.store.remove(KEY_PROGRESS);
        info!(target: "challenge", "Progress reset");
    }

    /// Apply a partial settings update. Each provided field is validated,
    /// applied, and persisted; the full updated settings come back.
    #[instrument(level = "debug", skip_all)]
    pub async fn update_settings(
        &self,
        username: Option<String>,
        dark_mode: Option<bool>,
        language: Option<Language>,
        theme_id: Option<String>,
    ) -> SessionSettings {
        let mut settings = self.settings.write().await;
        if let Some(name) = username {
            let name = name.trim().to_string();
            if name.is_empty() {
                settings.username = None;
                self.store.remove(KEY_USERNAME);
            } else {
                self.store.set(KEY_USERNAME, &name);
                settings.username = Some(name);
            }
        }
        if let Some(dark) = dark_mode {
            settings.dark_mode = dark;
            self.store.set(KEY_DARK_MODE, if dark { "true" } else { "false" });
        }
        if let Some(lang) = language {
            settings.language = lang;
            self.store.set(KEY_LANGUAGE, lang.code());
        }
        if let Some(id) = theme_id {
            if self.themes.iter().any(|t| t.id == id) {
                self.store.set(KEY_THEME, &id);
                settings.theme_id = id;
            } else {
                warn!(target: "catflex_backend", theme_id = %id, "Ignoring unknown theme id");
            }
        }
        settings.clone()
    }

    /// Snapshot of settings and progress together, for the session endpoint.
    pub async fn session_snapshot(&self) -> (SessionSettings, Vec<ProgressEntry>) {
        let settings = self.settings.read().await.clone();
        let progress = self.progress.read().await.clone();
        (settings, progress)
    }

    pub async fn settings_snapshot(&self) -> SessionSettings {
        self.settings.read().await.clone()
    }

    pub async fn progress_entries(&self) -> Vec<ProgressEntry> {
        self.progress.read().await.clone()
    }

    /// Best recorded score for a level, if it was ever solved.
    pub async fn best_score(&self, ordinal: usize) -> Option<u8> {
        let progress = self.progress.read().await;
        progress.iter().find(|p| p.level == ordinal).map(|p| p.score)
    }
}

fn default_theme_id(themes: &[Theme]) -> String {
    themes.first().map(|t| t.id.to_string()).unwrap_or_else(|| "cats".to_string())
}

/// Restore settings from the store, falling back per key on anything invalid.
fn load_settings(store: &dyn KvStore, themes: &[Theme]) -> SessionSettings {
    let username = store.get(KEY_USERNAME).filter(|s| !s.trim().is_empty());

    let dark_mode = match store.get(KEY_DARK_MODE) {
        Some(raw) => match serde_json::from_str::<bool>(&raw) {
            Ok(v) => v,
            Err(_) => {
                warn!(target: "catflex_backend", %raw, "Invalid saved dark mode flag, defaulting to light");
                false
            }
        },
        None => false,
    };

    let language = match store.get(KEY_LANGUAGE) {
        Some(raw) => match Language::from_code(&raw) {
            Some(lang) => lang,
            None => {
                warn!(target: "catflex_backend", %raw, "Invalid saved language, defaulting to en");
                Language::default()
            }
        },
        None => Language::default(),
    };

    let theme_id = match store.get(KEY_THEME) {
        Some(raw) if themes.iter().any(|t| t.id == raw) => raw,
        Some(raw) => {
            warn!(target: "catflex_backend", %raw, "Unknown saved theme, using default");
            default_theme_id(themes)
        }
        None => default_theme_id(themes),
    };

    SessionSettings { username, dark_mode, language, theme_id }
}

/// Restore per-level progress; a corrupt record starts the session fresh.
fn load_progress(store: &dyn KvStore) -> Vec<ProgressEntry> {
    match store.get(KEY_PROGRESS) {
        Some(raw) => match serde_json::from_str::<Vec<ProgressEntry>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(target: "catflex_backend", error = %e, "Corrupt saved progress, starting fresh");
                Vec::new()
            }
        },
        None => Vec::new(),
    }
}
