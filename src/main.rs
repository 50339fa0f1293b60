//! CatFlex · Flexbox Trainer Backend
//!
//! - Axum HTTP + WebSocket API
//! - File-backed session persistence (settings + progress survive restarts)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   STATE_PATH       : session state file (default "./catflex-state.json")
//!   CONTENT_CONFIG_PATH  : path to TOML content pack (challenge copy overrides)
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use catflex_backend::routes::build_router;
use catflex_backend::state::AppState;
use catflex_backend::storage::FileStore;
use catflex_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Open the session store (settings + progress survive restarts).
  let state_path =
    std::env::var("STATE_PATH").unwrap_or_else(|_| "./catflex-state.json".to_string());
  let store = Arc::new(FileStore::open(state_path));

  // Build shared application state (challenge table, themes, live session).
  let state = Arc::new(AppState::new(store));

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "catflex_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  match tokio::signal::ctrl_c().await {
    Ok(()) => info!(target: "catflex_backend", "Shutdown signal received"),
    Err(e) => error!(target: "catflex_backend", error = %e, "Failed to listen for shutdown signal"),
  }
}
