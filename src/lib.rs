//! CatFlex backend library: CSS flexbox challenge engine plus the Axum
//! HTTP/WebSocket surface that serves it.
//!
//! `main.rs` wires this into a server binary; integration tests drive the
//! same router in-process.

pub mod config;
pub mod css;
pub mod domain;
pub mod i18n;
pub mod logic;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod util;
