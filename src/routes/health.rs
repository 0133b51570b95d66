//! Liveness and status endpoints.
//!
//! `/health` only proves the web process answers HTTP; the container probe
//! for the static assets is the separate `healthcheck` binary. `/status`
//! exposes the status panel as JSON.

use axum::{extract::State, Json};

use crate::status::StatusSnapshot;
use crate::state::AppState;

/// Health check handler.
pub async fn health() -> &'static str {
    "ok"
}

/// Current status panel value.
pub async fn status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(StatusSnapshot::from(&state.status.current()))
}
