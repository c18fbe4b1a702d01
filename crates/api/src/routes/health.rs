//! Liveness endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::{AppState, UpstreamMode};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub upstreams: UpstreamMode,
}

/// GET /health — always `ok` while the process is serving.
///
/// Upstream reachability is not probed.
pub async fn check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        upstreams: state.mode,
    })
}
