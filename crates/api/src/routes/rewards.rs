//! Rewards catalog endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::Reward;

use super::AppState;
use crate::error::ApiError;

/// GET /rewards — the rewards catalog.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Reward>>, ApiError> {
    Ok(Json(state.rewards.list_rewards().await?))
}
