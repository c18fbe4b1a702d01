//! Per-customer read endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use common::{AccountId, CustomerId};
use domain::CarbonImpactRecord;
use orchestrator::DashboardSnapshot;
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub account_id: Option<String>,
}

/// GET /customers/{id}/dashboard?accountId= — balance, points and donations.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let account_id = query
        .account_id
        .filter(|id| !id.trim().is_empty())
        .map(AccountId::new)
        .ok_or_else(|| ApiError::BadRequest("Missing query parameter: accountId".to_string()))?;

    let snapshot = state
        .dashboard
        .refresh(&CustomerId::new(id), &account_id)
        .await;
    Ok(Json(snapshot))
}

/// GET /customers/{id}/carbon-impact — recorded carbon impact entries.
pub async fn carbon_impact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CarbonImpactRecord>>, ApiError> {
    let records = state.carbon.get_impact(&CustomerId::new(id)).await?;
    Ok(Json(records))
}
