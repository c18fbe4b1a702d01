//! Transaction workflow and category lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use category_cache::annotate_categories;
use common::TransactionId;
use domain::{TransactionDraft, ValidationError};
use orchestrator::ProcessTransactionResponse;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub transaction_id: TransactionId,
    pub category: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLabel {
    pub transaction_id: TransactionId,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct CategoriesQuery {
    /// Comma-separated transaction ids.
    pub ids: Option<String>,
}

/// POST /transactions/process — submit a transfer and run its side effects.
pub async fn process(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TransactionDraft>, JsonRejection>,
) -> Result<Json<ProcessTransactionResponse>, ApiError> {
    let Json(draft) = payload.map_err(|e| {
        state
            .orchestrator
            .reject(ValidationError::MalformedBody(e.body_text()))
    })?;

    let run = state.orchestrator.process_draft(draft).await?;
    Ok(Json(ProcessTransactionResponse::from(run)))
}

/// GET /transactions/{id}/category — category recorded for a transaction.
pub async fn category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let transaction_id = TransactionId::new(id);
    let category = state
        .categories
        .lookup(&transaction_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No category recorded for transaction {transaction_id}"))
        })?;

    Ok(Json(CategoryResponse {
        transaction_id,
        category,
    }))
}

/// GET /transactions/categories?ids=T1,T2 — categories for a list of
/// transactions, in the order requested; unknown ids have a null category.
pub async fn categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CategoriesQuery>,
) -> Result<Json<Vec<CategoryLabel>>, ApiError> {
    let ids: Vec<TransactionId> = query
        .ids
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(TransactionId::new)
        .collect();
    if ids.is_empty() {
        return Err(ApiError::BadRequest("Missing query parameter: ids".to_string()));
    }

    let labelled =
        annotate_categories(state.categories.as_ref(), ids, TransactionId::clone).await?;
    Ok(Json(
        labelled
            .into_iter()
            .map(|row| CategoryLabel {
                transaction_id: row.item,
                category: row.category,
            })
            .collect(),
    ))
}
