// Access card renewal endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::catalog::renewal::{CardView, RenewalSummary};
use crate::core::error::CatalogError;
use crate::core::state::AppState;
use crate::models::api::{BulkRenewBody, SearchQuery};

#[derive(Debug, Serialize)]
pub struct RenewalListResponse {
    pub summary: RenewalSummary,
    pub cards: Vec<CardView>,
}

/// GET /card-renewal?search=&status=
pub async fn list_cards_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Response, CatalogError> {
    let cards = state
        .renewals
        .list(params.search.as_deref(), params.status.as_deref())?;

    Ok((
        StatusCode::OK,
        Json(RenewalListResponse {
            summary: state.renewals.summary(),
            cards,
        }),
    )
        .into_response())
}

/// POST /card-renewal/{id}/renew
pub async fn renew_card_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, CatalogError> {
    let card = state.renewals.renew(&id)?;
    state.metrics.add_renewed(1);

    Ok((StatusCode::OK, Json(card)).into_response())
}

/// POST /card-renewal/{id}/extend
pub async fn extend_card_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, CatalogError> {
    let card = state.renewals.extend(&id)?;
    Ok((StatusCode::OK, Json(card)).into_response())
}

/// GET /card-renewal/{id}/history
pub async fn card_history_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, CatalogError> {
    let history = state.renewals.history(&id)?;
    Ok((StatusCode::OK, Json(history)).into_response())
}

/// POST /card-renewal/bulk
pub async fn bulk_renew_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BulkRenewBody>,
) -> Result<Response, CatalogError> {
    let renewed = state.renewals.bulk_renew(&body.ids)?;
    state.metrics.add_renewed(renewed.len() as u64);

    info!(requested = body.ids.len(), renewed = renewed.len(), "Bulk renewal request served");

    Ok((StatusCode::OK, Json(renewed)).into_response())
}
