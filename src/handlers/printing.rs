// Card printing endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::core::error::CatalogError;
use crate::core::state::AppState;
use crate::models::api::SearchQuery;

/// GET /print?search=
pub async fn list_printable_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Response, CatalogError> {
    let individuals = state.print_queue.search(params.search.as_deref());
    Ok((StatusCode::OK, Json(individuals)).into_response())
}

/// POST /print/{id}
pub async fn print_card_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, CatalogError> {
    let person = state.print_queue.print(&id)?;
    state.metrics.increment_printed();

    Ok((StatusCode::OK, Json(person)).into_response())
}

/// GET /print/{id}/pdf
pub async fn card_pdf_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, CatalogError> {
    let preview = state.print_queue.pdf(&id)?;
    Ok((StatusCode::OK, Json(preview)).into_response())
}
