// Enrollment record endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;

use crate::catalog::records::RecordCounts;
use crate::core::error::CatalogError;
use crate::core::state::AppState;
use crate::models::api::SearchQuery;
use crate::models::record::EnrollmentRecord;

#[derive(Debug, Serialize)]
pub struct RecordListResponse {
    pub counts: RecordCounts,
    pub records: Vec<EnrollmentRecord>,
}

/// GET /records?search=&status=
pub async fn list_records_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Response, CatalogError> {
    let records = state
        .records
        .search(params.search.as_deref(), params.status.as_deref())?;

    Ok((
        StatusCode::OK,
        Json(RecordListResponse {
            counts: state.records.counts(),
            records,
        }),
    )
        .into_response())
}

/// GET /records/{id}
pub async fn get_record_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, CatalogError> {
    let record = state.records.get(&id)?;
    Ok((StatusCode::OK, Json(record)).into_response())
}
