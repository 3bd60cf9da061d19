use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::core::error::ScheduleError;
use crate::core::state::AppState;
use crate::models::schedule::ScheduleSettings;

/// GET /schedule
pub async fn get_schedule_handler(State(state): State<Arc<AppState>>) -> Response {
    (StatusCode::OK, Json(state.schedule.get())).into_response()
}

/// PUT /schedule
pub async fn update_schedule_handler(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<ScheduleSettings>,
) -> Result<Response, ScheduleError> {
    let settings = state.schedule.update(settings)?;
    Ok((StatusCode::OK, Json(settings)).into_response())
}
