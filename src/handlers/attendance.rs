// Time clock and staff attendance endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::attendance::staff::StaffStats;
use crate::core::error::AttendanceError;
use crate::core::state::AppState;
use crate::models::api::StaffQuery;
use crate::models::attendance::{StaffAction, StaffMember};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffBoardResponse {
    pub stats: StaffStats,
    pub departments: Vec<String>,
    pub staff: Vec<StaffMember>,
    /// Staff member preselected with `?employee=`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<StaffMember>,
}

/// GET /attendance/clock
pub async fn clock_today_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AttendanceError> {
    let today = state.attendance.today()?;
    Ok((StatusCode::OK, Json(today)).into_response())
}

/// POST /attendance/clock/in
pub async fn clock_in_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AttendanceError> {
    let record = state.attendance.clock_in().await?;
    state.metrics.increment_clock_ins();

    Ok((StatusCode::OK, Json(record)).into_response())
}

/// POST /attendance/clock/out
pub async fn clock_out_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AttendanceError> {
    let record = state.attendance.clock_out().await?;
    state.metrics.increment_clock_outs();

    Ok((StatusCode::OK, Json(record)).into_response())
}

/// GET /attendance/staff?search=&department=&employee=
pub async fn staff_board_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StaffQuery>,
) -> Result<Response, AttendanceError> {
    let selected = params
        .employee
        .as_deref()
        .filter(|id| !id.is_empty())
        .and_then(|id| state.staff.get(id));

    Ok((
        StatusCode::OK,
        Json(StaffBoardResponse {
            stats: state.staff.stats(),
            departments: state.staff.departments(),
            staff: state
                .staff
                .filter(params.search.as_deref(), params.department.as_deref()),
            selected,
        }),
    )
        .into_response())
}

/// POST /attendance/staff/{id}/{action}
pub async fn staff_action_handler(
    State(state): State<Arc<AppState>>,
    Path((id, action)): Path<(String, String)>,
) -> Result<Response, AttendanceError> {
    let action: StaffAction = action.parse().map_err(AttendanceError::UnknownAction)?;

    let latency = state.simulated_latency();
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let member = state
        .staff
        .apply(&id, action)
        .inspect_err(|e| warn!(staff_id = %id, action = action.as_str(), error = %e, "Staff action rejected"))?;

    Ok((StatusCode::OK, Json(member)).into_response())
}
