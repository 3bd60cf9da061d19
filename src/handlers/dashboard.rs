// Dashboard and activity metrics endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::core::error::SessionError;
use crate::core::state::AppState;
use crate::metrics::dashboard::{build_dashboard, DashboardSources};
use crate::models::api::NavigationQuery;
use crate::navigation::views::{home_dashboard, resolve_view, View};
use crate::utils::time::current_timestamp;

/// GET /sessions/{id}/dashboard?path=
///
/// Without a path (or with a non-dashboard path) the role's home dashboard
/// is returned; `?path=/admin` selects the admin dashboard.
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<NavigationQuery>,
) -> Result<Response, SessionError> {
    let role = state
        .sessions
        .with_session(&id, current_timestamp(), |s| s.role)?;

    let variant = match params.path.as_deref().map(|p| resolve_view(p, role)) {
        Some(View::Dashboard { variant }) => variant,
        _ => home_dashboard(role),
    };

    let schedule = state.schedule.get();
    let sources = DashboardSources {
        metrics: &state.metrics,
        records: &state.records,
        print_queue: &state.print_queue,
        staff: &state.staff,
        schedule: &schedule,
        today: state.clock.today(),
    };

    Ok((StatusCode::OK, Json(build_dashboard(variant, role, &sources))).into_response())
}

/// GET /metrics
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state
        .metrics
        .get_snapshot(&state.sessions, &state.print_queue, &state.renewals);

    (StatusCode::OK, Json(snapshot)).into_response()
}
