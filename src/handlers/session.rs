// UI session, role switch and navigation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::SessionError;
use crate::core::state::AppState;
use crate::models::api::{NavigationQuery, RoleBody, SessionCreated, ViewQuery};
use crate::models::role::{NavItem, UserRole};
use crate::navigation::menu::navigation;
use crate::navigation::views::{resolve_view, View};
use crate::utils::time::current_timestamp;

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: UserRole,
    pub navigation: Vec<NavItem>,
}

/// POST /sessions
pub async fn create_session_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, SessionError> {
    let session = state.sessions.create(current_timestamp())?;

    info!(
        session = %session.id,
        role = %session.role,
        open_sessions = state.sessions.len(),
        "UI session opened"
    );

    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: session.id,
            role: session.role.to_string(),
        }),
    )
        .into_response())
}

/// GET /sessions/{id}/role
pub async fn get_role_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, SessionError> {
    let role = state
        .sessions
        .with_session(&id, current_timestamp(), |s| s.role)?;

    Ok((
        StatusCode::OK,
        Json(RoleResponse {
            role,
            navigation: navigation(role, "/"),
        }),
    )
        .into_response())
}

/// PUT /sessions/{id}/role
///
/// Only changes what this session renders; stored data is untouched.
pub async fn set_role_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<RoleBody>,
) -> Result<Response, SessionError> {
    let role: UserRole = body
        .role
        .parse()
        .map_err(SessionError::UnknownRole)?;

    let previous = state
        .sessions
        .with_session(&id, current_timestamp(), |s| std::mem::replace(&mut s.role, role))?;

    info!(session = %id, from = %previous, to = %role, "Role switched");

    Ok((
        StatusCode::OK,
        Json(RoleResponse {
            role,
            navigation: navigation(role, "/"),
        }),
    )
        .into_response())
}

/// GET /sessions/{id}/navigation?path=
pub async fn navigation_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<NavigationQuery>,
) -> Result<Response, SessionError> {
    let role = state
        .sessions
        .with_session(&id, current_timestamp(), |s| s.role)?;
    let path = params.path.as_deref().unwrap_or("/");

    Ok((StatusCode::OK, Json(navigation(role, path))).into_response())
}

/// GET /sessions/{id}/view?path=
///
/// Resolving an enrollment path also moves this session's wizard to the
/// stage the path names.
pub async fn view_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ViewQuery>,
) -> Result<Response, SessionError> {
    let view = state
        .sessions
        .with_session(&id, current_timestamp(), |s| {
            let view = resolve_view(&params.path, s.role);
            if let View::Enrollment { record_id: None, .. } = view {
                s.wizard.navigate(&params.path);
            }
            view
        })?;

    debug!(session = %id, path = %params.path, ?view, "View resolved");

    Ok((StatusCode::OK, Json(view)).into_response())
}
