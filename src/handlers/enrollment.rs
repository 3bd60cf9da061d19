// Enrollment wizard endpoints, scoped to one UI session

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::error::WizardError;
use crate::core::state::AppState;
use crate::models::api::{AdvanceBody, NavigateBody};
use crate::models::enrollment::{BiometricModality, DemographicsUpdate, Stage};
use crate::utils::time::current_timestamp;
use crate::wizard::controller::{Wizard, WizardSnapshot};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureResponse {
    pub modality: BiometricModality,
    pub newly_captured: bool,
    pub wizard: WizardSnapshot,
}

fn with_wizard<T>(
    state: &AppState,
    id: &str,
    f: impl FnOnce(&mut Wizard) -> Result<T, WizardError>,
) -> Result<T, WizardError> {
    state
        .sessions
        .with_session(id, current_timestamp(), |s| f(&mut s.wizard))?
}

fn snapshot_response(snapshot: WizardSnapshot) -> Response {
    (StatusCode::OK, Json(snapshot)).into_response()
}

/// GET /sessions/{id}/enroll
pub async fn snapshot_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, WizardError> {
    let snapshot = with_wizard(&state, &id, |w| Ok(w.snapshot()))?;
    Ok(snapshot_response(snapshot))
}

/// POST /sessions/{id}/enroll/navigate
///
/// Path-driven stage change. Never blocked by the forward checks.
pub async fn navigate_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<NavigateBody>,
) -> Result<Response, WizardError> {
    let snapshot = with_wizard(&state, &id, |w| {
        w.navigate(&body.path);
        Ok(w.snapshot())
    })?;

    if !snapshot.guards_satisfied {
        debug!(session = %id, path = %body.path, "Stage reached by path without passing checks");
    }

    Ok(snapshot_response(snapshot))
}

/// PUT /sessions/{id}/enroll/demographics
pub async fn demographics_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<DemographicsUpdate>,
) -> Result<Response, WizardError> {
    let snapshot = with_wizard(&state, &id, |w| {
        w.update_demographics(update);
        Ok(w.snapshot())
    })?;

    Ok(snapshot_response(snapshot))
}

/// POST /sessions/{id}/enroll/biometrics/{modality}
pub async fn capture_handler(
    State(state): State<Arc<AppState>>,
    Path((id, modality)): Path<(String, String)>,
) -> Result<Response, WizardError> {
    let modality: BiometricModality = modality
        .parse()
        .map_err(WizardError::UnknownModality)?;

    let (newly_captured, wizard) = with_wizard(&state, &id, |w| {
        let newly_captured = w.capture(modality)?;
        Ok((newly_captured, w.snapshot()))
    })
    .inspect_err(|e| warn!(session = %id, %modality, error = %e, "Capture failed"))?;

    debug!(session = %id, %modality, newly_captured, "Biometric captured");

    Ok((
        StatusCode::OK,
        Json(CaptureResponse {
            modality,
            newly_captured,
            wizard,
        }),
    )
        .into_response())
}

/// POST /sessions/{id}/enroll/advance
///
/// Button-driven stage change; forward moves are checked.
pub async fn advance_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<AdvanceBody>,
) -> Result<Response, WizardError> {
    let target: Stage = body.stage.parse().map_err(WizardError::UnknownStage)?;

    let snapshot = with_wizard(&state, &id, |w| {
        w.advance(target)?;
        Ok(w.snapshot())
    })?;

    Ok(snapshot_response(snapshot))
}

/// POST /sessions/{id}/enroll/submit
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, WizardError> {
    let submission = with_wizard(&state, &id, |w| Ok(w.submit()))?;
    state.metrics.increment_enrollments(state.clock.today());

    Ok((StatusCode::OK, Json(submission)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::handlers::test_support::{
        create_test_config, create_test_state, create_test_state_with, open_session, read_json,
    };
    use crate::models::enrollment::FormVariant;
    use serde_json::Value;

    async fn fill_demographics(state: &Arc<AppState>, id: &str) {
        demographics_handler(
            State(state.clone()),
            Path(id.to_string()),
            Json(DemographicsUpdate {
                first_name: Some("John".to_string()),
                last_name: Some("Doe".to_string()),
                date_of_birth: Some("1985-03-15".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
    }

    async fn capture(state: &Arc<AppState>, id: &str, modality: &str) -> Result<Response, WizardError> {
        capture_handler(
            State(state.clone()),
            Path((id.to_string(), modality.to_string())),
        )
        .await
    }

    async fn advance(state: &Arc<AppState>, id: &str, stage: &str) -> Result<Response, WizardError> {
        advance_handler(
            State(state.clone()),
            Path(id.to_string()),
            Json(AdvanceBody { stage: stage.to_string() }),
        )
        .await
    }

    #[tokio::test]
    async fn test_initial_snapshot() {
        let state = create_test_state();
        let id = open_session(&state);

        let response = snapshot_handler(State(state), Path(id)).await.unwrap();
        let snapshot: Value = read_json(response).await;

        assert_eq!(snapshot["stage"], "demographics");
        assert_eq!(snapshot["path"], "/enroll/demographics");
        assert_eq!(snapshot["progress"]["step"], 1);
        assert_eq!(snapshot["irisScannerOnline"], false);
    }

    #[tokio::test]
    async fn test_full_enrollment_flow() {
        let state = create_test_state();
        let id = open_session(&state);

        let err = advance(&state, &id, "biometrics").await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        fill_demographics(&state, &id).await;
        let response = advance(&state, &id, "biometrics").await.unwrap();
        let snapshot: Value = read_json(response).await;
        assert_eq!(snapshot["path"], "/enroll/biometrics");

        capture(&state, &id, "fingerprint").await.unwrap();
        let err = advance(&state, &id, "review").await.unwrap_err();
        assert!(matches!(err, WizardError::InsufficientBiometrics { captured: 1, .. }));

        capture(&state, &id, "photo").await.unwrap();
        let response = advance(&state, &id, "review").await.unwrap();
        let snapshot: Value = read_json(response).await;
        assert_eq!(snapshot["stage"], "review");
        assert_eq!(snapshot["progress"]["percent"], 100.0);

        let response = submit_handler(State(state.clone()), Path(id.clone()))
            .await
            .unwrap();
        let submission: Value = read_json(response).await;
        assert_eq!(submission["name"], "John Doe");
        assert_eq!(submission["redirect"], "/");
        assert_eq!(submission["guardsSatisfied"], true);

        assert_eq!(state.metrics.enrollments(), 1);
        assert_eq!(state.metrics.enrollments_on(state.clock.today()), 1);
        assert_eq!(state.sessions.get(&id).unwrap().wizard.stage(), Stage::Demographics);
    }

    #[tokio::test]
    async fn test_recapture_reports_not_new() {
        let state = create_test_state();
        let id = open_session(&state);

        let first: CaptureResponseBody = read_json(capture(&state, &id, "photo").await.unwrap()).await;
        let second: CaptureResponseBody = read_json(capture(&state, &id, "photo").await.unwrap()).await;

        assert!(first.newly_captured);
        assert!(!second.newly_captured);
    }

    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CaptureResponseBody {
        newly_captured: bool,
    }

    #[tokio::test]
    async fn test_iris_offline_is_service_unavailable() {
        let state = create_test_state();
        let id = open_session(&state);

        let err = capture(&state, &id, "iris").await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_iris_online_when_configured() {
        let mut config: Config = create_test_config();
        config.enrollment.iris_scanner_online = true;
        let (state, _) = create_test_state_with(config);
        let id = open_session(&state);

        assert!(capture(&state, &id, "iris").await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_modality_and_stage() {
        let state = create_test_state();
        let id = open_session(&state);

        let err = capture(&state, &id, "retina").await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = advance(&state, &id, "payment").await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_navigate_bypasses_checks() {
        let state = create_test_state();
        let id = open_session(&state);

        let response = navigate_handler(
            State(state),
            Path(id),
            Json(NavigateBody { path: "/enroll/review".to_string() }),
        )
        .await
        .unwrap();
        let snapshot: Value = read_json(response).await;

        assert_eq!(snapshot["stage"], "review");
        assert_eq!(snapshot["guardsSatisfied"], false);
    }

    #[tokio::test]
    async fn test_seafarer_form_requires_sid_and_rank() {
        let mut config = create_test_config();
        config.enrollment.form_variant = FormVariant::Seafarer;
        let (state, _) = create_test_state_with(config);
        let id = open_session(&state);

        fill_demographics(&state, &id).await;
        let err = advance(&state, &id, "biometrics").await.unwrap_err();
        assert!(matches!(err, WizardError::MissingFields(ref f) if f == &["sid", "rank"]));
    }

    #[tokio::test]
    async fn test_wizard_of_unknown_session() {
        let state = create_test_state();

        let err = snapshot_handler(State(state), Path("nope".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
