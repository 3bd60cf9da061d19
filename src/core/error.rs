// Centralized error handling for the console

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::api::{ErrorResponse, FieldErrorResponse};

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message,
        }),
    )
        .into_response()
}

/// Errors raised by a key-value backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failure: {0}")]
    Io(String),

    #[error("Stored value under '{key}' is unreadable: {reason}")]
    Corrupt { key: String, reason: String },
}

impl From<anyhow::Error> for StorageError {
    fn from(err: anyhow::Error) -> Self {
        StorageError::Io(format!("{:#}", err))
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session capacity reached ({0} open sessions)")]
    CapacityReached(usize),

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        error_response(session_status(&self), self.to_string())
    }
}

/// Errors from the enrollment wizard
#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Required fields are empty: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("At least {required} biometric modalities are required, {captured} captured")]
    InsufficientBiometrics { captured: usize, required: usize },

    #[error("Capture device offline: {0}")]
    DeviceOffline(String),

    #[error("Unknown biometric modality: {0}")]
    UnknownModality(String),

    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl IntoResponse for WizardError {
    fn into_response(self) -> Response {
        let status = match &self {
            WizardError::MissingFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WizardError::InsufficientBiometrics { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            WizardError::DeviceOffline(_) => StatusCode::SERVICE_UNAVAILABLE,
            WizardError::UnknownModality(_) => StatusCode::BAD_REQUEST,
            WizardError::UnknownStage(_) => StatusCode::BAD_REQUEST,
            WizardError::Session(inner) => return error_response(session_status(inner), self.to_string()),
        };

        error_response(status, self.to_string())
    }
}

fn session_status(err: &SessionError) -> StatusCode {
    match err {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::CapacityReached(_) => StatusCode::SERVICE_UNAVAILABLE,
        SessionError::UnknownRole(_) => StatusCode::BAD_REQUEST,
    }
}

/// Errors from the time clock and the staff board
#[derive(Error, Debug)]
pub enum AttendanceError {
    #[error("Already clocked in at {0}")]
    AlreadyClockedIn(String),

    #[error("Not clocked in today")]
    NotClockedIn,

    #[error("A clock action is already in progress")]
    ActionInProgress,

    #[error("Staff member not found: {0}")]
    StaffNotFound(String),

    #[error("Unknown staff action: {0}")]
    UnknownAction(String),

    #[error("Cannot {action} while {status}")]
    InvalidTransition { action: String, status: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for AttendanceError {
    fn into_response(self) -> Response {
        let status = match &self {
            AttendanceError::AlreadyClockedIn(_) => StatusCode::CONFLICT,
            AttendanceError::NotClockedIn => StatusCode::CONFLICT,
            AttendanceError::ActionInProgress => StatusCode::CONFLICT,
            AttendanceError::StaffNotFound(_) => StatusCode::NOT_FOUND,
            AttendanceError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            AttendanceError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AttendanceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error_response(status, self.to_string())
    }
}

/// Errors from records, printing and card renewal
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("No cards selected")]
    NoSelection,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::NoSelection => StatusCode::BAD_REQUEST,
            CatalogError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        };

        error_response(status, self.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid schedule settings")]
    Invalid(BTreeMap<String, String>),

    #[error("Invalid time value for {field}: {value}")]
    InvalidTime { field: String, value: String },
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        let fields = match &self {
            ScheduleError::Invalid(fields) => fields.clone(),
            ScheduleError::InvalidTime { field, value } => {
                BTreeMap::from([(field.clone(), format!("'{}' is not a HH:MM time", value))])
            }
        };

        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(FieldErrorResponse {
                success: false,
                error: self.to_string(),
                fields,
            }),
        )
            .into_response()
    }
}
