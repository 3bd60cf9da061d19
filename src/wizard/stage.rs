//! Pure mapping between wizard stages and `/enroll/...` paths.
//!
//! The path is the source of truth for which stage is shown; the stage held
//! by a [`Wizard`](crate::wizard::controller::Wizard) is a cache of it.

use crate::models::enrollment::Stage;
use crate::utils::time::round2;
use serde::Serialize;

pub const ENROLL_ROOT: &str = "/enroll";

/// Derive the stage from a path. Unrecognised paths land on demographics.
pub fn stage_from_path(path: &str) -> Stage {
    let path = path.split(['?', '#']).next().unwrap_or("");

    if path.contains("/biometrics") {
        Stage::Biometrics
    } else if path.contains("/review") {
        Stage::Review
    } else {
        Stage::Demographics
    }
}

/// Inverse of [`stage_from_path`]
pub fn stage_path(stage: Stage) -> String {
    format!("{}/{}", ENROLL_ROOT, stage.as_str())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub step: usize,
    pub total_steps: usize,
    pub percent: f64,
    pub label: &'static str,
}

pub fn progress(stage: Stage) -> Progress {
    let total_steps = Stage::ALL.len();
    let step = stage.index() + 1;

    Progress {
        step,
        total_steps,
        percent: round2(step as f64 / total_steps as f64 * 100.0),
        label: stage.label(),
    }
}
