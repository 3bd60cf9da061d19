use serde::Serialize;
use tracing::{debug, info};

use crate::core::error::WizardError;
use crate::models::enrollment::{
    BiometricModality, DemographicsUpdate, EnrollmentDraft, FormVariant, Stage,
};
use crate::wizard::biometrics::{CaptureTracker, MIN_MODALITIES};
use crate::wizard::demographics;
use crate::wizard::stage::{progress, stage_from_path, stage_path, Progress};

/// Where the console goes after a submission
pub const SUBMIT_REDIRECT: &str = "/";

/// Linear three-stage enrollment flow for one UI session.
#[derive(Debug, Clone)]
pub struct Wizard {
    stage: Stage,
    draft: EnrollmentDraft,
    tracker: CaptureTracker,
    variant: FormVariant,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub stage: Stage,
    pub path: String,
    pub progress: Progress,
    pub form_variant: FormVariant,
    pub draft: EnrollmentDraft,
    pub captured: Vec<BiometricModality>,
    pub missing_fields: Vec<&'static str>,
    pub demographics_complete: bool,
    pub biometrics_complete: bool,
    pub iris_scanner_online: bool,
    /// False when the current stage was reached by path without passing the
    /// forward checks
    pub guards_satisfied: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub name: String,
    pub captured: Vec<BiometricModality>,
    pub guards_satisfied: bool,
    pub redirect: &'static str,
}

impl Wizard {
    pub fn new(variant: FormVariant, iris_online: bool) -> Self {
        Self {
            stage: Stage::Demographics,
            draft: EnrollmentDraft::default(),
            tracker: CaptureTracker::new(iris_online),
            variant,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn path(&self) -> String {
        stage_path(self.stage)
    }

    pub fn draft(&self) -> &EnrollmentDraft {
        &self.draft
    }

    pub fn tracker(&self) -> &CaptureTracker {
        &self.tracker
    }

    /// Re-derive the stage from a path. Unguarded: the path always wins.
    pub fn navigate(&mut self, path: &str) -> Stage {
        let stage = stage_from_path(path);
        if stage != self.stage {
            debug!(from = %self.stage, to = %stage, path, "Wizard stage synced from path");
            self.stage = stage;
        }
        stage
    }

    /// Button-driven stage change. Moving forward checks every stage being
    /// left behind; moving back or staying put always succeeds.
    pub fn advance(&mut self, target: Stage) -> Result<Stage, WizardError> {
        if target.index() > self.stage.index() {
            self.check_reachable(target)?;
        }

        self.stage = target;
        Ok(target)
    }

    fn check_reachable(&self, target: Stage) -> Result<(), WizardError> {
        if target.index() >= Stage::Biometrics.index() {
            let missing = demographics::missing_fields(&self.draft, self.variant);
            if !missing.is_empty() {
                return Err(WizardError::MissingFields(
                    missing.into_iter().map(str::to_string).collect(),
                ));
            }
        }

        if target == Stage::Review && !self.tracker.is_complete() {
            return Err(WizardError::InsufficientBiometrics {
                captured: self.tracker.len(),
                required: MIN_MODALITIES,
            });
        }

        Ok(())
    }

    pub fn guards_satisfied(&self) -> bool {
        self.check_reachable(self.stage).is_ok()
    }

    pub fn update_demographics(&mut self, update: DemographicsUpdate) {
        self.draft.apply(update);
    }

    pub fn capture(&mut self, modality: BiometricModality) -> Result<bool, WizardError> {
        self.tracker.capture(modality)
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        let missing_fields = demographics::missing_fields(&self.draft, self.variant);

        WizardSnapshot {
            stage: self.stage,
            path: self.path(),
            progress: progress(self.stage),
            form_variant: self.variant,
            draft: self.draft.clone(),
            captured: self.tracker.captured().to_vec(),
            demographics_complete: missing_fields.is_empty(),
            missing_fields,
            biometrics_complete: self.tracker.is_complete(),
            iris_scanner_online: self.tracker.iris_online(),
            guards_satisfied: self.guards_satisfied(),
        }
    }

    /// Finish the enrollment. Nothing is persisted; the wizard is reset and
    /// the caller is sent back to the dashboard.
    pub fn submit(&mut self) -> Submission {
        let submission = Submission {
            name: self.draft.full_name(),
            captured: self.tracker.captured().to_vec(),
            guards_satisfied: self.guards_satisfied(),
            redirect: SUBMIT_REDIRECT,
        };

        info!(
            name = %submission.name,
            captured = submission.captured.len(),
            stage = %self.stage,
            guards_satisfied = submission.guards_satisfied,
            "Enrollment submitted"
        );

        *self = Wizard::new(self.variant, self.tracker.iris_online());
        submission
    }
}
