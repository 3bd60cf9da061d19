use crate::core::error::WizardError;
use crate::models::enrollment::BiometricModality;

/// Distinct modalities needed before review
pub const MIN_MODALITIES: usize = 2;

/// Set of captured modalities for one wizard, in capture order.
///
/// Capture is simulated and instantaneous. There is no removal: recapturing a
/// modality leaves the set unchanged.
#[derive(Debug, Clone)]
pub struct CaptureTracker {
    captured: Vec<BiometricModality>,
    iris_online: bool,
}

impl CaptureTracker {
    pub fn new(iris_online: bool) -> Self {
        Self {
            captured: Vec::with_capacity(3),
            iris_online,
        }
    }

    /// Record a capture. Returns `true` when the modality was new.
    pub fn capture(&mut self, modality: BiometricModality) -> Result<bool, WizardError> {
        if modality == BiometricModality::Iris && !self.iris_online {
            return Err(WizardError::DeviceOffline("iris scanner".to_string()));
        }

        if self.captured.contains(&modality) {
            return Ok(false);
        }

        self.captured.push(modality);
        Ok(true)
    }

    pub fn contains(&self, modality: BiometricModality) -> bool {
        self.captured.contains(&modality)
    }

    pub fn captured(&self) -> &[BiometricModality] {
        &self.captured
    }

    pub fn len(&self) -> usize {
        self.captured.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.captured.len() >= MIN_MODALITIES
    }

    pub fn iris_online(&self) -> bool {
        self.iris_online
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_is_idempotent() {
        let mut tracker = CaptureTracker::new(true);

        assert!(tracker.capture(BiometricModality::Fingerprint).unwrap());
        assert!(!tracker.capture(BiometricModality::Fingerprint).unwrap());
        assert_eq!(tracker.len(), 1);
        assert!(!tracker.is_complete());
    }

    #[test]
    fn test_two_distinct_modalities_complete() {
        let mut tracker = CaptureTracker::new(false);

        tracker.capture(BiometricModality::Photo).unwrap();
        tracker.capture(BiometricModality::Fingerprint).unwrap();

        assert!(tracker.is_complete());
        assert_eq!(
            tracker.captured(),
            &[BiometricModality::Photo, BiometricModality::Fingerprint]
        );
    }

    #[test]
    fn test_iris_offline_is_rejected() {
        let mut tracker = CaptureTracker::new(false);

        let result = tracker.capture(BiometricModality::Iris);
        assert!(matches!(result, Err(WizardError::DeviceOffline(_))));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_iris_online_counts() {
        let mut tracker = CaptureTracker::new(true);

        tracker.capture(BiometricModality::Iris).unwrap();
        tracker.capture(BiometricModality::Photo).unwrap();
        assert!(tracker.is_complete());
        assert!(tracker.contains(BiometricModality::Iris));
    }
}
