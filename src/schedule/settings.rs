use chrono::{NaiveTime, Timelike};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::info;

use crate::core::error::ScheduleError;
use crate::models::schedule::ScheduleSettings;
use crate::utils::time::parse_hhmm;

fn parse_field(field: &str, value: &str) -> Result<NaiveTime, ScheduleError> {
    parse_hhmm(value).ok_or_else(|| ScheduleError::InvalidTime {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Check a schedule. Every failing rule is reported against its field.
pub fn validate(settings: &ScheduleSettings) -> Result<(), ScheduleError> {
    let work_start = minutes(parse_field("workStartTime", &settings.work_start_time)?);
    let work_end = minutes(parse_field("workEndTime", &settings.work_end_time)?);
    let break_start = minutes(parse_field("breakStartTime", &settings.break_start_time)?);

    let mut errors = BTreeMap::new();

    if work_end <= work_start {
        errors.insert(
            "workEndTime".to_string(),
            "Work end time must be after work start time".to_string(),
        );
    }

    if break_start < work_start || break_start > work_end {
        errors.insert(
            "breakStartTime".to_string(),
            "Break start time must be between work start and end times".to_string(),
        );
    }

    let break_end = break_start.checked_add(settings.break_duration);
    if break_end.map_or(true, |end| end > work_end) {
        errors.insert(
            "breakDuration".to_string(),
            "Break duration extends beyond work end time".to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ScheduleError::Invalid(errors))
    }
}

/// Company-wide schedule, held in memory
pub struct ScheduleStore {
    current: RwLock<ScheduleSettings>,
}

impl ScheduleStore {
    pub fn new(settings: ScheduleSettings) -> Self {
        Self {
            current: RwLock::new(settings),
        }
    }

    pub fn get(&self) -> ScheduleSettings {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Validate and replace the whole schedule; an invalid update leaves the
    /// current one untouched.
    pub fn update(&self, settings: ScheduleSettings) -> Result<ScheduleSettings, ScheduleError> {
        validate(&settings)?;

        *self.current.write().unwrap_or_else(|e| e.into_inner()) = settings.clone();
        info!(
            work_start = %settings.work_start_time,
            work_end = %settings.work_end_time,
            break_start = %settings.break_start_time,
            break_duration = settings.break_duration,
            "Schedule updated"
        );
        Ok(settings)
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new(ScheduleSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(start: &str, end: &str, break_start: &str, duration: u32) -> ScheduleSettings {
        ScheduleSettings {
            work_start_time: start.to_string(),
            work_end_time: end.to_string(),
            break_start_time: break_start.to_string(),
            break_duration: duration,
        }
    }

    fn fields(err: ScheduleError) -> Vec<String> {
        match err {
            ScheduleError::Invalid(fields) => fields.into_keys().collect(),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&ScheduleSettings::default()).is_ok());
    }

    #[test]
    fn test_end_before_start() {
        let err = validate(&settings("17:00", "08:00", "12:00", 30)).unwrap_err();
        assert_eq!(
            fields(err),
            vec!["breakDuration", "breakStartTime", "workEndTime"]
        );
    }

    #[test]
    fn test_break_outside_work_hours() {
        let err = validate(&settings("08:00", "17:00", "07:00", 30)).unwrap_err();
        assert_eq!(fields(err), vec!["breakStartTime"]);
    }

    #[test]
    fn test_break_running_past_end() {
        let err = validate(&settings("08:00", "17:00", "16:30", 45)).unwrap_err();
        assert_eq!(fields(err), vec!["breakDuration"]);

        // ending exactly at work end is fine
        assert!(validate(&settings("08:00", "17:00", "16:30", 30)).is_ok());
    }

    #[test]
    fn test_huge_break_duration_is_rejected() {
        let err = validate(&settings("08:00", "17:00", "12:00", u32::MAX)).unwrap_err();
        assert_eq!(fields(err), vec!["breakDuration"]);

        let store = ScheduleStore::default();
        assert!(store.update(settings("08:00", "17:00", "12:00", u32::MAX)).is_err());
        assert_eq!(store.get(), ScheduleSettings::default());
    }

    #[test]
    fn test_unparsable_time() {
        let err = validate(&settings("8am", "17:00", "12:00", 60)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTime { ref field, .. } if field == "workStartTime"));
    }

    #[test]
    fn test_invalid_update_keeps_current() {
        let store = ScheduleStore::default();

        assert!(store.update(settings("09:00", "08:00", "12:00", 60)).is_err());
        assert_eq!(store.get(), ScheduleSettings::default());

        let updated = store.update(settings("07:00", "16:00", "11:30", 45)).unwrap();
        assert_eq!(store.get(), updated);
    }
}
