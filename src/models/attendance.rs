use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockStatus {
    ClockedIn,
    ClockedOut,
}

/// A day's time-clock entry as stored under `clock-<date string>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockRecord {
    pub id: String,
    pub date: String,
    pub time_in: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
    pub status: ClockStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaffStatus {
    ClockedIn,
    ClockedOut,
    OnBreak,
}

impl StaffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffStatus::ClockedIn => "clocked-in",
            StaffStatus::ClockedOut => "clocked-out",
            StaffStatus::OnBreak => "on-break",
        }
    }

    /// Badge text shown on the board
    pub fn label(&self) -> &'static str {
        match self {
            StaffStatus::ClockedIn => "Active",
            StaffStatus::ClockedOut => "Off Duty",
            StaffStatus::OnBreak => "On Break",
        }
    }
}

impl fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub department: String,
    pub position: String,
    pub status: StaffStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
}

impl StaffMember {
    pub fn new(
        id: &str,
        name: &str,
        department: &str,
        position: &str,
        status: StaffStatus,
        time_in: Option<&str>,
        time_out: Option<&str>,
        total_hours: Option<f64>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            position: position.to_string(),
            status,
            time_in: time_in.map(str::to_string),
            time_out: time_out.map(str::to_string),
            total_hours,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffAction {
    ClockIn,
    ClockOut,
    Break,
}

impl StaffAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffAction::ClockIn => "clock-in",
            StaffAction::ClockOut => "clock-out",
            StaffAction::Break => "break",
        }
    }
}

impl FromStr for StaffAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clock-in" => Ok(StaffAction::ClockIn),
            "clock-out" => Ok(StaffAction::ClockOut),
            "break" => Ok(StaffAction::Break),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_record_json_shape() {
        let record = ClockRecord {
            id: "clock-1".to_string(),
            date: "Mon Oct 19 2026".to_string(),
            time_in: "08:00".to_string(),
            time_out: None,
            total_hours: None,
            status: ClockStatus::ClockedIn,
        };
        let json = serde_json::to_string(&record).unwrap();

        assert_eq!(
            json,
            r#"{"id":"clock-1","date":"Mon Oct 19 2026","timeIn":"08:00","status":"clocked-in"}"#
        );
    }

    #[test]
    fn test_clock_record_reads_browser_payload() {
        let json = r#"{"id":"clock-1705300000000","date":"Mon Jan 15 2024","timeIn":"08:00","timeOut":"17:30","totalHours":9.5,"status":"clocked-out"}"#;
        let record: ClockRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.status, ClockStatus::ClockedOut);
        assert_eq!(record.total_hours, Some(9.5));
        assert_eq!(record.time_out.as_deref(), Some("17:30"));
    }

    #[test]
    fn test_staff_action_parse() {
        assert_eq!("break".parse::<StaffAction>().unwrap(), StaffAction::Break);
        assert!("lunch".parse::<StaffAction>().is_err());
    }
}
