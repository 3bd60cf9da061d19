use serde::{Deserialize, Serialize};

/// Company-wide working hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSettings {
    pub work_start_time: String,
    pub work_end_time: String,
    pub break_start_time: String,
    /// Minutes
    pub break_duration: u32,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            work_start_time: "08:00".to_string(),
            work_end_time: "17:00".to_string(),
            break_start_time: "12:00".to_string(),
            break_duration: 60,
        }
    }
}
