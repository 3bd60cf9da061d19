use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::core::error::AttendanceError;
use crate::models::attendance::{StaffAction, StaffMember, StaffStatus};
use crate::utils::time::{format_hhmm, hours_between, Clock};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffStats {
    pub total: usize,
    pub active: usize,
    pub on_break: usize,
    pub off_duty: usize,
}

/// Staff attendance board shared by every session.
pub struct StaffBoard {
    staff: DashMap<String, StaffMember>,
    clock: Arc<dyn Clock>,
}

impl StaffBoard {
    pub fn new(members: Vec<StaffMember>, clock: Arc<dyn Clock>) -> Self {
        let staff = DashMap::with_capacity(members.len());
        for member in members {
            staff.insert(member.id.clone(), member);
        }
        Self { staff, clock }
    }

    /// All staff ordered by id
    pub fn list(&self) -> Vec<StaffMember> {
        let mut members: Vec<StaffMember> =
            self.staff.iter().map(|entry| entry.value().clone()).collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));
        members
    }

    pub fn get(&self, id: &str) -> Option<StaffMember> {
        self.staff.get(id).map(|entry| entry.value().clone())
    }

    /// Case-insensitive search over name or department, plus an exact
    /// department filter (`all` or empty matches everything).
    pub fn filter(&self, search: Option<&str>, department: Option<&str>) -> Vec<StaffMember> {
        let needle = search.map(str::to_lowercase).unwrap_or_default();
        let department = department.filter(|d| !d.is_empty() && *d != "all");

        self.list()
            .into_iter()
            .filter(|member| {
                needle.is_empty()
                    || member.name.to_lowercase().contains(&needle)
                    || member.department.to_lowercase().contains(&needle)
            })
            .filter(|member| department.map_or(true, |d| member.department == d))
            .collect()
    }

    pub fn departments(&self) -> Vec<String> {
        let mut departments: Vec<String> = self
            .staff
            .iter()
            .map(|entry| entry.department.clone())
            .collect();
        departments.sort();
        departments.dedup();
        departments
    }

    pub fn stats(&self) -> StaffStats {
        let mut stats = StaffStats::default();
        for entry in self.staff.iter() {
            stats.total += 1;
            match entry.status {
                StaffStatus::ClockedIn => stats.active += 1,
                StaffStatus::OnBreak => stats.on_break += 1,
                StaffStatus::ClockedOut => stats.off_duty += 1,
            }
        }
        stats
    }

    pub fn apply(&self, id: &str, action: StaffAction) -> Result<StaffMember, AttendanceError> {
        let mut member = self
            .staff
            .get_mut(id)
            .ok_or_else(|| AttendanceError::StaffNotFound(id.to_string()))?;

        let now = format_hhmm(self.clock.now().time());
        let previous = member.status;

        match (action, previous) {
            (StaffAction::ClockIn, StaffStatus::ClockedOut) => {
                member.status = StaffStatus::ClockedIn;
                member.time_in = Some(now);
                member.time_out = None;
                member.total_hours = None;
            }
            (StaffAction::ClockOut, StaffStatus::ClockedIn | StaffStatus::OnBreak) => {
                member.total_hours = member
                    .time_in
                    .as_deref()
                    .and_then(|time_in| hours_between(time_in, &now));
                member.time_out = Some(now);
                member.status = StaffStatus::ClockedOut;
            }
            (StaffAction::Break, StaffStatus::ClockedIn) => member.status = StaffStatus::OnBreak,
            (StaffAction::Break, StaffStatus::OnBreak) => member.status = StaffStatus::ClockedIn,
            (action, status) => {
                return Err(AttendanceError::InvalidTransition {
                    action: action.as_str().to_string(),
                    status: status.as_str().to_string(),
                })
            }
        }

        info!(
            staff_id = %member.id,
            name = %member.name,
            action = action.as_str(),
            from = %previous,
            to = %member.status,
            "Staff status updated"
        );

        Ok(member.value().clone())
    }
}
