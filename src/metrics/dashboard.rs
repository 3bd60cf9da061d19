use chrono::NaiveDate;
use serde::Serialize;

use crate::attendance::staff::StaffBoard;
use crate::catalog::printing::PrintQueue;
use crate::catalog::records::RecordBook;
use crate::metrics::collector::Metrics;
use crate::models::role::UserRole;
use crate::models::schedule::ScheduleSettings;
use crate::navigation::views::DashboardVariant;
use crate::utils::time::{parse_hhmm, round2};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

impl StatCard {
    fn new(title: &'static str, value: impl ToString) -> Self {
        Self {
            title,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub variant: DashboardVariant,
    pub role: UserRole,
    pub title: &'static str,
    pub stats: Vec<StatCard>,
}

/// Everything a dashboard reads from
pub struct DashboardSources<'a> {
    pub metrics: &'a Metrics,
    pub records: &'a RecordBook,
    pub print_queue: &'a PrintQueue,
    pub staff: &'a StaffBoard,
    pub schedule: &'a ScheduleSettings,
    pub today: NaiveDate,
}

pub fn build_dashboard(
    variant: DashboardVariant,
    role: UserRole,
    sources: &DashboardSources<'_>,
) -> Dashboard {
    let (title, stats) = match variant {
        DashboardVariant::Operator => ("Operator Dashboard", operator_stats(sources)),
        DashboardVariant::Main => ("Dashboard", main_stats(sources)),
        DashboardVariant::Admin => ("Admin Dashboard", admin_stats(sources)),
    };

    Dashboard {
        variant,
        role,
        title,
        stats,
    }
}

fn operator_stats(sources: &DashboardSources<'_>) -> Vec<StatCard> {
    let counts = sources.records.counts();

    vec![
        StatCard::new("Today's Enrollments", sources.metrics.enrollments_on(sources.today)),
        StatCard::new("Pending Queue", counts.pending),
        StatCard::new("Cards Printed", sources.print_queue.printed_count()),
    ]
}

fn main_stats(sources: &DashboardSources<'_>) -> Vec<StatCard> {
    let counts = sources.records.counts();
    let submitted = sources.metrics.enrollments();

    vec![
        StatCard::new("Total Enrolled", counts.total as u64 + submitted),
        StatCard::new("Today's Enrollments", sources.metrics.enrollments_on(sources.today)),
        StatCard::new("Cards Printed", sources.print_queue.printed_count()),
        StatCard::new("Pending Reviews", counts.pending + counts.review),
    ]
}

fn admin_stats(sources: &DashboardSources<'_>) -> Vec<StatCard> {
    let staff = sources.staff.list();
    let work_start = parse_hhmm(&sources.schedule.work_start_time);

    let clocked_in: Vec<_> = staff.iter().filter(|m| m.time_in.is_some()).collect();
    let missing_out = clocked_in.iter().filter(|m| m.time_out.is_none()).count();
    let late = clocked_in
        .iter()
        .filter_map(|m| m.time_in.as_deref().and_then(parse_hhmm))
        .filter(|time_in| work_start.map_or(false, |start| *time_in > start))
        .count();

    let hours: Vec<f64> = staff.iter().filter_map(|m| m.total_hours).collect();
    let average = if hours.is_empty() {
        0.0
    } else {
        round2(hours.iter().sum::<f64>() / hours.len() as f64)
    };

    vec![
        StatCard::new("Total Clock-ins Today", clocked_in.len()),
        StatCard::new("Missing Clock-outs", missing_out),
        StatCard::new("Average Hours", average),
        StatCard::new("Late Arrivals", late),
    ]
}
