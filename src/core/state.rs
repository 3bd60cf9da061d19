// Application state (AppState)

use crate::attendance::clock::AttendanceClock;
use crate::attendance::staff::StaffBoard;
use crate::catalog::{printing::PrintQueue, records::RecordBook, renewal::RenewalDesk};
use crate::core::config::Config;
use crate::metrics::collector::Metrics;
use crate::schedule::settings::ScheduleStore;
use crate::stores::fixtures;
use crate::stores::kv::KvStore;
use crate::stores::session_store::SessionStore;
use crate::utils::time::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
///
/// All fields are wrapped in Arc for cheap cloning across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Open UI sessions (role + enrollment wizard)
    pub sessions: Arc<SessionStore>,

    /// Durable key-value storage for clock records
    pub kv: Arc<dyn KvStore>,

    pub clock: Arc<dyn Clock>,

    /// Personal time clock
    pub attendance: Arc<AttendanceClock>,

    /// Staff attendance board
    pub staff: Arc<StaffBoard>,

    pub records: Arc<RecordBook>,

    pub print_queue: Arc<PrintQueue>,

    pub renewals: Arc<RenewalDesk>,

    pub schedule: Arc<ScheduleStore>,

    /// Activity counters for dashboards
    pub metrics: Arc<Metrics>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, kv: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        let config = Arc::new(config);

        let sessions = Arc::new(SessionStore::new(
            config.sessions.capacity,
            config.enrollment.form_variant,
            config.enrollment.iris_scanner_online,
        ));

        let attendance = Arc::new(AttendanceClock::new(
            Arc::clone(&kv),
            Arc::clone(&clock),
            Duration::from_millis(config.attendance.simulated_latency_ms),
        ));

        Self {
            sessions,
            attendance,
            staff: Arc::new(StaffBoard::new(fixtures::seed_staff(), Arc::clone(&clock))),
            records: Arc::new(RecordBook::new(fixtures::seed_records())),
            print_queue: Arc::new(PrintQueue::new(fixtures::seed_printables())),
            renewals: Arc::new(RenewalDesk::new(fixtures::seed_cards(), Arc::clone(&clock))),
            schedule: Arc::new(ScheduleStore::default()),
            metrics: Arc::new(Metrics::new()),
            kv,
            clock,
            config,
        }
    }

    /// Simulated round trip applied before attendance actions
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.config.attendance.simulated_latency_ms)
    }
}
