use chrono::NaiveDate;
use dashmap::DashSet;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::error::{AttendanceError, StorageError};
use crate::models::attendance::{ClockRecord, ClockStatus};
use crate::stores::kv::KvStore;
use crate::utils::ids::clock_record_id;
use crate::utils::time::{date_string, format_hhmm, hours_between, working_time, Clock};

/// Storage key for a day's record
pub fn clock_key(date: NaiveDate) -> String {
    format!("clock-{}", date_string(date))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayView {
    pub key: String,
    pub date: String,
    pub record: Option<ClockRecord>,
    /// Elapsed time since clock-in, only while clocked in
    pub working_time: Option<String>,
}

/// Personal time clock persisted one record per day.
pub struct AttendanceClock {
    kv: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    latency: Duration,
    in_flight: DashSet<String>,
}

/// Holds a key in the in-flight set until dropped
struct InFlight<'a> {
    set: &'a DashSet<String>,
    key: String,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.key);
    }
}

impl AttendanceClock {
    pub fn new(kv: Arc<dyn KvStore>, clock: Arc<dyn Clock>, latency: Duration) -> Self {
        Self {
            kv,
            clock,
            latency,
            in_flight: DashSet::new(),
        }
    }

    pub fn today(&self) -> Result<TodayView, AttendanceError> {
        let now = self.clock.now();
        let key = clock_key(now.date());
        let record = self.load(&key)?;

        let working_time = record
            .as_ref()
            .filter(|r| r.status == ClockStatus::ClockedIn)
            .and_then(|r| working_time(&r.time_in, now.time()));

        Ok(TodayView {
            key,
            date: date_string(now.date()),
            record,
            working_time,
        })
    }

    pub async fn clock_in(&self) -> Result<ClockRecord, AttendanceError> {
        let _guard = self.begin(&clock_key(self.clock.today()))?;
        self.simulate_latency().await;

        // key and record both come from the instant the action lands
        let now = self.clock.now();
        let key = clock_key(now.date());

        if let Some(existing) = self.load(&key)? {
            if existing.status == ClockStatus::ClockedIn {
                return Err(AttendanceError::AlreadyClockedIn(existing.time_in));
            }
        }

        let record = ClockRecord {
            id: clock_record_id(self.clock.epoch_millis()),
            date: date_string(now.date()),
            time_in: format_hhmm(now.time()),
            time_out: None,
            total_hours: None,
            status: ClockStatus::ClockedIn,
        };

        self.store(&key, &record)?;
        info!(key = %key, time_in = %record.time_in, "Clocked in");
        Ok(record)
    }

    pub async fn clock_out(&self) -> Result<ClockRecord, AttendanceError> {
        let _guard = self.begin(&clock_key(self.clock.today()))?;
        self.simulate_latency().await;

        let now = self.clock.now();
        let key = clock_key(now.date());

        let mut record = match self.load(&key)? {
            Some(record) if record.status == ClockStatus::ClockedIn => record,
            _ => return Err(AttendanceError::NotClockedIn),
        };

        let time_out = format_hhmm(now.time());
        record.total_hours = hours_between(&record.time_in, &time_out);
        record.time_out = Some(time_out);
        record.status = ClockStatus::ClockedOut;

        self.store(&key, &record)?;
        info!(
            key = %key,
            time_in = %record.time_in,
            time_out = record.time_out.as_deref().unwrap_or_default(),
            total_hours = record.total_hours.unwrap_or_default(),
            "Clocked out"
        );
        Ok(record)
    }

    fn begin(&self, key: &str) -> Result<InFlight<'_>, AttendanceError> {
        if !self.in_flight.insert(key.to_string()) {
            debug!(key, "Clock action rejected, another is in flight");
            return Err(AttendanceError::ActionInProgress);
        }

        Ok(InFlight {
            set: &self.in_flight,
            key: key.to_string(),
        })
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn load(&self, key: &str) -> Result<Option<ClockRecord>, AttendanceError> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw).map(Some).map_err(|e| {
            warn!(key, error = %e, "Stored clock record is malformed");
            AttendanceError::Storage(StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
        })
    }

    fn store(&self, key: &str, record: &ClockRecord) -> Result<(), AttendanceError> {
        let value = serde_json::to_string(record).map_err(|e| StorageError::Io(e.to_string()))?;

        self.kv.set(key, &value).map_err(|e| {
            warn!(key, error = %e, "Failed to persist clock record");
            AttendanceError::Storage(e)
        })
    }
}
