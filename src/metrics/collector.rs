use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use crate::catalog::printing::PrintQueue;
use crate::catalog::renewal::RenewalDesk;
use crate::stores::session_store::SessionStore;
use crate::utils::time::current_timestamp;
use serde::Serialize;

/// Process-wide activity counters
pub struct Metrics {
    pub enrollments_submitted: AtomicU64,
    pub clock_ins: AtomicU64,
    pub clock_outs: AtomicU64,
    pub cards_printed: AtomicU64,
    pub cards_renewed: AtomicU64,
    pub start_time: i64,
    /// Submissions on the most recent day seen
    enrollments_today: Mutex<(NaiveDate, u64)>,
}

#[derive(Debug, Clone, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub enrollments_submitted: u64,
    pub clock_ins: u64,
    pub clock_outs: u64,
    pub cards_printed: u64,
    pub cards_renewed: u64,
    pub open_sessions: usize,
    pub printed_cards_on_file: usize,
    pub renewed_cards_on_file: usize,
    pub uptime_seconds: i64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            enrollments_submitted: AtomicU64::new(0),
            clock_ins: AtomicU64::new(0),
            clock_outs: AtomicU64::new(0),
            cards_printed: AtomicU64::new(0),
            cards_renewed: AtomicU64::new(0),
            start_time: current_timestamp(),
            enrollments_today: Mutex::new((NaiveDate::MIN, 0)),
        }
    }

    /// Count one submission made on `today`; the daily count restarts when
    /// the date moves on.
    pub fn increment_enrollments(&self, today: NaiveDate) {
        self.enrollments_submitted.fetch_add(1, Ordering::Relaxed);

        let mut daily = self.enrollments_today.lock().unwrap_or_else(|e| e.into_inner());
        if daily.0 == today {
            daily.1 += 1;
        } else {
            *daily = (today, 1);
        }
    }

    pub fn increment_clock_ins(&self) {
        self.clock_ins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_clock_outs(&self) {
        self.clock_outs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_printed(&self) {
        self.cards_printed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_renewed(&self, count: u64) {
        self.cards_renewed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn enrollments(&self) -> u64 {
        self.enrollments_submitted.load(Ordering::Relaxed)
    }

    /// Submissions made on `today`
    pub fn enrollments_on(&self, today: NaiveDate) -> u64 {
        let daily = self.enrollments_today.lock().unwrap_or_else(|e| e.into_inner());
        if daily.0 == today {
            daily.1
        } else {
            0
        }
    }

    pub fn get_snapshot(
        &self,
        sessions: &SessionStore,
        print_queue: &PrintQueue,
        renewals: &RenewalDesk,
    ) -> MetricsSnapshot {
        MetricsSnapshot {
            enrollments_submitted: self.enrollments_submitted.load(Ordering::Relaxed),
            clock_ins: self.clock_ins.load(Ordering::Relaxed),
            clock_outs: self.clock_outs.load(Ordering::Relaxed),
            cards_printed: self.cards_printed.load(Ordering::Relaxed),
            cards_renewed: self.cards_renewed.load(Ordering::Relaxed),
            open_sessions: sessions.len(),
            printed_cards_on_file: print_queue.printed_count(),
            renewed_cards_on_file: renewals.renewed_count(),
            uptime_seconds: current_timestamp() - self.start_time,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enrollment::FormVariant;
    use crate::stores::fixtures::{seed_cards, seed_printables};
    use crate::utils::time::SystemClock;
    use std::sync::Arc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    #[test]
    fn test_new_metrics() {
        let metrics = Metrics::new();

        assert_eq!(metrics.enrollments(), 0);
        assert_eq!(metrics.clock_ins.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.cards_renewed.load(Ordering::Relaxed), 0);
        assert!(metrics.start_time > 0);
    }

    #[test]
    fn test_increments() {
        let metrics = Metrics::new();

        metrics.increment_enrollments(day(15));
        metrics.increment_enrollments(day(15));
        metrics.increment_clock_ins();
        metrics.increment_clock_outs();
        metrics.increment_printed();
        metrics.add_renewed(3);

        assert_eq!(metrics.enrollments(), 2);
        assert_eq!(metrics.enrollments_on(day(15)), 2);
        assert_eq!(metrics.clock_ins.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.clock_outs.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.cards_printed.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.cards_renewed.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_get_snapshot() {
        let metrics = Metrics::new();
        let sessions = SessionStore::new(8, FormVariant::Standard, false);
        let print_queue = PrintQueue::new(seed_printables());
        let renewals = RenewalDesk::new(seed_cards(), Arc::new(SystemClock));

        sessions.create(current_timestamp()).unwrap();
        metrics.increment_enrollments(day(15));

        let snapshot = metrics.get_snapshot(&sessions, &print_queue, &renewals);

        assert_eq!(snapshot.enrollments_submitted, 1);
        assert_eq!(snapshot.open_sessions, 1);
        assert_eq!(snapshot.printed_cards_on_file, 1);
        assert_eq!(snapshot.renewed_cards_on_file, 0);
        assert!(snapshot.uptime_seconds >= 0);
    }

    #[test]
    fn test_daily_enrollments_restart_on_new_day() {
        let metrics = Metrics::new();
        assert_eq!(metrics.enrollments_on(day(15)), 0);

        metrics.increment_enrollments(day(15));
        metrics.increment_enrollments(day(15));
        assert_eq!(metrics.enrollments_on(day(15)), 2);
        assert_eq!(metrics.enrollments_on(day(16)), 0);

        metrics.increment_enrollments(day(16));
        assert_eq!(metrics.enrollments_on(day(16)), 1);
        assert_eq!(metrics.enrollments_on(day(15)), 0);
        assert_eq!(metrics.enrollments(), 3);
    }
}
