use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

pub fn elapsed_seconds(start: i64, end: i64) -> i64 {
    end - start
}

pub fn is_expired(timestamp: i64, timeout: i64, current_time: i64) -> bool {
    elapsed_seconds(timestamp, current_time) > timeout
}

/// Source of wall-clock time for the attendance clock and card expiry math.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Unix epoch milliseconds of [`Clock::now`], read as host local time
    fn epoch_millis(&self) -> i64 {
        local_epoch_millis(self.now())
    }
}

fn local_epoch_millis(now: NaiveDateTime) -> i64 {
    Local
        .from_local_datetime(&now)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        // skipped by a DST jump
        .unwrap_or_else(|| now.and_utc().timestamp_millis())
}

/// Local time of the host
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn epoch_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// A clock pinned to one instant, settable between calls.
pub struct FixedClock {
    now: std::sync::Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Browser-style date string, e.g. `Mon Oct 19 2026`
pub fn date_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// 24-hour `HH:MM`
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Hours between two same-day `HH:MM` times, rounded to two decimals.
///
/// Returns `None` when either value does not parse. A time-out earlier than
/// the time-in yields a negative result; day boundaries are not handled.
pub fn hours_between(time_in: &str, time_out: &str) -> Option<f64> {
    let start = parse_hhmm(time_in)?;
    let end = parse_hhmm(time_out)?;
    let minutes = (end - start).num_minutes() as f64;
    Some(round2(minutes / 60.0))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Elapsed working time since `time_in`, formatted `"{h}h {m}m"`.
pub fn working_time(time_in: &str, now: NaiveTime) -> Option<String> {
    let start = parse_hhmm(time_in)?;
    let minutes = (now - start).num_minutes().max(0);
    Some(format!("{}h {}m", minutes / 60, minutes % 60))
}

/// Whole days from `today` until `expiry`; negative once expired.
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_timestamp() {
        let ts = current_timestamp();
        // Should be a reasonable timestamp (after 2020-01-01)
        assert!(ts > 1577836800);
        // Should be before 2100-01-01
        assert!(ts < 4102444800);
    }

    #[test]
    fn test_is_expired() {
        let current = 1000;

        assert!(!is_expired(950, 100, current));
        assert!(is_expired(800, 100, current));
        // Exactly at timeout is still alive
        assert!(!is_expired(900, 100, current));
        assert!(is_expired(899, 100, current));
    }

    #[test]
    fn test_date_string_matches_browser_format() {
        assert_eq!(date_string(date(2026, 10, 19)), "Mon Oct 19 2026");
        assert_eq!(date_string(date(2024, 1, 5)), "Fri Jan 05 2024");
    }

    #[test]
    fn test_format_hhmm_is_24_hour() {
        let t = NaiveTime::from_hms_opt(17, 5, 59).unwrap();
        assert_eq!(format_hhmm(t), "17:05");

        let t = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert_eq!(format_hhmm(t), "08:00");
    }

    #[test]
    fn test_hours_between() {
        assert_eq!(hours_between("08:00", "17:30"), Some(9.5));
        assert_eq!(hours_between("09:00", "09:20"), Some(0.33));
        assert_eq!(hours_between("08:15", "08:15"), Some(0.0));
        assert_eq!(hours_between("10:00", "09:00"), Some(-1.0));
        assert_eq!(hours_between("8am", "17:00"), None);
    }

    #[test]
    fn test_working_time() {
        let now = NaiveTime::from_hms_opt(10, 47, 30).unwrap();
        assert_eq!(working_time("08:00", now).as_deref(), Some("2h 47m"));
        assert_eq!(working_time("11:00", now).as_deref(), Some("0h 0m"));
    }

    #[test]
    fn test_days_until() {
        let today = date(2026, 10, 19);
        assert_eq!(days_until(date(2026, 10, 18), today), -1);
        assert_eq!(days_until(today, today), 0);
        assert_eq!(days_until(date(2026, 10, 26), today), 7);
    }

    #[test]
    fn test_system_clock_millis_are_unix_epoch() {
        let diff = SystemClock.epoch_millis() / 1000 - current_timestamp();
        assert!(diff.abs() <= 1);
    }

    #[test]
    fn test_fixed_clock_millis_follow_local_offset() {
        let noon = date(2024, 6, 1).and_hms_opt(12, 0, 0).unwrap();
        let clock = FixedClock::new(noon);

        let expected = Local
            .from_local_datetime(&noon)
            .earliest()
            .unwrap()
            .timestamp_millis();
        assert_eq!(clock.epoch_millis(), expected);
    }

    #[test]
    fn test_fixed_clock_can_be_moved() {
        let start = date(2026, 10, 19).and_hms_opt(8, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.today(), date(2026, 10, 19));

        let later = date(2026, 10, 19).and_hms_opt(17, 30, 0).unwrap();
        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
