//! Time keeping module for PineTime

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use embassy_time::Instant;

#[derive(Clone, Copy)]
pub struct TimeReference {
    /// Local clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Create new time reference from a UTC epoch and a local offset.
    /// Out of range values fall back to the Unix epoch.
    pub fn from_epoch(utc_secs: i64, offset_secs: i64) -> Self {
        let time = DateTime::from_timestamp(utc_secs.saturating_add(offset_secs), 0)
            .map(|t| t.naive_utc())
            .unwrap_or_default();
        Self {
            time,
            instant: Instant::now(),
        }
    }
}

pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference) -> Self {
        Self { reference }
    }

    /// Get current local time
    pub fn get_time(&self) -> NaiveDateTime {
        let elapsed = Instant::now().duration_since(self.reference.instant);
        self.reference
            .time
            .checked_add_signed(TimeDelta::microseconds(elapsed.as_micros() as i64))
            .unwrap_or(self.reference.time)
    }
}
