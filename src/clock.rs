//! Clock and date text

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::Error;

/// Length of the formatted clock text (`HH:MM`)
pub const TIME_LEN: usize = 5;
/// Length of the formatted day and month text
pub const DATE_FIELD_LEN: usize = 2;

/// Hour display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStyle {
    /// `00` to `23`
    TwentyFourHour,
    /// `01` to `12`
    TwelveHour,
}

impl ClockStyle {
    pub fn from_24h_flag(is_24h: bool) -> Self {
        if is_24h {
            Self::TwentyFourHour
        } else {
            Self::TwelveHour
        }
    }
}

/// Write the time as `HH:MM` into `buf`.
///
/// In twelve hour mode midnight and noon both show as `12`.
pub fn format_time<'a, T: Timelike>(
    buf: &'a mut [u8],
    time: &T,
    style: ClockStyle,
) -> Result<&'a str, Error> {
    let hour = match style {
        ClockStyle::TwentyFourHour => time.hour(),
        ClockStyle::TwelveHour => time.hour12().1,
    };
    Ok(format_no_std::show(
        buf,
        format_args!("{:02}:{:02}", hour, time.minute()),
    )?)
}

/// Write the day of month as two digits into `buf`.
pub fn format_day<'a, D: Datelike>(buf: &'a mut [u8], date: &D) -> Result<&'a str, Error> {
    Ok(format_no_std::show(buf, format_args!("{:02}", date.day()))?)
}

/// Write the month as two digits into `buf`.
pub fn format_month<'a, D: Datelike>(buf: &'a mut [u8], date: &D) -> Result<&'a str, Error> {
    Ok(format_no_std::show(buf, format_args!("{:02}", date.month()))?)
}

/// Derives minute ticks from a clock sampled at any rate
#[derive(Debug, Default)]
pub struct MinuteTicker {
    last: Option<(i32, u32, u32, u32)>,
}

impl MinuteTicker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Return `now` if it falls into a different minute than the previous
    /// sample. The first sample always ticks.
    pub fn poll(&mut self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let key = (now.year(), now.ordinal(), now.hour(), now.minute());
        if self.last == Some(key) {
            return None;
        }
        self.last = Some(key);
        Some(now)
    }
}
