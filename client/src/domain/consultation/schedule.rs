//! Consultation dates, times and the bookable hourly slots.

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};

/// First bookable hour.
const FIRST_SLOT_HOUR: u32 = 9;
/// Last bookable hour.
const LAST_SLOT_HOUR: u32 = 18;

/// A consultation date and start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Schedule {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Schedule {
    /// Pair a date with a start time.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format(DATE_FORMAT), self.time.format(TIME_FORMAT))
    }
}

/// Wire and display format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire and display format for times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Hourly slots offered by the booking forms, 09:00 through 18:00.
pub fn offered_slots() -> impl Iterator<Item = NaiveTime> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR).filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
}

/// Whether `time` is one of [`offered_slots`].
pub fn is_offered_slot(time: NaiveTime) -> bool {
    time.minute() == 0
        && time.second() == 0
        && (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR).contains(&time.hour())
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Parse an `HH:MM` time, also accepting the `HH:MM:SS` form some backend
/// serialisers emit.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}
