//! Civil (Gregorian, local wall-clock) instants.

use serde::Serialize;

use crate::date::{Date, days_in_month};
use crate::error::{AlmanacError, Result};

/// A validated civil instant: Gregorian date plus wall-clock hour and
/// minute, with the weekday derived once at construction.
///
/// ```
/// use almanako::CivilInstant;
///
/// let instant = CivilInstant::new(2024, 2, 10, 23, 30).unwrap();
/// assert_eq!(6, instant.weekday()); // Saturday
/// assert!(CivilInstant::new(2024, 2, 30, 0, 0).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct CivilInstant {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    #[serde(skip)]
    date: Date,
    weekday: u32,
}

impl CivilInstant {
    /// Validates and builds an instant. Fails with
    /// [`AlmanacError::InvalidArgument`] when any component is out of range.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(AlmanacError::InvalidArgument(format!(
                "month {month} not in 1..=12"
            )));
        }
        let len = days_in_month(year, month as i32) as u32;
        if !(1..=len).contains(&day) {
            return Err(AlmanacError::InvalidArgument(format!(
                "day {day} not in 1..={len} for {year:04}-{month:02}"
            )));
        }
        if hour > 23 || minute > 59 {
            return Err(AlmanacError::InvalidArgument(format!(
                "time {hour:02}:{minute:02} is not a wall-clock time"
            )));
        }
        let date = Date::from_gregorian(year, month as i32, day as i32).ok_or_else(|| {
            AlmanacError::InvalidArgument(format!("year {year} is not representable"))
        })?;
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            date,
            weekday: date.weekday_from_sunday(),
        })
    }

    /// Midnight at the start of `date`.
    pub fn from_date(date: Date) -> Self {
        let (year, month, day) = date.gregorian();
        Self {
            year,
            month: month as u32,
            day: day as u32,
            hour: 0,
            minute: 0,
            date,
            weekday: date.weekday_from_sunday(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u32 {
        self.month
    }
    pub fn day(&self) -> u32 {
        self.day
    }
    pub fn hour(&self) -> u32 {
        self.hour
    }
    pub fn minute(&self) -> u32 {
        self.minute
    }
    /// Day of week, `0..=6` for Sunday through Saturday.
    pub fn weekday(&self) -> u32 {
        self.weekday
    }
    /// The calendar date, dropping the time of day.
    pub fn date(&self) -> Date {
        self.date
    }
}
