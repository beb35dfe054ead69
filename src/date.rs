//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::Serialize;

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(into = "String")]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if `month` or `day` does not name a day of the
    /// Gregorian calendar, or if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use almanako::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert_eq!(None, Date::from_gregorian(2023, 2, 29));
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return None;
        }
        // keeps the arithmetic below clear of overflow
        if year < -4800 || year > 1_000_000 {
            return None;
        }
        let (y, m, d) = (year, month, day);
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use almanako::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        // `from_gregorian` never produces a JDN beyond i32
        let jdn = self.jdn as i64;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use almanako::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the day of week counted from Sunday, i.e. `0..=6` for Sunday
    /// through Saturday.
    ///
    /// ```
    /// use almanako::Date;
    ///
    /// let date = Date::from_gregorian(2024, 2, 1).unwrap();
    /// assert_eq!(4, date.weekday_from_sunday()); // Thursday
    /// ```
    pub fn weekday_from_sunday(&self) -> u32 {
        (self.jdn + 1) % 7
    }
    /// Returns the Chinese sexagenary day number of the date, numbered from 1
    /// (甲子) to 60 (癸亥).
    ///
    /// # Example
    ///
    /// ```
    /// use almanako::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(55, date.sexagenary()); // 戊午
    /// ```
    pub fn sexagenary(&self) -> u32 {
        (self.jdn + 49) % 60 + 1
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

impl From<Date> for String {
    fn from(date: Date) -> String {
        date.iso_gregorian()
    }
}

/// Error returned when parsing a `YYYY-MM-DD` string fails.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("not a Gregorian date in YYYY-MM-DD form: {0:?}")]
pub struct ParseDateError(pub String);

impl FromStr for Date {
    type Err = ParseDateError;

    /// ```
    /// use almanako::Date;
    ///
    /// let date: Date = "2024-02-10".parse().unwrap();
    /// assert_eq!((2024, 2, 10), date.gregorian());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDateError(s.to_owned());
        let mut it = s.trim().splitn(3, '-');
        let mut field = || -> Result<i32, ParseDateError> {
            it.next().ok_or_else(err)?.parse().map_err(|_| err())
        };
        let (y, m, d) = (field()?, field()?, field()?);
        Date::from_gregorian(y, m, d).ok_or_else(err)
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days of `month` in Gregorian `year`, or 0 if `month` is not
/// in `1..=12`.
///
/// ```
/// use almanako::date::days_in_month;
///
/// assert_eq!(29, days_in_month(2024, 2));
/// assert_eq!(28, days_in_month(1900, 2));
/// ```
pub fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as i32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
    }

    #[test]
    fn from_gregorian_rejects_invalid() {
        for (y, m, d) in [(2024, 0, 1), (2024, 13, 1), (2024, 4, 31), (2023, 2, 29), (2024, 1, 0)] {
            assert_eq!(None, Date::from_gregorian(y, m, d), "{y:04}-{m:02}-{d:02}");
        }
        assert!(Date::from_gregorian(2024, 2, 29).is_some());
        assert_eq!(None, Date::from_gregorian(-5000, 1, 1));
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn to_weekday() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(4, date.weekday_from_sunday());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(3, date.weekday_from_sunday());
        let date = Date::from_gregorian(2024, 3, 3).unwrap();
        assert_eq!(0, date.weekday_from_sunday());
        assert_eq!(6, (date + 6).weekday_from_sunday());
    }

    #[test]
    fn to_sexagenary() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(18, date.sexagenary());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(56, date.sexagenary());
        let date = Date::from_gregorian(2024, 2, 10).unwrap();
        assert_eq!(41, date.sexagenary()); // 甲辰
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().iso_gregorian()
        );
        assert_eq!("1900-01-01", Date::from_gregorian(1900, 1, 1).unwrap().to_string());
    }

    #[test]
    fn parse() {
        assert_eq!(Date::from_gregorian(2017, 7, 23), "2017-07-23".parse().ok());
        assert!("2017-13-01".parse::<Date>().is_err());
        assert!("2017-07".parse::<Date>().is_err());
        assert!("yesterday".parse::<Date>().is_err());
    }

    #[test]
    fn month_lengths() {
        let total: i32 = (1..=12).map(|m| days_in_month(2023, m)).sum();
        assert_eq!(365, total);
        let total: i32 = (1..=12).map(|m| days_in_month(2000, m)).sum();
        assert_eq!(366, total);
        assert_eq!(0, days_in_month(2000, 13));
    }
}
