//! Deals with different time scales, specifically, conversion from TDB/TT into
//! UT (UTC or UT1).
//!
//! Only conversions necessary for other computations in this crate are
//! included.

use crate::date::Date;

/// [Barycentric dynamic time](https://en.wikipedia.org/wiki/Barycentric_Dynamical_Time),
/// represented in Julian date (JD).
///
/// Ephemeris instants are computed in this time scale, and should be
/// converted to UT when calculating dates.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tdb(pub f64);

/// [Terristrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Note: Because TT differs no more than centisenconds from TDB during
/// thousands of years, they are treated numerically the same in this crate for
/// calendar calculation.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

impl From<Tdb> for Tt {
    fn from(tdb: Tdb) -> Tt {
        Tt(tdb.0)
    }
}

impl From<Tai> for Tt {
    fn from(tai: Tai) -> Tt {
        Tt(tai.0 + 32.184 / 86400.0)
    }
}

/// [International atomic time](https://en.wikipedia.org/wiki/International_Atomic_Time),
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tai(pub f64);

impl From<Tt> for Tai {
    fn from(tt: Tt) -> Tai {
        Tai(tt.0 - 32.184 / 86400.0)
    }
}

impl From<Tdb> for Tai {
    fn from(tdb: Tdb) -> Tai {
        Tt::from(tdb).into()
    }
}

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point.
///
/// This is UTC (coordinated universal time, based on TAI with leap seconds)
/// from 1972-01-01T00:00Z to the end of the leap second table, and UT1
/// (mean solar time on the Prime Meridian) otherwise.
///
/// Outside the UTC span, UT1 is estimated from ΔT = TT − UT1 with the
/// polynomial expressions of Espenak & Meeus, shifted so that the estimate
/// joins UTC continuously at both ends of the table.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// Converts a TAI (or other time scale easily convertible to TAI) into
    /// UT.
    ///
    /// # Example
    ///
    /// ```
    /// use almanako::time_scales::{Tdb, Ut};
    /// let tdb = Tdb(2451543.166666667);
    /// let ut = Ut::convert(tdb);
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
    /// ```
    pub fn convert<T>(time: T) -> Self
    where
        T: Into<Tai>,
    {
        let tai = time.into();
        let leap_seconds::Data {
            starts,
            ref leap_seconds,
            expires,
            c1,
            c2,
        } = *leap_seconds::data();

        if tai < starts {
            let diff = leap_seconds::tai_minus_ut1(tai) + c1;
            return Ut(tai.0 - diff / 86400.0); // NOTE UT1, not UTC
        } else if tai > expires {
            let diff = leap_seconds::tai_minus_ut1(tai) + c2;
            return Ut(tai.0 - diff / 86400.0); // NOTE UT1, not UTC
        }

        let ls = match leap_seconds.partition_point(|ls| ls.tai <= tai) {
            0 => return Ut(tai.0 - 10.0 / 86400.0),
            i => &leap_seconds[i - 1],
        };
        let leap = (tai.0 - ls.tai.0).min(2.0) / 2.0;
        Ut(tai.0 - (ls.delta_secs as f64 + leap) / 86400.0)
    }
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes`minutes.
    ///
    /// For Beijing time (UTC+8), `tz_offset_minutes` should be +480.
    ///
    /// # Example
    ///
    /// ```
    /// use almanako::time_scales::{Tdb, Ut};
    /// let tdb = Tdb(2451543.166666667);
    /// let ut = Ut::convert(tdb);
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(480).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + tz_offset_minutes as f64 / 1440.0).round() as u32;
        Date::from_jdn(jdn)
    }
}

/// ΔT = TT − UT1 in seconds for a (fractional) Gregorian year, after
/// Espenak & Meeus.
///
/// ```
/// use almanako::time_scales::delta_t;
///
/// assert!((delta_t(2000.0) - 63.86).abs() < 1e-9);
/// ```
pub fn delta_t(y: f64) -> f64 {
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };
    match y {
        _ if y < 1700.0 => long_term(y),
        _ if y < 1800.0 => {
            let t = y - 1700.0;
            8.83 + 0.1603 * t - 0.0059285 * t.powi(2) + 0.00013336 * t.powi(3)
                - t.powi(4) / 1174000.0
        }
        _ if y < 1860.0 => {
            let t = y - 1800.0;
            13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
                - 0.00037436 * t.powi(4)
                + 0.0000121272 * t.powi(5)
                - 0.0000001699 * t.powi(6)
                + 0.000000000875 * t.powi(7)
        }
        _ if y < 1900.0 => {
            let t = y - 1860.0;
            7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
                - 0.0004473624 * t.powi(4)
                + t.powi(5) / 233174.0
        }
        _ if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                - 0.000197 * t.powi(4)
        }
        _ if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        _ if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        _ if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        _ if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                + 0.0017275 * t.powi(3)
                + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        _ if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        _ if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        _ => long_term(y),
    }
}

mod leap_seconds {
    use super::{Tai, Tt};
    use crate::date::Date;
    use std::sync::OnceLock;

    pub const DATES: &[(i32, i32, i32)] = &[
        (1972, 6, 30),
        (1972, 12, 31),
        (1973, 12, 31),
        (1974, 12, 31),
        (1975, 12, 31),
        (1976, 12, 31),
        (1977, 12, 31),
        (1978, 12, 31),
        (1979, 12, 31),
        (1981, 6, 30),
        (1982, 6, 30),
        (1983, 6, 30),
        (1985, 6, 30),
        (1987, 12, 31),
        (1989, 12, 31),
        (1990, 12, 31),
        (1992, 6, 30),
        (1993, 6, 30),
        (1994, 6, 30),
        (1995, 12, 31),
        (1997, 6, 30),
        (1998, 12, 31),
        (2005, 12, 31),
        (2008, 12, 31),
        (2012, 6, 30),
        (2015, 6, 30),
        (2016, 12, 31),
    ];
    pub const DATE_EXPIRES: (i32, i32, i32) = (2025, 12, 31);

    #[derive(Debug, Clone)]
    pub struct Data {
        pub starts: Tai,
        pub leap_seconds: Vec<LeapSecond>,
        pub expires: Tai,
        /// Offset joining the UT1 estimate to UTC at `starts`.
        pub c1: f64,
        /// Offset joining the UT1 estimate to UTC at `expires`.
        pub c2: f64,
    }
    #[derive(Debug, Clone)]
    pub struct LeapSecond {
        pub tai: Tai,
        pub delta_secs: i32,
    }

    pub fn data() -> &'static Data {
        static COMPUTED: OnceLock<Data> = OnceLock::new();
        COMPUTED.get_or_init(compute)
    }

    // table dates are all valid
    fn jdn_of((y, m, d): (i32, i32, i32)) -> f64 {
        Date::from_gregorian(y, m, d).map_or(0.0, |date| date.jdn() as f64)
    }

    fn compute() -> Data {
        let starts = Tai(jdn_of((1972, 1, 1)) - 0.5 + 10.0 / 86400.0);
        let leap_seconds: Vec<_> = (10..)
            .zip(DATES)
            .map(|(delta_secs, &date)| LeapSecond {
                tai: Tai(jdn_of(date) + (43199 + delta_secs) as f64 / 86400.0),
                delta_secs,
            })
            .collect();
        let expires = Tai(jdn_of(DATE_EXPIRES) + (43199 + 10 + DATES.len()) as f64 / 86400.0);
        let c1 = 10.0 - tai_minus_ut1(starts);
        let c2 = (DATES.len() + 10) as f64 - tai_minus_ut1(expires);
        Data {
            starts,
            leap_seconds,
            expires,
            c1,
            c2,
        }
    }

    /// Estimated TAI − UT1 in seconds.
    pub fn tai_minus_ut1<T: Into<Tt>>(tt: T) -> f64 {
        let tt = tt.into();
        let y = (tt.0 - 2451544.5) / 365.2425 + 2000.0;
        super::delta_t(y) - 32.184
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tdb_to_ut() {
        let tdb = Tdb(2451543.166666667);
        let ut = Ut::convert(tdb);
        assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
        assert_eq!((1999, 12, 30), ut.date_in_timezone(480).gregorian());
        let ut_midnight = Ut(ut.0 + (32.0 + 32.184) / 86400.0);
        let ut_before_midnight = Ut(ut_midnight.0 - 1.0 / 86400.0);
        assert_eq!(
            (1999, 12, 30),
            ut_before_midnight.date_in_timezone(480).gregorian()
        );
        assert_eq!(
            (1999, 12, 31),
            ut_midnight.date_in_timezone(480).gregorian()
        );
    }

    #[test]
    fn utc_span_uses_leap_seconds() {
        // 2000: TAI − UTC = 32 s
        let tai = Tai(2451545.0);
        let ut = Ut::convert(tai);
        assert!((tai.0 - ut.0 - 32.0 / 86400.0).abs() < 1e-9);
    }

    #[test]
    fn continuous_at_table_edges() {
        let data = leap_seconds::data();
        let eps = 1e-6;
        for edge in [data.starts, data.expires] {
            let before = Ut::convert(Tai(edge.0 - eps));
            let after = Ut::convert(Tai(edge.0 + eps));
            assert!(((after.0 - before.0) - 2.0 * eps).abs() < 0.5 / 86400.0);
        }
    }

    #[test]
    fn before_utc() {
        // ΔT was about −3 s at 1900.0
        let tdb = Tdb(2415020.5);
        let ut = Ut::convert(tdb);
        assert!(((tdb.0 - ut.0) * 86400.0).abs() < 10.0);
        // and about 24 s around 1930
        let tdb = Tdb(2426000.5);
        let ut = Ut::convert(tdb);
        let diff = (tdb.0 - ut.0) * 86400.0;
        assert!((20.0..30.0).contains(&diff), "{diff}");
    }

    #[test]
    fn playing_with() {
        let tdb = Tdb(2462501.166666667 + 5.647029454550371); // 2030 小寒
        let ut = Ut::convert(tdb);
        assert!((ut.0 - 2462506.81319).abs() <= 60.0 / 86400.0);
    }

    #[test]
    fn delta_t_is_smooth() {
        for year in 1700..2200 {
            let y = year as f64;
            let jump = (delta_t(y + 1e-6) - delta_t(y - 1e-6)).abs();
            assert!(jump < 2.0, "{year}: {jump}");
        }
    }

    #[test]
    fn delta_t_early_nineteenth_century() {
        // Espenak & Meeus tabulate about 12 s for 1820 and 8 s for 1850
        assert!((delta_t(1820.0) - 11.86).abs() < 0.1, "{}", delta_t(1820.0));
        assert!((delta_t(1850.0) - 7.1).abs() < 0.5, "{}", delta_t(1850.0));
        assert!((delta_t(1800.0) - 13.72).abs() < 1e-9);
    }
}
