//! A Chinese lunisolar almanac (黄历).
//!
//! Converts Gregorian instants into lunar dates, the four pillars, double
//! hours, solar terms, festivals and daily activities, and lays out month
//! and year grids for calendar views. The lunar calendar is computed from an
//! analytic ephemeris, so no data files are needed.
//!
//! # Examples
//!
//! Everything about one instant:
//!
//! ```
//! use almanako::{Almanac, CivilInstant};
//!
//! let almanac = Almanac::new();
//! let snap = almanac.snapshot(&CivilInstant::new(2024, 2, 10, 8, 30).unwrap()).unwrap();
//!
//! assert_eq!("初一", snap.lunar.day_label);
//! assert_eq!("甲辰", snap.pillars.year.to_string());
//! assert_eq!("食时", snap.double_hour.name);
//! assert_eq!(vec!["春节"], snap.festivals.lunar);
//! ```
//!
//! The calendar itself, with [`Date`]:
//!
//! ```
//! use almanako::Date;
//! use almanako::chinese::{Annus, CHINA_STANDARD_OFFSET, Month::*};
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//! let annus = Annus::from_date(date, CHINA_STANDARD_OFFSET).unwrap();
//!
//! assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
//! ```
//!
//! Month grids:
//!
//! ```
//! use almanako::{Almanac, WeekStart};
//!
//! let almanac = Almanac::new().week_start(WeekStart::Monday);
//! let grid = almanac.month_grid(2024, 2).unwrap();
//!
//! assert_eq!(3, grid.leading_blanks());
//! assert_eq!(29, grid.days().count());
//! ```
//!
//! Other conversion sources can be plugged in through [`LunisolarOracle`].
//! The crate logs through [`tracing`] and installs no subscriber.

pub mod activity;
pub mod almanac;
pub mod chinese;
pub mod config;
pub mod date;
pub mod double_hour;
pub mod error;
pub mod ganzhi;
pub mod grid;
pub mod instant;
pub mod oracle;
pub mod snapshot;
pub mod time_scales;

pub use activity::{DayActivities, classify_day};
pub use almanac::Almanac;
pub use config::{AlmanacConfig, WeekStart};
pub use date::{Date, YearType};
pub use double_hour::{DoubleHourPeriod, resolve_double_hour};
pub use error::{AlmanacError, Result};
pub use ganzhi::{Branch, Stem, StemBranch};
pub use grid::{
    EventPresence, GridDay, MonthGrid, MonthGridCell, YearGrid, build_month_grid, build_year_grid,
};
pub use instant::CivilInstant;
pub use oracle::{ChineseOracle, Festivals, LunarFacts, LunisolarOracle, OracleError};
pub use snapshot::{FourPillars, LunarInfo, LunarSnapshot, SolarInfo, snapshot};
