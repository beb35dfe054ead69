//! Month and year grids for calendar views.
//!
//! A month grid is row-major with seven columns. It starts with blank cells
//! up to the weekday of the 1st and stops after the last day of the month;
//! trailing blanks are left to the renderer.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use serde::Serialize;
use tracing::debug;

use crate::chinese::Month;
use crate::config::WeekStart;
use crate::date::{Date, days_in_month};
use crate::error::{AlmanacError, Result};
use crate::instant::CivilInstant;
use crate::oracle::LunisolarOracle;

/// Columns per grid row.
pub const WEEK: usize = 7;

/// Tells whether a date carries user events.
pub trait EventPresence {
    fn has_event(&self, date: Date) -> bool;
}

impl<S: BuildHasher> EventPresence for HashSet<Date, S> {
    fn has_event(&self, date: Date) -> bool {
        self.contains(&date)
    }
}

impl EventPresence for BTreeSet<Date> {
    fn has_event(&self, date: Date) -> bool {
        self.contains(&date)
    }
}

/// A populated grid cell.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct GridDay {
    pub date: Date,
    pub solar_year: i32,
    pub solar_month: u32,
    pub solar_day: u32,
    pub lunar_year: i32,
    pub lunar_month: Month,
    pub lunar_day: u32,
    /// e.g. 初一
    pub lunar_day_label: String,
    pub has_event: bool,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "day", rename_all = "lowercase")]
pub enum MonthGridCell {
    Blank,
    Day(GridDay),
}

impl MonthGridCell {
    pub fn day(&self) -> Option<&GridDay> {
        match self {
            MonthGridCell::Blank => None,
            MonthGridCell::Day(day) => Some(day),
        }
    }
    pub fn is_blank(&self) -> bool {
        matches!(self, MonthGridCell::Blank)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<MonthGridCell>,
}

impl MonthGrid {
    /// Cells in rows of [`WEEK`]; the last row may be short.
    pub fn rows(&self) -> impl Iterator<Item = &[MonthGridCell]> {
        self.cells.chunks(WEEK)
    }
    /// Populated cells in date order.
    pub fn days(&self) -> impl Iterator<Item = &GridDay> {
        self.cells.iter().filter_map(MonthGridCell::day)
    }
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_blank()).count()
    }
    /// Sets `has_event` on every populated cell from `events`.
    pub fn mark_events(&mut self, events: &impl EventPresence) {
        for cell in &mut self.cells {
            if let MonthGridCell::Day(day) = cell {
                day.has_event = events.has_event(day.date);
            }
        }
    }
}

/// The twelve month grids of a Gregorian year.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct YearGrid {
    pub year: i32,
    pub months: Vec<MonthGrid>,
}

impl YearGrid {
    pub fn mark_events(&mut self, events: &impl EventPresence) {
        for month in &mut self.months {
            month.mark_events(events);
        }
    }
}

/// Builds the grid of `year`-`month`, resolving every day through `oracle`.
///
/// Fails with [`AlmanacError::InvalidArgument`] for a month outside
/// `1..=12` or an unrepresentable year, and with the oracle's error for a
/// day it cannot resolve; no partial grid is returned.
///
/// ```
/// use almanako::{ChineseOracle, WeekStart, build_month_grid};
///
/// let grid = build_month_grid(&ChineseOracle::new(), 2024, 2, WeekStart::Sunday).unwrap();
/// assert_eq!(4, grid.leading_blanks()); // 2024-02-01 is a Thursday
/// assert_eq!(33, grid.cells.len());
/// ```
pub fn build_month_grid<O: LunisolarOracle>(
    oracle: &O,
    year: i32,
    month: u32,
    week_start: WeekStart,
) -> Result<MonthGrid> {
    if !(1..=12).contains(&month) {
        return Err(AlmanacError::InvalidArgument(format!(
            "month {month} not in 1..=12"
        )));
    }
    let first = Date::from_gregorian(year, month as i32, 1).ok_or_else(|| {
        AlmanacError::InvalidArgument(format!("year {year} is not representable"))
    })?;
    let len = days_in_month(year, month as i32);
    let blanks = ((first.weekday_from_sunday() + 7 - week_start.weekday()) % 7) as usize;

    let mut cells = Vec::with_capacity(blanks + len as usize);
    cells.resize(blanks, MonthGridCell::Blank);
    for offset in 0..len {
        let date = first + offset;
        let facts = oracle.resolve(&CivilInstant::from_date(date))?;
        cells.push(MonthGridCell::Day(GridDay {
            date,
            solar_year: year,
            solar_month: month,
            solar_day: offset as u32 + 1,
            lunar_year: facts.year,
            lunar_month: facts.month,
            lunar_day: facts.day,
            lunar_day_label: facts.day_label,
            has_event: false,
        }));
    }
    debug!(year, month, blanks, days = len, "built month grid");
    Ok(MonthGrid { year, month, cells })
}

/// Builds the grids of months 1 to 12 of `year`.
pub fn build_year_grid<O: LunisolarOracle>(
    oracle: &O,
    year: i32,
    week_start: WeekStart,
) -> Result<YearGrid> {
    let months = (1..=12)
        .map(|month| build_month_grid(oracle, year, month, week_start))
        .collect::<Result<Vec<_>>>()?;
    Ok(YearGrid { year, months })
}
