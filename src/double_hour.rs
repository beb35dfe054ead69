//! Double hours (时辰): the twelve two-hour periods of a day.
//!
//! Period 0 (子) straddles midnight, 23:00–00:59; each following period
//! starts two hours later. The pillar of a period takes its branch from the
//! period and its stem from the day stem by the five-rat rule: 甲己 days
//! start at 甲子, 乙庚 at 丙子, 丙辛 at 戊子, 丁壬 at 庚子, 戊癸 at 壬子.

use std::fmt;

use serde::Serialize;

use crate::ganzhi::{Branch, Stem, StemBranch};
use crate::instant::CivilInstant;

/// Number of double hours in a day.
pub const PERIODS: usize = 12;

/// Traditional names of the twelve periods, from 子 to 亥.
pub const NAMES: [&str; PERIODS] = [
    "夜半", "鸡鸣", "平旦", "日出", "食时", "隅中", "日中", "日昳", "哺时", "日入", "黄昏", "人定",
];

/// Stem index of the 子 period for each day-stem group (day stem mod 5).
const STARTING_STEMS: [usize; 5] = [0, 2, 4, 6, 8];

/// One resolved double hour.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct DoubleHourPeriod {
    /// `0..12`, 子 being 0
    pub index: usize,
    pub pillar: StemBranch,
    pub name: &'static str,
    /// First civil hour of the period.
    pub start_hour: u32,
    /// Hour at which the period ends (exclusive).
    pub end_hour: u32,
    /// e.g. "23-1点"
    pub hour_range: String,
}

impl DoubleHourPeriod {
    /// Whether civil hour `hour` falls in this period.
    pub fn contains(&self, hour: u32) -> bool {
        period_index(hour) == self.index
    }
}

impl fmt::Display for DoubleHourPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}时（{}，{}）", self.pillar, self.name, self.hour_range)
    }
}

/// Period index of civil hour `hour` (`0..=23`).
///
/// ```
/// use almanako::double_hour::period_index;
///
/// assert_eq!(0, period_index(23));
/// assert_eq!(0, period_index(0));
/// assert_eq!(1, period_index(1));
/// assert_eq!(11, period_index(22));
/// ```
pub fn period_index(hour: u32) -> usize {
    ((hour + 1) / 2 % PERIODS as u32) as usize
}

/// Stem of the 子 period on a day with stem `day_stem`.
pub fn starting_stem(day_stem: Stem) -> Stem {
    Stem::from_index(STARTING_STEMS[day_stem.index() % 5])
}

/// `(start, end)` hours of period `index`; period 0 wraps to `(23, 1)`.
pub fn hour_bounds(index: usize) -> (u32, u32) {
    let i = (index % PERIODS) as u32;
    ((i * 2 + 23) % 24, (i * 2 + 1) % 24)
}

/// Period `index` on a day with stem `day_stem`.
pub fn period(index: usize, day_stem: Stem) -> DoubleHourPeriod {
    let index = index % PERIODS;
    let (start_hour, end_hour) = hour_bounds(index);
    DoubleHourPeriod {
        index,
        pillar: StemBranch::new(
            Stem::from_index(starting_stem(day_stem).index() + index),
            Branch::from_index(index),
        ),
        name: NAMES[index],
        start_hour,
        end_hour,
        hour_range: format!("{start_hour}-{end_hour}点"),
    }
}

/// Resolves the double hour of `instant` given the stem of its day.
///
/// ```
/// use almanako::{CivilInstant, Stem, resolve_double_hour};
///
/// let instant = CivilInstant::new(2024, 2, 10, 23, 30).unwrap();
/// let period = resolve_double_hour(&instant, Stem::Jia);
/// assert_eq!("甲子", period.pillar.to_string());
/// assert_eq!("夜半", period.name);
/// assert_eq!("23-1点", period.hour_range);
/// ```
pub fn resolve_double_hour(instant: &CivilInstant, day_stem: Stem) -> DoubleHourPeriod {
    period(period_index(instant.hour()), day_stem)
}
