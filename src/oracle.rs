//! Gregorian → lunisolar conversion.
//!
//! Everything downstream (double hours, activities, grids, snapshots) only
//! consumes [`LunarFacts`], so any conversion source can stand in for
//! [`ChineseOracle`] by implementing [`LunisolarOracle`].

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::{trace, warn};

use crate::chinese::{self, Annus, AnnusError, Month, festival, fmt};
use crate::config::AlmanacConfig;
use crate::ganzhi::StemBranch;
use crate::instant::CivilInstant;

/// Gregorian years [`ChineseOracle`] resolves unless configured otherwise.
///
/// See [`ChineseOracle`] for the known days where the result differs from
/// the official calendar.
pub const DEFAULT_YEARS: RangeInclusive<i32> = 1900..=2100;

/// Failure to convert an instant.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("year {year} is outside the supported range {first}..={last}")]
    OutOfRange { year: i32, first: i32, last: i32 },
    #[error("annus {annus}: {detail}")]
    Ephemeris { annus: i32, detail: String },
}

impl From<AnnusError> for OracleError {
    fn from(e: AnnusError) -> Self {
        let annus = match e {
            AnnusError::NoData(annus) | AnnusError::Inconsistent { annus, .. } => annus,
        };
        OracleError::Ephemeris {
            annus,
            detail: e.to_string(),
        }
    }
}

/// Festivals falling on a day.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct Festivals {
    /// Gregorian-calendar festivals
    pub solar: Vec<String>,
    /// Major lunar festivals
    pub lunar: Vec<String>,
    /// Minor traditional days
    pub other: Vec<String>,
}

/// Lunisolar attributes of one civil day.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct LunarFacts {
    /// Lunar year, starting on 正月初一.
    pub year: i32,
    pub month: Month,
    pub day: u32,
    pub year_pillar: StemBranch,
    /// Month pillar, delimited by the sectional terms (节).
    pub month_pillar: StemBranch,
    pub day_pillar: StemBranch,
    /// e.g. 二〇二四
    pub year_label: String,
    /// e.g. 正, 闰二, 腊
    pub month_label: String,
    /// e.g. 初一, 廿五
    pub day_label: String,
    /// Name of the solar term beginning on this day, if any.
    pub solar_term: Option<String>,
    pub festivals: Festivals,
}

/// Converts civil instants into lunisolar attributes.
///
/// Implementations must be deterministic: the same instant always yields
/// the same facts.
pub trait LunisolarOracle {
    fn resolve(&self, instant: &CivilInstant) -> Result<LunarFacts, OracleError>;
}

impl<O: LunisolarOracle + ?Sized> LunisolarOracle for &O {
    fn resolve(&self, instant: &CivilInstant) -> Result<LunarFacts, OracleError> {
        (**self).resolve(instant)
    }
}

/// The modern Chinese calendar, computed from the ephemeris in
/// [`chinese::ephemeris`].
///
/// Dates are taken in a fixed UTC offset, Beijing time by default. The
/// oracle holds no state besides its settings and recomputes every call.
///
/// The ephemeris is a low-precision analytic theory, good to a few minutes.
/// A new moon within minutes of local midnight can land on the neighbouring
/// day, so a month may start one day off from the official calendar
/// (GB/T 33661). Inside [`DEFAULT_YEARS`] this happens on 2057-09-28, which
/// resolves as 八月三十 instead of 九月初一. Before 1929 the official
/// calendar used Beijing local mean time, which is not modelled; some days
/// in 1914, 1916 and 1920 differ for that reason.
///
/// ```
/// use almanako::{ChineseOracle, CivilInstant, LunisolarOracle};
/// use almanako::chinese::Month::*;
///
/// let oracle = ChineseOracle::new();
/// let facts = oracle.resolve(&CivilInstant::new(2024, 2, 10, 8, 0).unwrap()).unwrap();
/// assert_eq!((2024, Common(1), 1), (facts.year, facts.month, facts.day));
/// assert_eq!("甲辰", facts.year_pillar.to_string());
/// assert_eq!(vec!["春节"], facts.festivals.lunar);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ChineseOracle {
    tz_offset_minutes: i32,
    years: RangeInclusive<i32>,
}

impl Default for ChineseOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl ChineseOracle {
    /// Beijing time, years [`DEFAULT_YEARS`].
    pub fn new() -> Self {
        Self {
            tz_offset_minutes: chinese::CHINA_STANDARD_OFFSET,
            years: DEFAULT_YEARS,
        }
    }
    pub fn from_config(config: &AlmanacConfig) -> Self {
        Self {
            tz_offset_minutes: config.utc_offset_minutes,
            years: config.first_year..=config.last_year,
        }
    }
    /// Takes dates in the zone `minutes` east of UTC, e.g. 540 for Korea.
    pub fn with_offset(mut self, minutes: i32) -> Self {
        self.tz_offset_minutes = minutes;
        self
    }
    /// Restricts the Gregorian years this oracle resolves.
    pub fn with_years(mut self, years: RangeInclusive<i32>) -> Self {
        self.years = years;
        self
    }
    pub fn tz_offset_minutes(&self) -> i32 {
        self.tz_offset_minutes
    }
    pub fn years(&self) -> &RangeInclusive<i32> {
        &self.years
    }
}

impl LunisolarOracle for ChineseOracle {
    fn resolve(&self, instant: &CivilInstant) -> Result<LunarFacts, OracleError> {
        let year = instant.year();
        if !self.years.contains(&year) {
            warn!(
                year,
                first = *self.years.start(),
                last = *self.years.end(),
                "instant outside oracle range"
            );
            return Err(OracleError::OutOfRange {
                year,
                first: *self.years.start(),
                last: *self.years.end(),
            });
        }

        let date = instant.date();
        let annus = Annus::from_date(date, self.tz_offset_minutes)?;
        let inconsistent = |what: &str| OracleError::Ephemeris {
            annus: annus.annus,
            detail: format!("{what} unavailable for {date}"),
        };
        let (lunar_year, month, day) = annus.ymd_for(date).map_err(|_| inconsistent("lunar date"))?;
        let month_len = annus
            .month_length_for(date)
            .map_err(|_| inconsistent("month length"))?;
        let (term_annus, term, offset) = annus
            .solar_term_for(date)
            .map_err(|_| inconsistent("solar term"))?;
        let (jie_year, jie_month) = chinese::jie_month(term_annus, term);
        let eve_of_qingming = matches!(annus.solar_term_for(date + 1), Ok((_, 5, 0)));

        let owned = |names: Vec<&'static str>| -> Vec<String> {
            names.into_iter().map(str::to_owned).collect()
        };
        let facts = LunarFacts {
            year: lunar_year,
            month,
            day,
            year_pillar: StemBranch::from_sexagenary(chinese::sexagenary_for_year(lunar_year)),
            month_pillar: StemBranch::from_sexagenary(chinese::sexagenary_for_month(
                jie_year, jie_month,
            )),
            day_pillar: StemBranch::from_sexagenary(date.sexagenary()),
            year_label: fmt::year(lunar_year),
            month_label: fmt::month_label(month),
            day_label: fmt::day(day),
            solar_term: (offset == 0).then(|| fmt::solar_term(term).to_owned()),
            festivals: Festivals {
                solar: owned(festival::solar(date)),
                lunar: owned(festival::lunar(month, day, month_len)),
                other: owned(festival::other(month, day, eve_of_qingming)),
            },
        };
        trace!(%date, year = lunar_year, month = %month.name(), day, "resolved lunar date");
        Ok(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chinese::Month::*;

    fn resolve(y: i32, m: u32, d: u32) -> LunarFacts {
        ChineseOracle::new()
            .resolve(&CivilInstant::new(y, m, d, 12, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn millennium() {
        let facts = resolve(2000, 1, 1);
        assert_eq!((1999, Common(11), 25), (facts.year, facts.month, facts.day));
        assert_eq!("戊午", facts.day_pillar.to_string());
        assert_eq!("己卯", facts.year_pillar.to_string());
        assert_eq!("丙子", facts.month_pillar.to_string());
        assert_eq!(("一九九九", "冬", "廿五"), (
            facts.year_label.as_str(),
            facts.month_label.as_str(),
            facts.day_label.as_str()
        ));
        assert_eq!(vec!["元旦节"], facts.festivals.solar);
        assert_eq!(None, facts.solar_term);
    }

    #[test]
    fn spring_festival_2024() {
        let facts = resolve(2024, 2, 10);
        assert_eq!((2024, Common(1), 1), (facts.year, facts.month, facts.day));
        assert_eq!("甲辰", facts.year_pillar.to_string());
        assert_eq!("丙寅", facts.month_pillar.to_string());
        assert_eq!("甲辰", facts.day_pillar.to_string());
        assert_eq!("二〇二四", facts.year_label);
        assert_eq!("正", facts.month_label);
        assert_eq!("初一", facts.day_label);
        assert_eq!(vec!["春节"], facts.festivals.lunar);
    }

    #[test]
    fn new_years_eve() {
        let facts = resolve(2024, 2, 9);
        assert_eq!((2023, Common(12)), (facts.year, facts.month));
        assert_eq!("癸卯", facts.year_pillar.to_string());
        assert!(facts.festivals.lunar.contains(&"除夕".to_owned()));
    }

    #[test]
    fn month_pillar_changes_on_jie() {
        // 立春 2024-02-04：前一日仍属乙丑月（癸卯年）
        let before = resolve(2024, 2, 3);
        let on = resolve(2024, 2, 4);
        assert_eq!("乙丑", before.month_pillar.to_string());
        assert_eq!("丙寅", on.month_pillar.to_string());
        assert_eq!(Some("立春".to_owned()), on.solar_term);
        assert_eq!(None, before.solar_term);
        // 年柱仍按正月初一分界
        assert_eq!("癸卯", on.year_pillar.to_string());
    }

    #[test]
    fn solar_terms() {
        assert_eq!(Some("冬至".to_owned()), resolve(2024, 12, 21).solar_term);
        assert_eq!(Some("夏至".to_owned()), resolve(2024, 6, 21).solar_term);
        assert_eq!(None, resolve(2024, 6, 22).solar_term);
    }

    #[test]
    fn leap_month() {
        let facts = resolve(2017, 7, 23);
        assert_eq!((2017, Leap(6), 1), (facts.year, facts.month, facts.day));
        assert_eq!("闰六", facts.month_label);
        let facts = resolve(2023, 3, 22);
        assert_eq!((2023, Leap(2), 1), (facts.year, facts.month, facts.day));
        let facts = resolve(2014, 10, 24);
        assert_eq!((2014, Leap(9), 1), (facts.year, facts.month, facts.day));
        assert_eq!("闰九", facts.month_label);
    }

    #[test]
    fn known_divergence_from_official_calendar() {
        // official 九月 starts on 2057-09-28; the computed new moon lands
        // just past midnight on the next day
        let facts = resolve(2057, 9, 28);
        assert_eq!((2057, Common(8), 30), (facts.year, facts.month, facts.day));
    }

    #[test]
    fn festivals() {
        assert_eq!(vec!["中秋节"], resolve(2024, 9, 17).festivals.lunar);
        assert_eq!(vec!["端午节"], resolve(2024, 6, 10).festivals.lunar);
        assert_eq!(vec!["国庆节"], resolve(2024, 10, 1).festivals.solar);
        // 清明 2024-04-04，寒食在前一日
        assert!(resolve(2024, 4, 3).festivals.other.contains(&"寒食节".to_owned()));
        assert_eq!(Some("清明".to_owned()), resolve(2024, 4, 4).solar_term);
    }

    #[test]
    fn out_of_range() {
        let oracle = ChineseOracle::new();
        let early = CivilInstant::new(1899, 12, 31, 0, 0).unwrap();
        assert_eq!(
            Err(OracleError::OutOfRange {
                year: 1899,
                first: 1900,
                last: 2100
            }),
            oracle.resolve(&early)
        );
        let narrow = ChineseOracle::new().with_years(2000..=2010);
        assert!(narrow.resolve(&CivilInstant::new(2011, 1, 1, 0, 0).unwrap()).is_err());
    }

    #[test]
    fn range_edges_resolve() {
        let oracle = ChineseOracle::new();
        for (y, m, d) in [(1900, 1, 1), (2100, 12, 31)] {
            let facts = oracle.resolve(&CivilInstant::new(y, m, d, 0, 0).unwrap());
            assert!(facts.is_ok(), "{y}-{m}-{d}: {facts:?}");
        }
    }

    #[test]
    fn time_of_day_is_irrelevant() {
        let oracle = ChineseOracle::new();
        let morning = oracle.resolve(&CivilInstant::new(2021, 9, 8, 0, 0).unwrap());
        let night = oracle.resolve(&CivilInstant::new(2021, 9, 8, 23, 59).unwrap());
        assert_eq!(morning, night);
    }

    #[test]
    fn korean_offset() {
        let oracle = ChineseOracle::new().with_offset(540);
        let facts = oracle
            .resolve(&CivilInstant::new(2024, 2, 10, 0, 0).unwrap())
            .unwrap();
        assert_eq!((2024, Common(1), 1), (facts.year, facts.month, facts.day));
    }
}
