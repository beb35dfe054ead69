//! Everything the almanac shows for one instant.

use serde::Serialize;

use crate::activity::{DayActivities, classify_day};
use crate::chinese::{Month, fmt::WEEKDAYS};
use crate::double_hour::{DoubleHourPeriod, resolve_double_hour};
use crate::error::Result;
use crate::ganzhi::StemBranch;
use crate::instant::CivilInstant;
use crate::oracle::{Festivals, LunisolarOracle};

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct SolarInfo {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// `0..=6`, Sunday being 0
    pub weekday: u32,
    /// 日, 一, … 六
    pub weekday_label: &'static str,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct LunarInfo {
    pub year: i32,
    pub month: Month,
    pub day: u32,
    pub year_label: String,
    pub month_label: String,
    pub day_label: String,
}

/// Year, month, day and double-hour pillars (四柱).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct FourPillars {
    pub year: StemBranch,
    pub month: StemBranch,
    pub day: StemBranch,
    pub hour: StemBranch,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct LunarSnapshot {
    pub solar: SolarInfo,
    pub lunar: LunarInfo,
    pub pillars: FourPillars,
    pub double_hour: DoubleHourPeriod,
    pub solar_term: Option<String>,
    pub festivals: Festivals,
    pub activities: DayActivities,
}

/// Resolves `instant` through `oracle` and derives the double hour and
/// activities from the resulting day stem.
///
/// ```
/// use almanako::{ChineseOracle, CivilInstant, snapshot};
///
/// let instant = CivilInstant::new(2024, 2, 10, 8, 30).unwrap();
/// let snap = snapshot(&ChineseOracle::new(), &instant).unwrap();
/// assert_eq!("六", snap.solar.weekday_label);
/// assert_eq!("戊辰", snap.pillars.hour.to_string());
/// assert_eq!("7-9点", snap.double_hour.hour_range);
/// assert_eq!(["出行", "上任", "会友", "上书", "远行"], snap.activities.auspicious);
/// ```
pub fn snapshot<O: LunisolarOracle>(oracle: &O, instant: &CivilInstant) -> Result<LunarSnapshot> {
    let facts = oracle.resolve(instant)?;
    let day_stem = facts.day_pillar.stem;
    let double_hour = resolve_double_hour(instant, day_stem);
    Ok(LunarSnapshot {
        solar: SolarInfo {
            year: instant.year(),
            month: instant.month(),
            day: instant.day(),
            hour: instant.hour(),
            minute: instant.minute(),
            weekday: instant.weekday(),
            weekday_label: WEEKDAYS[instant.weekday() as usize],
        },
        lunar: LunarInfo {
            year: facts.year,
            month: facts.month,
            day: facts.day,
            year_label: facts.year_label,
            month_label: facts.month_label,
            day_label: facts.day_label,
        },
        pillars: FourPillars {
            year: facts.year_pillar,
            month: facts.month_pillar,
            day: facts.day_pillar,
            hour: double_hour.pillar,
        },
        double_hour,
        solar_term: facts.solar_term,
        festivals: facts.festivals,
        activities: classify_day(day_stem),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlmanacError;
    use crate::oracle::{ChineseOracle, LunarFacts, OracleError};

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> LunarSnapshot {
        snapshot(&ChineseOracle::new(), &CivilInstant::new(y, m, d, h, mi).unwrap()).unwrap()
    }

    #[test]
    fn spring_festival_morning() {
        let snap = at(2024, 2, 10, 8, 30);
        assert_eq!((2024, 2, 10, 8, 30), (
            snap.solar.year,
            snap.solar.month,
            snap.solar.day,
            snap.solar.hour,
            snap.solar.minute
        ));
        assert_eq!((6, "六"), (snap.solar.weekday, snap.solar.weekday_label));
        assert_eq!((2024, Month::Common(1), 1), (snap.lunar.year, snap.lunar.month, snap.lunar.day));
        assert_eq!(("二〇二四", "正", "初一"), (
            snap.lunar.year_label.as_str(),
            snap.lunar.month_label.as_str(),
            snap.lunar.day_label.as_str()
        ));
        let pillars = [snap.pillars.year, snap.pillars.month, snap.pillars.day, snap.pillars.hour]
            .map(|p| p.to_string());
        assert_eq!(["甲辰", "丙寅", "甲辰", "戊辰"], pillars);
        assert_eq!("食时", snap.double_hour.name);
        assert_eq!(vec!["春节"], snap.festivals.lunar);
    }

    #[test]
    fn late_night_keeps_civil_day() {
        // 23:30 on a 甲 day: 子 hour pillar is 甲子 and the day is unchanged
        let snap = at(2024, 2, 10, 23, 30);
        assert_eq!("甲辰", snap.pillars.day.to_string());
        assert_eq!("甲子", snap.pillars.hour.to_string());
        assert_eq!("23-1点", snap.double_hour.hour_range);
    }

    #[test]
    fn yin_day_activities() {
        // 2024-02-11 is 乙巳
        let snap = at(2024, 2, 11, 12, 0);
        assert_eq!("乙巳", snap.pillars.day.to_string());
        assert_eq!(["祭祀", "祈福", "修造", "动土", "嫁娶"], snap.activities.auspicious);
        assert_eq!(["远行", "开市", "安床", "破土"], snap.activities.inauspicious);
    }

    #[test]
    fn idempotent() {
        assert_eq!(at(2023, 3, 22, 5, 45), at(2023, 3, 22, 5, 45));
    }

    #[test]
    fn errors_propagate() {
        let instant = CivilInstant::new(2101, 1, 1, 0, 0).unwrap();
        let res = snapshot(&ChineseOracle::new(), &instant);
        assert!(
            matches!(
                res,
                Err(AlmanacError::OracleResolution(OracleError::OutOfRange { year: 2101, .. }))
            ),
            "{res:?}"
        );
    }

    struct Fixed(LunarFacts);

    impl LunisolarOracle for Fixed {
        fn resolve(&self, _: &CivilInstant) -> std::result::Result<LunarFacts, OracleError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn any_oracle() {
        let real = ChineseOracle::new();
        let instant = CivilInstant::new(2000, 1, 1, 12, 0).unwrap();
        let fixed = Fixed(real.resolve(&instant).unwrap());
        // 12:00 on a 戊 day is 戊午
        let snap = snapshot(&fixed, &CivilInstant::new(1600, 6, 1, 12, 0).unwrap()).unwrap();
        assert_eq!("戊午", snap.pillars.day.to_string());
        assert_eq!("戊午", snap.pillars.hour.to_string());
        assert_eq!(1600, snap.solar.year);
        assert_eq!(1999, snap.lunar.year);
    }

    #[test]
    fn serialized_form() {
        let json = serde_json::to_value(at(2024, 2, 10, 8, 30)).unwrap();
        assert_eq!("甲辰", json["pillars"]["year"]);
        assert_eq!("六", json["solar"]["weekday_label"]);
        assert_eq!("7-9点", json["double_hour"]["hour_range"]);
        assert_eq!(serde_json::json!({ "Common": 1 }), json["lunar"]["month"]);
        assert_eq!(serde_json::json!(["春节"]), json["festivals"]["lunar"]);
        assert!(json["solar_term"].is_null());
    }
}
