//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 本程序以解析方法推算的節氣合朔編算夏曆，見 [`ephemeris`]。月首取合朔所在的民用日期，時區默認為北京時間（UTC+8），亦可另行指定。

use serde::Serialize;

use crate::date::Date;
use crate::time_scales::{Tdb, Ut};

pub mod ephemeris;
pub mod festival;
pub mod fmt;

/// 北京時間相對 UTC 的分鐘數
pub const CHINA_STANDARD_OFFSET: i32 = 480;

/// 「歲」，相鄰兩冬至間的時段，或自冬至所在月（十一月）至下一冬至前月（十月或閏十月）的時段。
///
/// 支持的年份見 [`ephemeris::SUPPORTED`]。
///
/// 注意：「歲」與「年」在曆法上不同，年以正月為首，但曆法編算須以兩冬至間的「歲」為基礎，本程序亦以「歲」編排，並依日期計算所在「年」。
///
/// # 用例
///
/// ```
/// use almanako::Date;
/// use almanako::chinese::{Annus, CHINA_STANDARD_OFFSET, Month::*};
///
/// let date = Date::from_gregorian(2000, 1, 1).unwrap();
/// let annus = Annus::from_date(date, CHINA_STANDARD_OFFSET).unwrap();
///
/// assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
/// ```
#[derive(Debug, Clone)]
pub struct Annus {
    /// 序號，為該歲大部分時段所在的公元年
    pub annus: i32,
    /// 該歲的曆表
    pub ephemeris: ephemeris::Annus,
    /// 定日期所用時區，東為正，單位分鐘
    pub tz_offset_minutes: i32,
    /// 全部月首，包括次一歲首月用以標記本歲最末日
    pub months: Vec<NewMoon>,
}
/// 月首信息
#[derive(Debug, Copy, Clone)]
pub struct NewMoon {
    /// 月名
    pub month: Month,
    /// 月首所在日期
    pub date: Date,
}
/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，十一、十二月稱「冬月」「腊月」。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// 無法編排一歲。
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum AnnusError {
    /// 曆表不支持該歲
    #[error("no ephemeris for annus {0}")]
    NoData(i32),
    /// 兩冬至間月數不為 12 或 13，或閏月無法安置
    #[error("annus {annus}: {months} months between winter solstices")]
    Inconsistent { annus: i32, months: usize },
}

impl Annus {
    /// 取得與公元 `annus` 年對應的歲，日期以東 `tz_offset_minutes` 分鐘的時區計。
    ///
    /// 若曆表不支持該歲則回報 [`AnnusError::NoData`]。
    ///
    /// # 用例
    ///
    /// ```
    /// use almanako::chinese::{Annus, CHINA_STANDARD_OFFSET};
    ///
    /// let annus = Annus::new(2000, CHINA_STANDARD_OFFSET).unwrap();
    /// assert_eq!(13, annus.months.len());
    /// ```
    pub fn new(annus: i32, tz_offset_minutes: i32) -> Result<Self, AnnusError> {
        use Month::*;

        let inconsistent = |months| AnnusError::Inconsistent { annus, months };
        let ephemeris = ephemeris::Annus::compute(annus).ok_or(AnnusError::NoData(annus))?;
        let date = |tdb| date_in_zone(tdb, tz_offset_minutes);
        let new_moon_dates: Vec<_> = ephemeris.new_moon.iter().map(|&tdb| date(tdb)).collect();
        let ws = date(ephemeris.solar_term[0]);
        let ws_next = date(ephemeris.solar_term[24]);
        let m11_idx = new_moon_dates
            .partition_point(|d| d <= &ws)
            .checked_sub(1)
            .ok_or(inconsistent(0))?;
        let m11n_idx = new_moon_dates
            .partition_point(|d| d <= &ws_next)
            .checked_sub(1)
            .ok_or(inconsistent(0))?;
        let mut needs_leap = match m11n_idx.saturating_sub(m11_idx) {
            12 => false,
            13 => true,
            n => return Err(inconsistent(n)),
        };

        let mut months = Vec::with_capacity(m11n_idx - m11_idx + 1);
        let mut month = 10;
        let mut term = 0;
        for i in m11_idx..=m11n_idx {
            if needs_leap
                && let (Some(&next), Some(&principal)) =
                    (new_moon_dates.get(i + 1), ephemeris.solar_term.get(term))
                && next <= date(principal)
            {
                months.push(NewMoon {
                    month: Leap(month),
                    date: new_moon_dates[i],
                });
                needs_leap = false;
                continue;
            }
            month = month % 12 + 1;
            months.push(NewMoon {
                month: Common(month),
                date: new_moon_dates[i],
            });
            term += 2;
        }
        if needs_leap {
            return Err(inconsistent(m11n_idx - m11_idx));
        }

        Ok(Annus {
            annus,
            ephemeris,
            tz_offset_minutes,
            months,
        })
    }
    /// 依特定日期取得其所在歲。
    ///
    /// 若曆表不支持該歲則回報 [`AnnusError::NoData`]。
    ///
    /// # 用例
    ///
    /// ```
    /// use almanako::Date;
    /// use almanako::chinese::{Annus, CHINA_STANDARD_OFFSET};
    ///
    /// let date = Date::from_gregorian(1999, 12, 31).unwrap();
    /// let annus = Annus::from_date(date, CHINA_STANDARD_OFFSET).unwrap();
    ///
    /// assert_eq!(2000, annus.annus);
    /// ```
    pub fn from_date(date: Date, tz_offset_minutes: i32) -> Result<Self, AnnusError> {
        let mut y = date.gregorian().0;
        let mut last_step = 0;
        loop {
            let annus = Self::new(y, tz_offset_minutes)?;
            let (start, end) = annus.span();

            if (start..end).contains(&date) {
                return Ok(annus);
            }

            let step = if date < start { -1 } else { 1 };
            // 前後兩歲之間有缺口
            if step == -last_step {
                return Err(AnnusError::Inconsistent {
                    annus: y,
                    months: annus.months.len().saturating_sub(1),
                });
            }
            last_step = step;
            y += step;
        }
    }

    /// 該歲首日，及次歲首日（不含）。
    pub fn span(&self) -> (Date, Date) {
        let start = self.months.first().map(|m| m.date);
        let end = self.months.last().map(|m| m.date);
        match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => (Date::from_jdn(0), Date::from_jdn(0)),
        }
    }

    /// 給定日期所在月於 `months` 中的位置。
    fn month_index(&self, date: Date) -> Result<usize, OtherAnnus> {
        let (begin, end) = self.span();
        if date < begin {
            return Err(OtherAnnus::Before);
        } else if date >= end {
            return Err(OtherAnnus::After);
        }
        Ok(self.months.partition_point(|m| m.date <= date) - 1)
    }

    /// 取得給定日期在該歲的年月日，返回格式為 `(年, 月, 日)`。
    ///
    /// 若所給日期不在該歲，則回報 `Err` 並指出該日期在該歲之前還是之後。
    ///
    /// # 用例
    ///
    /// ```
    /// use almanako::Date;
    /// use almanako::chinese::{Annus, CHINA_STANDARD_OFFSET, Month::*};
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let annus = Annus::from_date(date, CHINA_STANDARD_OFFSET).unwrap();
    ///
    /// assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
    /// ```
    pub fn ymd_for(&self, date: Date) -> Result<(i32, Month, u32), OtherAnnus> {
        let m = &self.months[self.month_index(date)?];
        let d = date.jdn() - m.date.jdn() + 1;
        let y = if m.month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        };
        Ok((y, m.month, d))
    }

    /// 取得給定日期所在月的日數（29 或 30）。
    ///
    /// ```
    /// use almanako::Date;
    /// use almanako::chinese::{Annus, CHINA_STANDARD_OFFSET};
    ///
    /// let date = Date::from_gregorian(2024, 2, 10).unwrap();
    /// let annus = Annus::from_date(date, CHINA_STANDARD_OFFSET).unwrap();
    ///
    /// assert_eq!(Ok(29), annus.month_length_for(date)); // 2024 年正月小
    /// ```
    pub fn month_length_for(&self, date: Date) -> Result<u32, OtherAnnus> {
        let idx = self.month_index(date)?;
        Ok((self.months[idx + 1].date - self.months[idx].date) as u32)
    }

    /// 取得給定日期所在節氣信息，若當日並無交節，則給出該日相對其前一個交節的日數差。返回值格式如下：
    ///
    /// - `.0`：取得的節氣所在歲（前一歲大雪可能落在該歲，故須回報所在歲）
    /// - `.1`：該節氣序號，1..=24 對應立春到大寒
    /// - `.2`：所給 `date` 在該節交節後第幾日，為 0 則表示當日交節
    ///
    /// 本方法支持自該歲首日至次歲冬至前日的區間。
    ///
    /// 若給定日期不在該歲，或曆表無法取得前一歲節氣數據，則回報 `Err`。
    ///
    /// # 用例
    ///
    /// ```
    /// use almanako::Date;
    /// use almanako::chinese::{Annus, CHINA_STANDARD_OFFSET};
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let annus = Annus::from_date(date, CHINA_STANDARD_OFFSET).unwrap();
    ///
    /// assert_eq!(Ok((2000, 22, 10)), annus.solar_term_for(date)); // 冬至過後第 10 天
    /// ```
    pub fn solar_term_for(&self, date: Date) -> Result<(i32, u32, u32), SolarTermErr> {
        use self::OtherAnnus::*;
        use SolarTermErr::*;
        let date_of = |tdb| date_in_zone(tdb, self.tz_offset_minutes);
        let (begin, _) = self.span();
        if date < begin {
            return Err(OtherAnnus(Before));
        } else if date >= date_of(self.ephemeris.solar_term[24]) {
            return Err(OtherAnnus(After));
        }
        if date < date_of(self.ephemeris.solar_term[0]) {
            let last_annus = ephemeris::Annus::compute(self.annus - 1).ok_or(NoData)?;
            for (idx, &tdb) in (22..24).zip(&last_annus.solar_term[22..24]).rev() {
                let term_start = date_of(tdb);
                if date >= term_start {
                    return Ok((self.annus - 1, (idx + 21) % 24 + 1, (date - term_start) as u32));
                }
            }
            return Err(NoData);
        }
        let idx = self.ephemeris.solar_term[..24].partition_point(|&tdb| date_of(tdb) <= date) - 1;
        let off = date - date_of(self.ephemeris.solar_term[idx]);
        Ok((self.annus, (idx as u32 + 21) % 24 + 1, off as u32))
    }
}

/// 表示給定日期不在該歲，並指出其在前還是在後。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherAnnus {
    Before,
    After,
}

/// 表示給定日期不在該歲，或曆表無法取得節氣數據。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolarTermErr {
    NoData,
    OtherAnnus(OtherAnnus),
}

/// 將給定曆表時間轉為東 `tz_offset_minutes` 分鐘時區的日期。
pub fn date_in_zone(tdb: Tdb, tz_offset_minutes: i32) -> Date {
    Ut::convert(tdb).date_in_timezone(tz_offset_minutes)
}

/// 取得所給公元年的干支。
///
/// # 用例
///
/// ```
/// use almanako::chinese::sexagenary_for_year;
///
/// assert_eq!(1, sexagenary_for_year(-2696));
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year.rem_euclid(60) as u32 + 2696) % 60 + 1
}

/// 取得月干支。月以節分：`year` 為以立春分界的公元年，`month` 為自寅月起算的序號（`0..12`，0 為寅月，11 為次年丑月）。月干依五虎遁：甲己之年丙作首，乙庚之歲戊為頭，丙辛之年尋庚上，丁壬壬寅順水流，戊癸何方發，甲寅之上好追求。
///
/// # 用例
///
/// ```
/// use almanako::chinese::{fmt, sexagenary_for_month};
///
/// assert_eq!("丙寅", fmt::sexagenary(sexagenary_for_month(2024, 0)));
/// assert_eq!("丁丑", fmt::sexagenary(sexagenary_for_month(2024, 11)));
/// ```
pub fn sexagenary_for_month(year: i32, month: u32) -> u32 {
    let year_stem = (sexagenary_for_year(year) - 1) % 10;
    (2 + 12 * (year_stem % 5) + month % 12) % 60 + 1
}

/// 由 [`Annus::solar_term_for`] 所得節氣推出以立春分界的年，及自寅月起算的月序號，供 [`sexagenary_for_month`] 使用。
///
/// ```
/// use almanako::chinese::jie_month;
///
/// assert_eq!((2024, 0), jie_month(2024, 1)); // 立春
/// assert_eq!((2023, 11), jie_month(2024, 23)); // 小寒
/// assert_eq!((2023, 10), jie_month(2024, 22)); // 冬至
/// ```
pub fn jie_month(annus: i32, term: u32) -> (i32, u32) {
    let year = if term >= 22 { annus - 1 } else { annus };
    (year, (term.max(1) - 1) / 2)
}
