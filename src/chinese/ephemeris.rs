//! 月相節氣曆表
//!
//! 按需以解析方法推算一歲的節氣與合朔時刻：太陽視黃經採用低精度太陽理論（平黃經、中心差、光行差與章動修正），誤差約 0.01°，即約一刻鐘；合朔採用平朔級數加週期項與行星攝動項，誤差在分鐘以內。兩者皆以曆表時（TDB）給出。
//!
//! 支持的歲見 [`SUPPORTED`]。

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use crate::time_scales::Tdb;

/// 可推算的歲。
pub const SUPPORTED: RangeInclusive<i32> = 1800..=2200;

/// 一歲所需合朔數：自冬至前一朔起，足以覆蓋至次歲冬至後一朔。
pub const NEW_MOONS: usize = 16;

/// 回歸年日數
const TROPICAL_YEAR: f64 = 365.242_19;
/// 朔望月日數
const SYNODIC_MONTH: f64 = 29.530_588_861;
/// 2000 年 1 月 6 日平朔（k = 0）
const NEW_MOON_EPOCH: f64 = 2_451_550.097_66;

/// 保存一歲的曆表數據
#[derive(Debug, Clone, PartialEq)]
pub struct Annus {
    /// 序號，為該歲大部分時段所在公元年
    pub annus: i32,
    /// 從冬至開始的各節氣時刻，亦含次歲冬至以便計算末日
    pub solar_term: [Tdb; 25],
    /// 合朔時刻，自冬至當時或之前最近一朔起連續 [`NEW_MOONS`] 個
    pub new_moon: [Tdb; NEW_MOONS],
}

impl Annus {
    /// 推算公元 `annus` 年對應的歲的曆表。
    ///
    /// 超出 [`SUPPORTED`] 則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use almanako::chinese::ephemeris::Annus;
    ///
    /// let annus = Annus::compute(2000).unwrap();
    /// assert!(annus.new_moon[0] <= annus.solar_term[0]);
    /// assert!(annus.solar_term[0] < annus.new_moon[1]);
    /// ```
    pub fn compute(annus: i32) -> Option<Self> {
        if !SUPPORTED.contains(&annus) {
            return None;
        }
        // 冬至約在前一公元年 12 月 21 日前後
        let guess = crate::date::Date::from_gregorian(annus - 1, 12, 21)?.jdn() as f64;
        let winter_solstice = solve_solar_longitude(270.0, guess);

        let mut solar_term = [Tdb(0.0); 25];
        solar_term[0] = winter_solstice;
        for i in 1..25 {
            let target = (270.0 + 15.0 * i as f64).rem_euclid(360.0);
            let guess = solar_term[i - 1].0 + TROPICAL_YEAR / 24.0;
            solar_term[i] = solve_solar_longitude(target, guess);
        }

        let mut k = ((winter_solstice.0 - NEW_MOON_EPOCH) / SYNODIC_MONTH).floor();
        while new_moon(k) > winter_solstice {
            k -= 1.0;
        }
        while new_moon(k + 1.0) <= winter_solstice {
            k += 1.0;
        }
        let mut new_moons = [Tdb(0.0); NEW_MOONS];
        for (i, slot) in new_moons.iter_mut().enumerate() {
            *slot = new_moon(k + i as f64);
        }

        Some(Annus {
            annus,
            solar_term,
            new_moon: new_moons,
        })
    }
}

fn sin_deg(deg: f64) -> f64 {
    (deg * PI / 180.0).sin()
}

/// 太陽視黃經（度，`0..360`）
///
/// ```
/// use almanako::chinese::ephemeris::apparent_solar_longitude;
/// use almanako::time_scales::Tdb;
///
/// // 2000 年春分約在 3 月 20 日 7:35 UTC
/// let lon = apparent_solar_longitude(Tdb(2451623.816));
/// assert!(lon < 0.05 || lon > 359.95);
/// ```
pub fn apparent_solar_longitude(tdb: Tdb) -> f64 {
    let t = (tdb.0 - 2_451_545.0) / 36_525.0;
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t;
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * sin_deg(m)
        + (0.019_993 - 0.000_101 * t) * sin_deg(2.0 * m)
        + 0.000_289 * sin_deg(3.0 * m);
    let omega = 125.04 - 1_934.136 * t;
    (l0 + c - 0.005_69 - 0.004_78 * sin_deg(omega)).rem_euclid(360.0)
}

/// 以牛頓法求太陽視黃經達 `target` 度的時刻，`guess` 須在其前後數日之內。
fn solve_solar_longitude(target: f64, guess: f64) -> Tdb {
    let rate = 360.0 / TROPICAL_YEAR;
    let mut jd = guess;
    for _ in 0..20 {
        let diff = (target - apparent_solar_longitude(Tdb(jd)) + 540.0).rem_euclid(360.0) - 180.0;
        let step = diff / rate;
        jd += step;
        if step.abs() < 1e-7 {
            break;
        }
    }
    Tdb(jd)
}

/// 第 `k` 個合朔（`k = 0` 為 2000 年 1 月 6 日一朔）的時刻。
///
/// ```
/// use almanako::chinese::ephemeris::new_moon;
///
/// // 2024 年 2 月 9 日 22:59 UTC
/// let jd = new_moon(298.0).0;
/// assert!((jd - 2460350.458).abs() < 0.01);
/// ```
pub fn new_moon(k: f64) -> Tdb {
    let t = k / 1_236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = NEW_MOON_EPOCH + SYNODIC_MONTH * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = 2.553_4 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3;
    let mp = 201.564_3 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4;
    let f = 160.710_8 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4;
    let omega = 124.774_6 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3;

    let periodic = -0.407_20 * sin_deg(mp)
        + 0.172_41 * e * sin_deg(m)
        + 0.016_08 * sin_deg(2.0 * mp)
        + 0.010_39 * sin_deg(2.0 * f)
        + 0.007_39 * e * sin_deg(mp - m)
        - 0.005_14 * e * sin_deg(mp + m)
        + 0.002_08 * e * e * sin_deg(2.0 * m)
        - 0.001_11 * sin_deg(mp - 2.0 * f)
        - 0.000_57 * sin_deg(mp + 2.0 * f)
        + 0.000_56 * e * sin_deg(2.0 * mp + m)
        - 0.000_42 * sin_deg(3.0 * mp)
        + 0.000_42 * e * sin_deg(m + 2.0 * f)
        + 0.000_38 * e * sin_deg(m - 2.0 * f)
        - 0.000_24 * e * sin_deg(2.0 * mp - m)
        - 0.000_17 * sin_deg(omega)
        - 0.000_07 * sin_deg(mp + 2.0 * m)
        + 0.000_04 * sin_deg(2.0 * mp - 2.0 * f)
        + 0.000_04 * sin_deg(3.0 * m)
        + 0.000_03 * sin_deg(mp + m - 2.0 * f)
        + 0.000_03 * sin_deg(2.0 * mp + 2.0 * f)
        - 0.000_03 * sin_deg(mp + m + 2.0 * f)
        + 0.000_03 * sin_deg(mp - m + 2.0 * f)
        - 0.000_02 * sin_deg(mp - m - 2.0 * f)
        - 0.000_02 * sin_deg(3.0 * mp + m)
        + 0.000_02 * sin_deg(4.0 * mp);

    const PLANETARY: [(f64, f64, f64); 14] = [
        (0.000_325, 299.77, 0.107_408),
        (0.000_165, 251.88, 0.016_321),
        (0.000_164, 251.83, 26.651_886),
        (0.000_126, 349.42, 36.412_478),
        (0.000_110, 84.66, 18.206_239),
        (0.000_062, 141.74, 53.303_771),
        (0.000_060, 207.14, 2.453_732),
        (0.000_056, 154.84, 7.306_860),
        (0.000_047, 34.52, 27.261_239),
        (0.000_042, 207.19, 0.121_824),
        (0.000_040, 291.34, 1.844_379),
        (0.000_037, 161.72, 24.198_154),
        (0.000_035, 239.56, 25.513_099),
        (0.000_023, 331.55, 3.592_518),
    ];
    let planetary: f64 = PLANETARY
        .iter()
        .enumerate()
        .map(|(i, &(amp, a0, rate))| {
            // 僅 A1 含 T² 項
            let arg = a0 + rate * k - if i == 0 { 0.009_173 * t2 } else { 0.0 };
            amp * sin_deg(arg)
        })
        .sum();

    Tdb(mean + periodic + planetary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;
    use crate::time_scales::Ut;

    fn date_cst(tdb: Tdb) -> Date {
        Ut::convert(tdb).date_in_timezone(480)
    }

    #[test]
    fn solar_terms() {
        let annus = Annus::compute(2000).unwrap();
        let date = date_cst(annus.solar_term[0]);
        assert_eq!("1999-12-22", date.iso_gregorian());
        let date = date_cst(annus.solar_term[24]);
        assert_eq!("2000-12-21", date.iso_gregorian());
    }

    #[test]
    fn solar_terms_2024() {
        let annus = Annus::compute(2024).unwrap();
        // 冬至 2023-12-22，立春 2024-02-04，夏至 2024-06-21，冬至 2024-12-21
        for (idx, std) in [(0, "2023-12-22"), (3, "2024-02-04"), (12, "2024-06-21"), (24, "2024-12-21")] {
            assert_eq!(std, date_cst(annus.solar_term[idx]).iso_gregorian(), "term {idx}");
        }
    }

    #[test]
    fn new_moons() {
        let annus = Annus::compute(2000).unwrap();
        let date = date_cst(annus.new_moon[0]);
        assert_eq!("1999-12-08", date.iso_gregorian());
        let date = date_cst(annus.new_moon[2]);
        assert_eq!("2000-02-05", date.iso_gregorian());
    }

    #[test]
    fn new_moons_are_a_lunation_apart() {
        for year in [1900, 1950, 2000, 2050, 2100] {
            let annus = Annus::compute(year).unwrap();
            for pair in annus.new_moon.windows(2) {
                let gap = pair[1].0 - pair[0].0;
                assert!((29.2..29.9).contains(&gap), "{year}: {gap}");
            }
            assert!(annus.new_moon[NEW_MOONS - 1] > annus.solar_term[24]);
        }
    }

    #[test]
    fn terms_are_ordered() {
        let annus = Annus::compute(1987).unwrap();
        for pair in annus.solar_term.windows(2) {
            let gap = pair[1].0 - pair[0].0;
            assert!((14.5..16.0).contains(&gap), "{gap}");
        }
    }

    #[test]
    fn unsupported() {
        assert_eq!(None, Annus::compute(1799));
        assert_eq!(None, Annus::compute(2201));
    }
}
