//! 節日
//!
//! 公曆節日按月日或「某月第幾個星期幾」定；農曆節日僅見於平月，閏月不重複過節。

use super::Month;
use crate::date::Date;

/// 公曆定日節日，`(月, 日, 名)`
const SOLAR_FIXED: &[(i32, i32, &str)] = &[
    (1, 1, "元旦节"),
    (2, 14, "情人节"),
    (3, 8, "妇女节"),
    (3, 12, "植树节"),
    (3, 15, "消费者权益日"),
    (4, 1, "愚人节"),
    (5, 1, "劳动节"),
    (5, 4, "青年节"),
    (5, 12, "护士节"),
    (6, 1, "儿童节"),
    (7, 1, "建党节"),
    (8, 1, "建军节"),
    (9, 10, "教师节"),
    (10, 1, "国庆节"),
    (10, 31, "万圣节前夜"),
    (11, 1, "万圣节"),
    (12, 24, "平安夜"),
    (12, 25, "圣诞节"),
];

/// 公曆按星期定的節日，`(月, 第幾個, 星期幾（0 為星期日）, 名)`
const SOLAR_WEEKDAY: &[(i32, i32, u32, &str)] = &[
    (5, 2, 0, "母亲节"),
    (6, 3, 0, "父亲节"),
    (11, 4, 4, "感恩节"),
];

/// 農曆主要節日，`(月, 日, 名)`；除夕另計。
const LUNAR: &[(u32, u32, &str)] = &[
    (1, 1, "春节"),
    (1, 15, "元宵节"),
    (2, 2, "龙头节"),
    (3, 3, "上巳节"),
    (5, 5, "端午节"),
    (7, 7, "七夕节"),
    (7, 15, "中元节"),
    (8, 15, "中秋节"),
    (9, 9, "重阳节"),
    (10, 1, "寒衣节"),
    (10, 15, "下元节"),
    (12, 8, "腊八节"),
    (12, 23, "小年"),
];

/// 農曆其他節日
const LUNAR_OTHER: &[(u32, u32, &str)] = &[
    (1, 4, "接神日"),
    (1, 5, "隔开日"),
    (1, 7, "人日"),
    (1, 8, "谷日"),
    (1, 9, "天日"),
    (1, 10, "地日"),
    (1, 20, "天穿节"),
    (1, 25, "填仓节"),
    (1, 30, "正月晦"),
    (2, 1, "中和节"),
    (5, 20, "分龙节"),
    (5, 25, "会龙节"),
    (6, 6, "天贶节"),
    (6, 24, "观莲节"),
    (6, 25, "五谷母节"),
    (7, 22, "财神节"),
    (7, 29, "地藏节"),
    (8, 1, "天灸日"),
    (10, 10, "十成节"),
    (12, 7, "驱傩日"),
    (12, 16, "尾牙"),
    (12, 24, "祭灶日"),
];

/// 取得公曆節日。
///
/// ```
/// use almanako::Date;
/// use almanako::chinese::festival;
///
/// let date = Date::from_gregorian(2024, 5, 12).unwrap();
/// assert_eq!(vec!["护士节", "母亲节"], festival::solar(date));
/// ```
pub fn solar(date: Date) -> Vec<&'static str> {
    let (_, m, d) = date.gregorian();
    let weekday = date.weekday_from_sunday();
    let nth = (d - 1) / 7 + 1;
    SOLAR_FIXED
        .iter()
        .filter(|&&(fm, fd, _)| (fm, fd) == (m, d))
        .map(|&(_, _, name)| name)
        .chain(
            SOLAR_WEEKDAY
                .iter()
                .filter(|&&(fm, fn_, fw, _)| (fm, fn_, fw) == (m, nth, weekday))
                .map(|&(_, _, _, name)| name),
        )
        .collect()
}

/// 取得農曆主要節日。`month_len` 為當月日數，用以判斷除夕。
///
/// ```
/// use almanako::chinese::{festival, Month::*};
///
/// assert_eq!(vec!["中秋节"], festival::lunar(Common(8), 15, 30));
/// assert_eq!(vec!["除夕"], festival::lunar(Common(12), 29, 29));
/// assert!(festival::lunar(Leap(8), 15, 29).is_empty());
/// ```
pub fn lunar(month: Month, day: u32, month_len: u32) -> Vec<&'static str> {
    let Month::Common(m) = month else {
        return Vec::new();
    };
    let mut rt = lookup(LUNAR, m, day);
    if m == 12 && day == month_len {
        rt.push("除夕");
    }
    rt
}

/// 取得農曆其他節日。`eve_of_qingming` 表示次日交清明，當日為寒食。
///
/// ```
/// use almanako::chinese::{festival, Month::*};
///
/// assert_eq!(vec!["人日"], festival::other(Common(1), 7, false));
/// assert_eq!(vec!["寒食节"], festival::other(Common(2), 26, true));
/// ```
pub fn other(month: Month, day: u32, eve_of_qingming: bool) -> Vec<&'static str> {
    let mut rt = match month {
        Month::Common(m) => lookup(LUNAR_OTHER, m, day),
        Month::Leap(_) => Vec::new(),
    };
    if eve_of_qingming {
        rt.push("寒食节");
    }
    rt
}

fn lookup(table: &[(u32, u32, &'static str)], month: u32, day: u32) -> Vec<&'static str> {
    table
        .iter()
        .filter(|&&(m, d, _)| (m, d) == (month, day))
        .map(|&(_, _, name)| name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chinese::Month::*;

    fn date(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn solar_fixed() {
        assert_eq!(vec!["国庆节"], solar(date(2024, 10, 1)));
        assert_eq!(vec!["元旦节"], solar(date(1900, 1, 1)));
        assert!(solar(date(2024, 10, 2)).is_empty());
    }

    #[test]
    fn solar_by_weekday() {
        // 2024 年母親節 5 月 12 日，父親節 6 月 16 日，感恩節 11 月 28 日
        assert!(solar(date(2024, 5, 12)).contains(&"母亲节"));
        assert!(!solar(date(2024, 5, 5)).contains(&"母亲节"));
        assert_eq!(vec!["父亲节"], solar(date(2024, 6, 16)));
        assert_eq!(vec!["感恩节"], solar(date(2024, 11, 28)));
        assert!(solar(date(2024, 11, 21)).is_empty());
    }

    #[test]
    fn lunar_festivals() {
        assert_eq!(vec!["春节"], lunar(Common(1), 1, 29));
        assert_eq!(vec!["端午节"], lunar(Common(5), 5, 30));
        assert!(lunar(Leap(5), 5, 30).is_empty());
        assert!(lunar(Common(12), 29, 30).is_empty());
        assert_eq!(vec!["除夕"], lunar(Common(12), 30, 30));
    }

    #[test]
    fn other_festivals() {
        assert_eq!(vec!["尾牙"], other(Common(12), 16, false));
        assert!(other(Leap(6), 6, false).is_empty());
    }
}
