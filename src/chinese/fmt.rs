//! 格式化日期相關功能
//!
//! 輸出文字一律用簡體字，與通行農曆表示一致。

/// 漢數字，第 `1..=9` 項分別為「一」到「九」。為便於格式化日期，第 0 項為「十」。
pub const NUM_CHINESE: &[&str] = &["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 十天干，自甲至癸。
pub const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// 十二地支，自子至亥。
pub const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// 星期名，自星期日起。
pub const WEEKDAYS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// 干支序號轉為文本形式，`1..=60` 分別為甲子到癸亥。
///
/// # 用例
///
/// ```
/// use almanako::chinese;
///
/// assert_eq!("乙巳", chinese::fmt::sexagenary(42));
/// ```
pub fn sexagenary(num: u32) -> String {
    let idx = (num + 59) % 60;
    STEMS[(idx % 10) as usize].to_owned() + BRANCHES[(idx % 12) as usize]
}

/// 取得年名，逐位讀出公元年數字，如 2024 年為「二〇二四」。
///
/// # 用例
///
/// ```
/// use almanako::chinese;
///
/// assert_eq!("二〇二四", chinese::fmt::year(2024));
/// assert_eq!("一九〇〇", chinese::fmt::year(1900));
/// ```
pub fn year(y: i32) -> String {
    const DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
    y.unsigned_abs()
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| DIGITS[d as usize])
        .collect()
}

/// 取得月名（不含「月」字）。正月作「正」，十一、十二月稱「冬」「腊」，閏月前加「闰」。
///
/// # 用例
///
/// ```
/// use almanako::chinese::{self, Month::*};
///
/// assert_eq!("冬", chinese::fmt::month_label(Common(11)));
/// assert_eq!("闰二", chinese::fmt::month_label(Leap(2)));
/// ```
///
/// 月序號不在 `1..=12` 間時返回空串。
pub fn month_label(m: super::Month) -> String {
    let mut rt = String::new();
    if m.is_leap() {
        rt += "闰";
    }
    let num = m.num();
    rt += match num {
        1 => "正",
        2..=9 => NUM_CHINESE[num as usize],
        10 => "十",
        11 => "冬",
        12 => "腊",
        _ => return String::new(),
    };
    rt
}

/// 取得月名（含「月」字）。
///
/// # 用例
///
/// ```
/// use almanako::chinese::{self, Month::*};
///
/// assert_eq!("冬月", chinese::fmt::month(Common(11)));
/// assert_eq!("闰正月", chinese::fmt::month(Leap(1)));
/// ```
pub fn month(m: super::Month) -> String {
    month_label(m) + "月"
}

/// 取得日名，前十日為「初一」到「初十」，第 21 至 29 日為「廿一」到「廿九」。
///
/// # 用例
///
/// ```
/// use almanako::chinese;
///
/// assert_eq!("初十", chinese::fmt::day(10));
/// assert_eq!("廿五", chinese::fmt::day(25));
/// assert_eq!("三十", chinese::fmt::day(30));
/// ```
///
/// 日序號不在 `1..=30` 間時返回空串。
pub fn day(d: u32) -> String {
    let prefix = match d {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => return String::new(),
    };
    prefix.to_owned() + NUM_CHINESE[(d % 10) as usize]
}

/// 節氣序號轉為名稱。`1..=24` 分別為立春到大寒。
///
/// # 用例
///
/// ```
/// use almanako::chinese;
///
/// assert_eq!("谷雨", chinese::fmt::solar_term(6));
/// assert_eq!("大寒", chinese::fmt::solar_term(24));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    const NAMES: &[&str] = &[
        "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
        "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪",
        "冬至", "小寒",
    ];
    NAMES[term.rem_euclid(24) as usize]
}
