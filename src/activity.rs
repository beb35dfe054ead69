//! Daily auspicious/inauspicious activities (宜忌).
//!
//! The lists depend only on whether the day stem is yang or yin.

use serde::Serialize;

use crate::ganzhi::Stem;

const YANG_AUSPICIOUS: &[&str] = &["出行", "上任", "会友", "上书", "远行"];
const YANG_INAUSPICIOUS: &[&str] = &["动土", "祭祀", "安葬", "行船"];
const YIN_AUSPICIOUS: &[&str] = &["祭祀", "祈福", "修造", "动土", "嫁娶"];
const YIN_INAUSPICIOUS: &[&str] = &["远行", "开市", "安床", "破土"];

/// Activities recommended (宜) and discouraged (忌) on a day.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct DayActivities {
    pub auspicious: &'static [&'static str],
    pub inauspicious: &'static [&'static str],
}

/// Classifies a day by its stem.
///
/// ```
/// use almanako::{Stem, classify_day};
///
/// let day = classify_day(Stem::Jia);
/// assert_eq!(["出行", "上任", "会友", "上书", "远行"], day.auspicious);
/// assert_eq!(["远行", "开市", "安床", "破土"], classify_day(Stem::Yi).inauspicious);
/// ```
pub fn classify_day(day_stem: Stem) -> DayActivities {
    match day_stem {
        Stem::Jia | Stem::Bing | Stem::Wu | Stem::Geng | Stem::Ren => DayActivities {
            auspicious: YANG_AUSPICIOUS,
            inauspicious: YANG_INAUSPICIOUS,
        },
        Stem::Yi | Stem::Ding | Stem::Ji | Stem::Xin | Stem::Gui => DayActivities {
            auspicious: YIN_AUSPICIOUS,
            inauspicious: YIN_INAUSPICIOUS,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yang_and_yin() {
        for stem in Stem::ALL {
            let day = classify_day(stem);
            if stem.is_yang() {
                assert_eq!(YANG_AUSPICIOUS, day.auspicious, "{}", stem.name());
                assert_eq!(YANG_INAUSPICIOUS, day.inauspicious, "{}", stem.name());
            } else {
                assert_eq!(YIN_AUSPICIOUS, day.auspicious, "{}", stem.name());
                assert_eq!(YIN_INAUSPICIOUS, day.inauspicious, "{}", stem.name());
            }
        }
    }

    #[test]
    fn lists_are_fixed() {
        assert_eq!(5, classify_day(Stem::Geng).auspicious.len());
        assert_eq!(4, classify_day(Stem::Gui).inauspicious.len());
        // 祭祀 is favoured on yin days only
        assert!(classify_day(Stem::Ding).auspicious.contains(&"祭祀"));
        assert!(classify_day(Stem::Bing).inauspicious.contains(&"祭祀"));
    }

    #[test]
    fn serializes_lists() {
        let json = serde_json::to_value(classify_day(Stem::Jia)).unwrap();
        assert_eq!(
            serde_json::json!({
                "auspicious": ["出行", "上任", "会友", "上书", "远行"],
                "inauspicious": ["动土", "祭祀", "安葬", "行船"],
            }),
            json
        );
    }
}
