//! Heavenly Stems, Earthly Branches and their sexagenary pairing.
//!
//! The names follow [`chinese::fmt::STEMS`](crate::chinese::fmt::STEMS) and
//! [`chinese::fmt::BRANCHES`](crate::chinese::fmt::BRANCHES); the enums carry
//! the ordering so arithmetic stays on indices.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::chinese::fmt::{BRANCHES, STEMS};

/// One of the ten Heavenly Stems (天干), in traditional order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub enum Stem {
    /// 甲
    Jia,
    /// 乙
    Yi,
    /// 丙
    Bing,
    /// 丁
    Ding,
    /// 戊
    Wu,
    /// 己
    Ji,
    /// 庚
    Geng,
    /// 辛
    Xin,
    /// 壬
    Ren,
    /// 癸
    Gui,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    /// Position in `0..10`, 甲 being 0.
    pub fn index(self) -> usize {
        self as usize
    }
    /// The stem at `index`, taken cyclically.
    ///
    /// ```
    /// use almanako::Stem;
    ///
    /// assert_eq!(Stem::Jia, Stem::from_index(10));
    /// ```
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 10]
    }
    pub fn name(self) -> &'static str {
        STEMS[self.index()]
    }
    /// Whether the stem is yang (甲丙戊庚壬), i.e. the first of its pair.
    pub fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }
}

/// One of the twelve Earthly Branches (地支), in traditional order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub enum Branch {
    /// 子
    Zi,
    /// 丑
    Chou,
    /// 寅
    Yin,
    /// 卯
    Mao,
    /// 辰
    Chen,
    /// 巳
    Si,
    /// 午
    Wu,
    /// 未
    Wei,
    /// 申
    Shen,
    /// 酉
    You,
    /// 戌
    Xu,
    /// 亥
    Hai,
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    /// Position in `0..12`, 子 being 0.
    pub fn index(self) -> usize {
        self as usize
    }
    /// The branch at `index`, taken cyclically.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }
    pub fn name(self) -> &'static str {
        BRANCHES[self.index()]
    }
}

/// A stem-branch pair (干支), such as a year, month, day or double-hour
/// pillar. Serialized as its two-character label.
///
/// ```
/// use almanako::{Branch, Stem, StemBranch};
///
/// let pillar = StemBranch::from_sexagenary(41);
/// assert_eq!(StemBranch::new(Stem::Jia, Branch::Chen), pillar);
/// assert_eq!("甲辰", pillar.to_string());
/// assert_eq!(Ok(pillar), "甲辰".parse());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(into = "String")]
pub struct StemBranch {
    pub stem: Stem,
    pub branch: Branch,
}

impl StemBranch {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }
    /// Pair from a sexagenary ordinal, `1..=60` for 甲子 through 癸亥;
    /// other values are taken cyclically.
    pub fn from_sexagenary(num: u32) -> Self {
        let idx = ((num % 60 + 59) % 60) as usize;
        Self::new(Stem::from_index(idx), Branch::from_index(idx))
    }
    /// Sexagenary ordinal in `1..=60`, or `None` for a pair that never
    /// occurs (stem and branch of different parity, e.g. 甲丑).
    ///
    /// ```
    /// use almanako::{Branch, Stem, StemBranch};
    ///
    /// assert_eq!(Some(60), StemBranch::new(Stem::Gui, Branch::Hai).sexagenary());
    /// assert_eq!(None, StemBranch::new(Stem::Jia, Branch::Chou).sexagenary());
    /// ```
    pub fn sexagenary(&self) -> Option<u32> {
        let (s, b) = (self.stem.index() as i32, self.branch.index() as i32);
        if (s - b) % 2 != 0 {
            return None;
        }
        Some(((6 * s - 5 * b).rem_euclid(60) + 1) as u32)
    }
}

impl fmt::Display for StemBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem.name())?;
        f.write_str(self.branch.name())
    }
}

impl From<StemBranch> for String {
    fn from(pillar: StemBranch) -> String {
        pillar.to_string()
    }
}

/// Error returned when a label does not name a stem-branch pair.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("not a stem-branch label: {0:?}")]
pub struct ParseStemBranchError(pub String);

impl FromStr for StemBranch {
    type Err = ParseStemBranchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseStemBranchError(s.to_owned());
        let mut chars = s.chars().map(|c| c.to_string());
        let (Some(stem), Some(branch), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };
        let stem = STEMS.iter().position(|&n| n == stem).ok_or_else(err)?;
        let branch = BRANCHES.iter().position(|&n| n == branch).ok_or_else(err)?;
        Ok(Self::new(Stem::from_index(stem), Branch::from_index(branch)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chinese::fmt;

    #[test]
    fn cycle_matches_formatter() {
        for num in 1..=60 {
            let pillar = StemBranch::from_sexagenary(num);
            assert_eq!(fmt::sexagenary(num), pillar.to_string());
            assert_eq!(Some(num), pillar.sexagenary());
        }
    }

    #[test]
    fn cyclic_ordinals() {
        assert_eq!(StemBranch::from_sexagenary(60), StemBranch::from_sexagenary(0));
        assert_eq!(StemBranch::from_sexagenary(1), StemBranch::from_sexagenary(61));
        // u32::MAX = 60 * 71582788 + 15
        assert_eq!(StemBranch::from_sexagenary(15), StemBranch::from_sexagenary(u32::MAX));
    }

    #[test]
    fn indices() {
        for (i, stem) in Stem::ALL.into_iter().enumerate() {
            assert_eq!(i, stem.index());
            assert_eq!(stem, Stem::from_index(i));
        }
        for (i, branch) in Branch::ALL.into_iter().enumerate() {
            assert_eq!(i, branch.index());
            assert_eq!(branch, Branch::from_index(i + 12));
        }
    }

    #[test]
    fn yang_stems() {
        let yang: Vec<_> = Stem::ALL.into_iter().filter(|s| s.is_yang()).map(Stem::name).collect();
        assert_eq!(vec!["甲", "丙", "戊", "庚", "壬"], yang);
    }

    #[test]
    fn parse() {
        assert_eq!(
            Ok(StemBranch::new(Stem::Wu, Branch::Wu)),
            "戊午".parse::<StemBranch>()
        );
        assert!("甲".parse::<StemBranch>().is_err());
        assert!("甲子子".parse::<StemBranch>().is_err());
        assert!("子甲".parse::<StemBranch>().is_err());
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&StemBranch::from_sexagenary(1)).unwrap();
        assert_eq!("\"甲子\"", json);
    }
}
