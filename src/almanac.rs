use crate::config::{AlmanacConfig, WeekStart};
use crate::error::Result;
use crate::grid::{self, MonthGrid, YearGrid};
use crate::instant::CivilInstant;
use crate::oracle::{ChineseOracle, LunisolarOracle};
use crate::snapshot::{self, LunarSnapshot};

/// An oracle bundled with display settings.
///
/// ```
/// use almanako::{Almanac, CivilInstant};
///
/// let almanac = Almanac::new();
/// let snap = almanac.snapshot(&CivilInstant::new(2024, 9, 17, 20, 0).unwrap()).unwrap();
/// assert_eq!(vec!["中秋节"], snap.festivals.lunar);
/// assert_eq!(12, almanac.year_grid(2024).unwrap().months.len());
/// ```
#[derive(Debug, Clone)]
pub struct Almanac<O = ChineseOracle> {
    oracle: O,
    week_start: WeekStart,
}

impl Default for Almanac {
    fn default() -> Self {
        Self::new()
    }
}

impl Almanac {
    /// The Chinese calendar in Beijing time, Sunday-first grids.
    pub fn new() -> Self {
        Self::with_oracle(ChineseOracle::new())
    }

    /// Validates `config` and builds the matching Chinese almanac.
    pub fn from_config(config: &AlmanacConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_oracle(ChineseOracle::from_config(config)).week_start(config.week_start))
    }
}

impl<O: LunisolarOracle> Almanac<O> {
    pub fn with_oracle(oracle: O) -> Self {
        Self {
            oracle,
            week_start: WeekStart::default(),
        }
    }
    pub fn week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn snapshot(&self, instant: &CivilInstant) -> Result<LunarSnapshot> {
        snapshot::snapshot(&self.oracle, instant)
    }
    pub fn month_grid(&self, year: i32, month: u32) -> Result<MonthGrid> {
        grid::build_month_grid(&self.oracle, year, month, self.week_start)
    }
    pub fn year_grid(&self, year: i32) -> Result<YearGrid> {
        grid::build_year_grid(&self.oracle, year, self.week_start)
    }
}
