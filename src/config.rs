//! Almanac settings, read from TOML.
//!
//! ```toml
//! utc_offset_minutes = 480
//! week_start = "monday"
//! first_year = 1900
//! last_year = 2100
//! ```
//!
//! Every key is optional; missing keys take the defaults of
//! [`AlmanacConfig::default`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chinese::{self, ephemeris};
use crate::error::{AlmanacError, Result};
use crate::oracle::DEFAULT_YEARS;

/// Largest accepted UTC offset, in minutes either side of UTC.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// First column of a month grid.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Weekday number of the first column, Sunday being 0.
    pub fn weekday(self) -> u32 {
        match self {
            WeekStart::Sunday => 0,
            WeekStart::Monday => 1,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlmanacConfig {
    /// Zone in which lunar months begin, minutes east of UTC.
    pub utc_offset_minutes: i32,
    pub week_start: WeekStart,
    /// First Gregorian year the oracle resolves.
    pub first_year: i32,
    /// Last Gregorian year the oracle resolves.
    pub last_year: i32,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: chinese::CHINA_STANDARD_OFFSET,
            week_start: WeekStart::Sunday,
            first_year: *DEFAULT_YEARS.start(),
            last_year: *DEFAULT_YEARS.end(),
        }
    }
}

impl AlmanacConfig {
    /// Parses and validates a TOML document.
    ///
    /// ```
    /// use almanako::{AlmanacConfig, WeekStart};
    ///
    /// let config = AlmanacConfig::from_toml_str("week_start = \"monday\"").unwrap();
    /// assert_eq!(WeekStart::Monday, config.week_start);
    /// assert_eq!(480, config.utc_offset_minutes);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the TOML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ?config, "loaded almanac config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(AlmanacError::Config(format!(
                "utc_offset_minutes {} exceeds ±{MAX_UTC_OFFSET_MINUTES}",
                self.utc_offset_minutes
            )));
        }
        if self.first_year > self.last_year {
            return Err(AlmanacError::Config(format!(
                "first_year {} is after last_year {}",
                self.first_year, self.last_year
            )));
        }
        // neighbouring anni are consulted near year boundaries
        let usable = ephemeris::SUPPORTED.start() + 1..=ephemeris::SUPPORTED.end() - 1;
        for year in [self.first_year, self.last_year] {
            if !usable.contains(&year) {
                return Err(AlmanacError::Config(format!(
                    "year {year} is outside {}..={}",
                    usable.start(),
                    usable.end()
                )));
            }
        }
        Ok(())
    }
}
