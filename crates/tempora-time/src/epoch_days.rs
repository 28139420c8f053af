//! `EpochDays`: day-count reference systems.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tempora_core::errors::Result;
use tempora_core::math::{safe_add, safe_sub};

/// A count of days relative to a fixed epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EpochDays {
    /// Days since 1970-01-01.
    Unix,
    /// Days since 1972-01-01, the start of the leap-second era.
    Utc,
    /// Modified julian date: days since 1858-11-17.
    ModifiedJulianDate,
    /// Julian day number at noon of the day.
    JulianDayNumber,
    /// Rata die: 0001-01-01 is day 1.
    RataDie,
}

impl EpochDays {
    /// Value of the unix epoch in this system.
    fn unix_offset(self) -> i64 {
        match self {
            EpochDays::Unix => 0,
            EpochDays::Utc => -730,
            EpochDays::ModifiedJulianDate => 40_587,
            EpochDays::JulianDayNumber => 2_440_588,
            EpochDays::RataDie => 719_163,
        }
    }

    /// Convert a day count of this system into unix days.
    pub fn to_unix(self, value: i64) -> Result<i64> {
        safe_sub(value, self.unix_offset())
    }

    /// Convert unix days into a day count of this system.
    pub fn from_unix(self, unix: i64) -> Result<i64> {
        safe_add(unix, self.unix_offset())
    }

    /// Convert a day count of `source` into this system.
    pub fn transform(self, value: i64, source: EpochDays) -> Result<i64> {
        self.from_unix(source.to_unix(value)?)
    }
}
