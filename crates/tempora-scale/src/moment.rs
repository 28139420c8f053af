//! `Moment`: an instant on the time line.

use std::fmt;

use tempora_core::errors::{Error, Result};
use tempora_core::gregorian;
use tempora_core::math::{floor_div, floor_mod};
use tempora_core::{NANOS_PER_SECOND, SECONDS_PER_DAY};

use crate::leap_seconds::LeapSeconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An instant: civil POSIX seconds and a nanosecond fraction.
///
/// A moment inside an inserted leap second has the POSIX seconds of the
/// preceding civil second (`23:59:59`) and the leap flag set, so moments
/// are ordered correctly across an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Moment {
    posix: i64,
    leap: bool,
    nano: i32,
}

impl Moment {
    /// The epoch 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Moment = Moment {
        posix: 0,
        leap: false,
        nano: 0,
    };

    /// The instant `seconds` civil seconds after the epoch.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidValue`] if `nano` is outside `0..1_000_000_000`.
    pub fn of_posix(seconds: i64, nano: i32) -> Result<Self> {
        check_nano(nano)?;
        Ok(Self {
            posix: seconds,
            leap: false,
            nano,
        })
    }

    /// The instant `utc` continuous seconds after the epoch.
    ///
    /// Unlike [`Moment::of_posix`] this can denote an inserted leap second.
    pub fn of_utc(utc: i64, nano: i32, table: &LeapSeconds) -> Result<Self> {
        check_nano(nano)?;
        Ok(Self {
            posix: table.strip(utc),
            leap: table.is_leap_second(utc),
            nano,
        })
    }

    /// Civil seconds since the epoch.
    pub fn posix_seconds(&self) -> i64 {
        self.posix
    }

    /// Continuous seconds since the epoch according to `table`.
    pub fn utc_seconds(&self, table: &LeapSeconds) -> i64 {
        table.enhance(self.posix) + i64::from(self.leap)
    }

    /// The nanosecond fraction.
    pub fn nanosecond(&self) -> i32 {
        self.nano
    }

    /// `true` inside an inserted leap second.
    pub fn is_leap_second(&self) -> bool {
        self.leap
    }

    /// Epoch day and second of day in the civil scale.
    pub fn epoch_day_and_second(&self) -> (i64, i64) {
        (
            floor_div(self.posix, SECONDS_PER_DAY),
            floor_mod(self.posix, SECONDS_PER_DAY),
        )
    }
}

fn check_nano(nano: i32) -> Result<()> {
    if (0..NANOS_PER_SECOND as i32).contains(&nano) {
        Ok(())
    } else {
        Err(Error::InvalidValue(format!(
            "nanosecond {nano} outside 0..1000000000"
        )))
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (day, second) = self.epoch_day_and_second();
        let (year, month, dom) = gregorian::date_of_epoch_day(day);
        let (h, m, mut s) = (second / 3600, second / 60 % 60, second % 60);
        if self.leap {
            s += 1;
        }
        write!(f, "{year:04}-{month:02}-{dom:02}T{h:02}:{m:02}:{s:02}")?;
        if self.nano != 0 {
            let digits = format!("{:09}", self.nano);
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        f.write_str("Z")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LeapSeconds {
        LeapSeconds::from_dates(&[(2016, 12, 31)]).unwrap()
    }

    #[test]
    fn leap_second_is_expressible() {
        let table = table();
        let new_year = gregorian::epoch_day(2017, 1, 1) * SECONDS_PER_DAY;
        let leap = Moment::of_utc(new_year, 500_000_000, &table).unwrap();
        assert!(leap.is_leap_second());
        assert_eq!(leap.posix_seconds(), new_year - 1);
        assert_eq!(leap.utc_seconds(&table), new_year);
        assert_eq!(leap.to_string(), "2016-12-31T23:59:60.5Z");

        let before = Moment::of_posix(new_year - 1, 999_999_999).unwrap();
        let after = Moment::of_posix(new_year, 0).unwrap();
        assert!(before < leap);
        assert!(leap < after);
        assert_eq!(after.utc_seconds(&table), new_year + 1);
    }

    #[test]
    fn invalid_nanos() {
        assert!(Moment::of_posix(0, -1).is_err());
        assert!(Moment::of_posix(0, 1_000_000_000).is_err());
        assert_eq!(Moment::UNIX_EPOCH.to_string(), "1970-01-01T00:00:00Z");
    }
}
