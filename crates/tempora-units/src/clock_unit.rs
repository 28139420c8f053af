//! `ClockUnit`: units of wall-clock time.

use crate::unit::ChronoUnit;
use tempora_core::errors::Result;
use tempora_core::math::safe_mul;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A clock unit, from hours down to nanoseconds.
///
/// Variants are declared from the coarsest to the finest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockUnit {
    /// Hours (3600 seconds).
    Hours,
    /// Minutes (60 seconds).
    Minutes,
    /// Seconds.
    Seconds,
    /// Milliseconds.
    Millis,
    /// Microseconds.
    Micros,
    /// Nanoseconds.
    Nanos,
}

impl ClockUnit {
    /// All clock units from the coarsest to the finest.
    pub const ALL: [ClockUnit; 6] = [
        ClockUnit::Hours,
        ClockUnit::Minutes,
        ClockUnit::Seconds,
        ClockUnit::Millis,
        ClockUnit::Micros,
        ClockUnit::Nanos,
    ];

    /// Exact length of one unit in nanoseconds.
    pub fn nanos(self) -> i64 {
        match self {
            ClockUnit::Hours => 3_600_000_000_000,
            ClockUnit::Minutes => 60_000_000_000,
            ClockUnit::Seconds => 1_000_000_000,
            ClockUnit::Millis => 1_000_000,
            ClockUnit::Micros => 1_000,
            ClockUnit::Nanos => 1,
        }
    }

    /// Convert `amount` given in `source` units into this unit.
    ///
    /// Conversions to a coarser unit truncate towards zero; conversions to a
    /// finer unit fail on overflow.
    pub fn convert(self, amount: i64, source: ClockUnit) -> Result<i64> {
        if source <= self {
            safe_mul(amount, source.nanos() / self.nanos())
        } else {
            Ok(amount / (self.nanos() / source.nanos()))
        }
    }

    /// Number of decimal digits this unit adds to a second (`3` for millis).
    pub fn fraction_digits(self) -> u32 {
        match self {
            ClockUnit::Hours | ClockUnit::Minutes | ClockUnit::Seconds => 0,
            ClockUnit::Millis => 3,
            ClockUnit::Micros => 6,
            ClockUnit::Nanos => 9,
        }
    }
}

impl ChronoUnit for ClockUnit {
    fn length(&self) -> f64 {
        self.nanos() as f64 / 1e9
    }

    fn is_calendrical(&self) -> bool {
        false
    }

    fn collapse(&self) -> Option<(Self, i64)> {
        match self {
            ClockUnit::Millis | ClockUnit::Micros => Some((ClockUnit::Nanos, self.nanos())),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClockUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockUnit::Hours => write!(f, "Hour(s)"),
            ClockUnit::Minutes => write!(f, "Minute(s)"),
            ClockUnit::Seconds => write!(f, "Second(s)"),
            ClockUnit::Millis => write!(f, "Millisecond(s)"),
            ClockUnit::Micros => write!(f, "Microsecond(s)"),
            ClockUnit::Nanos => write!(f, "Nanosecond(s)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempora_core::Error;

    #[test]
    fn conversions() {
        assert_eq!(ClockUnit::Seconds.convert(2, ClockUnit::Hours).unwrap(), 7200);
        assert_eq!(ClockUnit::Seconds.convert(1500, ClockUnit::Millis).unwrap(), 1);
        assert_eq!(ClockUnit::Seconds.convert(-1500, ClockUnit::Millis).unwrap(), -1);
        assert!(matches!(
            ClockUnit::Nanos.convert(i64::MAX / 10, ClockUnit::Hours),
            Err(Error::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn sub_second_units_collapse_into_nanos() {
        assert_eq!(ClockUnit::Millis.collapse(), Some((ClockUnit::Nanos, 1_000_000)));
        assert_eq!(ClockUnit::Micros.collapse(), Some((ClockUnit::Nanos, 1_000)));
        assert_eq!(ClockUnit::Nanos.collapse(), None);
        assert_eq!(ClockUnit::Seconds.collapse(), None);
    }

    #[test]
    fn lengths() {
        assert_relative_eq!(ClockUnit::Hours.length(), 3600.0);
        assert_relative_eq!(ClockUnit::Micros.length(), 1e-6);
    }
}
