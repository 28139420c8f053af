//! `IsoUnit`: the union of calendar and clock units used by timestamps and
//! by mixed durations.

use crate::calendar_unit::CalendarUnit;
use crate::clock_unit::ClockUnit;
use crate::unit::ChronoUnit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Either a calendar unit or a clock unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IsoUnit {
    /// A calendar unit.
    Calendar(CalendarUnit),
    /// A clock unit.
    Clock(ClockUnit),
}

impl IsoUnit {
    /// Years.
    pub const YEARS: IsoUnit = IsoUnit::Calendar(CalendarUnit::YEARS);
    /// Months.
    pub const MONTHS: IsoUnit = IsoUnit::Calendar(CalendarUnit::MONTHS);
    /// Weeks.
    pub const WEEKS: IsoUnit = IsoUnit::Calendar(CalendarUnit::WEEKS);
    /// Days.
    pub const DAYS: IsoUnit = IsoUnit::Calendar(CalendarUnit::DAYS);
    /// Hours.
    pub const HOURS: IsoUnit = IsoUnit::Clock(ClockUnit::Hours);
    /// Minutes.
    pub const MINUTES: IsoUnit = IsoUnit::Clock(ClockUnit::Minutes);
    /// Seconds.
    pub const SECONDS: IsoUnit = IsoUnit::Clock(ClockUnit::Seconds);
    /// Milliseconds.
    pub const MILLIS: IsoUnit = IsoUnit::Clock(ClockUnit::Millis);
    /// Microseconds.
    pub const MICROS: IsoUnit = IsoUnit::Clock(ClockUnit::Micros);
    /// Nanoseconds.
    pub const NANOS: IsoUnit = IsoUnit::Clock(ClockUnit::Nanos);

    /// The calendar unit, if this is one.
    pub fn as_calendar(&self) -> Option<CalendarUnit> {
        match self {
            IsoUnit::Calendar(u) => Some(*u),
            IsoUnit::Clock(_) => None,
        }
    }

    /// The clock unit, if this is one.
    pub fn as_clock(&self) -> Option<ClockUnit> {
        match self {
            IsoUnit::Clock(u) => Some(*u),
            IsoUnit::Calendar(_) => None,
        }
    }
}

impl From<CalendarUnit> for IsoUnit {
    fn from(u: CalendarUnit) -> Self {
        IsoUnit::Calendar(u)
    }
}

impl From<ClockUnit> for IsoUnit {
    fn from(u: ClockUnit) -> Self {
        IsoUnit::Clock(u)
    }
}

impl ChronoUnit for IsoUnit {
    fn length(&self) -> f64 {
        match self {
            IsoUnit::Calendar(u) => u.length(),
            IsoUnit::Clock(u) => u.length(),
        }
    }

    fn is_calendrical(&self) -> bool {
        matches!(self, IsoUnit::Calendar(_))
    }

    fn collapse(&self) -> Option<(Self, i64)> {
        match self {
            IsoUnit::Calendar(u) => u.collapse().map(|(t, f)| (IsoUnit::Calendar(t), f)),
            IsoUnit::Clock(u) => u.collapse().map(|(t, f)| (IsoUnit::Clock(t), f)),
        }
    }

    fn merge_into(&self) -> Option<(Self, i64)> {
        match self {
            IsoUnit::Calendar(u) => u.merge_into().map(|(t, f)| (IsoUnit::Calendar(t), f)),
            IsoUnit::Clock(u) => u.merge_into().map(|(t, f)| (IsoUnit::Clock(t), f)),
        }
    }
}

impl std::fmt::Display for IsoUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IsoUnit::Calendar(u) => write!(f, "{u}"),
            IsoUnit::Clock(u) => write!(f, "{u}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::by_length_descending;

    #[test]
    fn ordering_by_length() {
        let mut units = vec![
            IsoUnit::SECONDS,
            IsoUnit::YEARS,
            IsoUnit::NANOS,
            IsoUnit::DAYS,
            IsoUnit::HOURS,
            IsoUnit::MONTHS,
        ];
        units.sort_by(by_length_descending);
        assert_eq!(
            units,
            vec![
                IsoUnit::YEARS,
                IsoUnit::MONTHS,
                IsoUnit::DAYS,
                IsoUnit::HOURS,
                IsoUnit::SECONDS,
                IsoUnit::NANOS
            ]
        );
    }

    #[test]
    fn equal_lengths_are_ordered_by_policy() {
        let mut units = vec![
            IsoUnit::from(CalendarUnit::MONTHS.with_carry_over()),
            IsoUnit::MONTHS,
        ];
        units.sort_by(by_length_descending);
        assert_eq!(units[0], IsoUnit::MONTHS);
    }
}
