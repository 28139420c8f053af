//! Mapping between duration units and the ISO-8601 unit symbols.

use tempora_core::errors::{Error, Result};
use tempora_units::{CalendarUnit, CalendarUnitKind, ChronoUnit, ClockUnit, IsoUnit};

/// A unit symbol of the ISO-8601 duration format.
///
/// Seconds and nanoseconds share the `S` symbol; nanoseconds appear as the
/// fraction of the seconds field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IsoSymbol {
    /// `Y`
    Years,
    /// `M` in the date part
    Months,
    /// `W`
    Weeks,
    /// `D`
    Days,
    /// `H`
    Hours,
    /// `M` in the time part
    Minutes,
    /// `S`
    Seconds,
    /// fraction of `S`
    Nanos,
}

impl IsoSymbol {
    /// The character printed after the amount.
    pub fn letter(self) -> char {
        match self {
            IsoSymbol::Years => 'Y',
            IsoSymbol::Months | IsoSymbol::Minutes => 'M',
            IsoSymbol::Weeks => 'W',
            IsoSymbol::Days => 'D',
            IsoSymbol::Hours => 'H',
            IsoSymbol::Seconds | IsoSymbol::Nanos => 'S',
        }
    }

    /// `true` for the symbols after the `T` separator.
    pub fn is_time(self) -> bool {
        self >= IsoSymbol::Hours
    }
}

/// A unit which can be written in the ISO-8601 duration format.
pub trait IsoFormatUnit: ChronoUnit {
    /// The symbol of this unit and the factor converting one unit into the
    /// symbol's unit (`1 decade = 10 years`).
    ///
    /// Fails with [`Error::InvalidValue`] for units without a standard
    /// representation (custom overflow policies, week-based years).
    fn iso_symbol(&self) -> Result<(IsoSymbol, i64)>;

    /// The standard unit for a parsed symbol, if this unit family has one.
    fn from_iso_symbol(symbol: IsoSymbol) -> Option<Self>;
}

impl IsoFormatUnit for CalendarUnit {
    fn iso_symbol(&self) -> Result<(IsoSymbol, i64)> {
        if !self.is_default_policy() {
            return Err(Error::InvalidValue(format!(
                "{self} has no ISO-8601 representation"
            )));
        }
        match self.kind() {
            CalendarUnitKind::Millennia => Ok((IsoSymbol::Years, 1000)),
            CalendarUnitKind::Centuries => Ok((IsoSymbol::Years, 100)),
            CalendarUnitKind::Decades => Ok((IsoSymbol::Years, 10)),
            CalendarUnitKind::Years => Ok((IsoSymbol::Years, 1)),
            CalendarUnitKind::Quarters => Ok((IsoSymbol::Months, 3)),
            CalendarUnitKind::Months => Ok((IsoSymbol::Months, 1)),
            CalendarUnitKind::Weeks => Ok((IsoSymbol::Weeks, 1)),
            CalendarUnitKind::Days => Ok((IsoSymbol::Days, 1)),
            CalendarUnitKind::WeekBasedYears => Err(Error::InvalidValue(format!(
                "{self} has no ISO-8601 representation"
            ))),
        }
    }

    fn from_iso_symbol(symbol: IsoSymbol) -> Option<Self> {
        match symbol {
            IsoSymbol::Years => Some(CalendarUnit::YEARS),
            IsoSymbol::Months => Some(CalendarUnit::MONTHS),
            IsoSymbol::Weeks => Some(CalendarUnit::WEEKS),
            IsoSymbol::Days => Some(CalendarUnit::DAYS),
            _ => None,
        }
    }
}

impl IsoFormatUnit for ClockUnit {
    fn iso_symbol(&self) -> Result<(IsoSymbol, i64)> {
        Ok(match self {
            ClockUnit::Hours => (IsoSymbol::Hours, 1),
            ClockUnit::Minutes => (IsoSymbol::Minutes, 1),
            ClockUnit::Seconds => (IsoSymbol::Seconds, 1),
            ClockUnit::Millis => (IsoSymbol::Nanos, 1_000_000),
            ClockUnit::Micros => (IsoSymbol::Nanos, 1_000),
            ClockUnit::Nanos => (IsoSymbol::Nanos, 1),
        })
    }

    fn from_iso_symbol(symbol: IsoSymbol) -> Option<Self> {
        match symbol {
            IsoSymbol::Hours => Some(ClockUnit::Hours),
            IsoSymbol::Minutes => Some(ClockUnit::Minutes),
            IsoSymbol::Seconds => Some(ClockUnit::Seconds),
            IsoSymbol::Nanos => Some(ClockUnit::Nanos),
            _ => None,
        }
    }
}

impl IsoFormatUnit for IsoUnit {
    fn iso_symbol(&self) -> Result<(IsoSymbol, i64)> {
        match self {
            IsoUnit::Calendar(u) => u.iso_symbol(),
            IsoUnit::Clock(u) => u.iso_symbol(),
        }
    }

    fn from_iso_symbol(symbol: IsoSymbol) -> Option<Self> {
        CalendarUnit::from_iso_symbol(symbol)
            .map(IsoUnit::Calendar)
            .or_else(|| ClockUnit::from_iso_symbol(symbol).map(IsoUnit::Clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_units_print_as_years_and_months() {
        assert_eq!(CalendarUnit::CENTURIES.iso_symbol().unwrap(), (IsoSymbol::Years, 100));
        assert_eq!(CalendarUnit::QUARTERS.iso_symbol().unwrap(), (IsoSymbol::Months, 3));
    }

    #[test]
    fn custom_units_are_rejected() {
        assert!(CalendarUnit::MONTHS.at_end_of_month().iso_symbol().is_err());
        assert!(CalendarUnit::WEEK_BASED_YEARS.iso_symbol().is_err());
    }

    #[test]
    fn symbols_resolve_per_family() {
        assert_eq!(CalendarUnit::from_iso_symbol(IsoSymbol::Hours), None);
        assert_eq!(ClockUnit::from_iso_symbol(IsoSymbol::Days), None);
        assert_eq!(IsoUnit::from_iso_symbol(IsoSymbol::Minutes), Some(IsoUnit::MINUTES));
        assert_eq!(IsoUnit::from_iso_symbol(IsoSymbol::Months), Some(IsoUnit::MONTHS));
    }
}
