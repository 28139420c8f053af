//! ISO-8601 printing of durations.
//!
//! Three flavours are supported:
//!
//! | method | example |
//! |---|---|
//! | [`Duration::print`] / `Display` | `P12Y4M3DT150H2M4,758S` |
//! | [`Duration::print_xml`] | `P12Y4M3DT150H2M4.758S` (weeks written as days) |
//! | [`Duration::print_alternative`] | `P0012-04-03T15:02:04,758` |

use std::fmt::{self, Write as _};

use crate::duration::Duration;
use crate::iso::{IsoFormatUnit, IsoSymbol};
use tempora_core::errors::{Error, Result};
use tempora_core::math::{safe_add, safe_mul};
use tempora_core::NANOS_PER_SECOND;

/// Amounts per ISO symbol, indexed by `IsoSymbol as usize`.
#[derive(Debug, Default, Clone, Copy)]
struct Fields([i64; 8]);

impl Fields {
    fn get(&self, symbol: IsoSymbol) -> i64 {
        self.0[symbol as usize]
    }

    fn set(&mut self, symbol: IsoSymbol, value: i64) {
        self.0[symbol as usize] = value;
    }

    fn has_time(&self) -> bool {
        [IsoSymbol::Hours, IsoSymbol::Minutes, IsoSymbol::Seconds, IsoSymbol::Nanos]
            .iter()
            .any(|s| self.get(*s) != 0)
    }
}

impl<U: IsoFormatUnit> Duration<U> {
    fn fields(&self) -> Result<Fields> {
        let mut fields = Fields::default();
        for item in self.items() {
            let (symbol, factor) = item.unit().iso_symbol()?;
            let amount = safe_add(fields.get(symbol), safe_mul(item.amount(), factor)?)?;
            fields.set(symbol, amount);
        }
        let nanos = fields.get(IsoSymbol::Nanos);
        if nanos >= NANOS_PER_SECOND {
            let seconds = safe_add(fields.get(IsoSymbol::Seconds), nanos / NANOS_PER_SECOND)?;
            fields.set(IsoSymbol::Seconds, seconds);
            fields.set(IsoSymbol::Nanos, nanos % NANOS_PER_SECOND);
        }
        Ok(fields)
    }

    /// The canonical ISO-8601 form with a comma as decimal separator.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidValue`] if an item has no ISO-8601 symbol.
    pub fn print(&self) -> Result<String> {
        let fields = self.fields()?;
        Ok(self.print_standard(&fields, ','))
    }

    /// The XML-schema flavour: dot as decimal separator, weeks as days.
    pub fn print_xml(&self) -> Result<String> {
        let mut fields = self.fields()?;
        let weeks = fields.get(IsoSymbol::Weeks);
        if weeks != 0 {
            let days = safe_add(fields.get(IsoSymbol::Days), safe_mul(weeks, 7)?)?;
            fields.set(IsoSymbol::Days, days);
            fields.set(IsoSymbol::Weeks, 0);
        }
        Ok(self.print_standard(&fields, '.'))
    }

    /// The alternative form `PYYYY-MM-DD[THH:MM:SS[,f]]`.
    ///
    /// A negative duration is written with the sign before `P`. The parser
    /// also accepts the sign after it (`P-0001-02-03`) with the same meaning.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidValue`] if the duration contains weeks or a field
    /// exceeds the limits of the form (years ≤ 9999, months ≤ 12, days ≤ 30,
    /// hours ≤ 24, minutes and seconds ≤ 59).
    pub fn print_alternative(&self) -> Result<String> {
        let fields = self.fields()?;
        if fields.get(IsoSymbol::Weeks) != 0 {
            return Err(Error::InvalidValue(
                "weeks cannot be written in the alternative form".into(),
            ));
        }
        let limits = [
            (IsoSymbol::Years, 9999),
            (IsoSymbol::Months, 12),
            (IsoSymbol::Days, 30),
            (IsoSymbol::Hours, 24),
            (IsoSymbol::Minutes, 59),
            (IsoSymbol::Seconds, 59),
        ];
        for (symbol, max) in limits {
            let value = fields.get(symbol);
            if value > max {
                return Err(Error::InvalidValue(format!(
                    "{value} exceeds {max} in the alternative form ({symbol:?})"
                )));
            }
        }
        let mut out = String::with_capacity(32);
        if self.is_negative() {
            out.push('-');
        }
        // writing into a String cannot fail
        let _ = write!(
            out,
            "P{:04}-{:02}-{:02}",
            fields.get(IsoSymbol::Years),
            fields.get(IsoSymbol::Months),
            fields.get(IsoSymbol::Days)
        );
        if fields.has_time() {
            let _ = write!(
                out,
                "T{:02}:{:02}:{:02}",
                fields.get(IsoSymbol::Hours),
                fields.get(IsoSymbol::Minutes),
                fields.get(IsoSymbol::Seconds)
            );
            push_fraction(&mut out, fields.get(IsoSymbol::Nanos), ',');
        }
        Ok(out)
    }

    fn print_standard(&self, fields: &Fields, decimal: char) -> String {
        if self.is_empty() {
            return "PT0S".to_owned();
        }
        let mut out = String::with_capacity(24);
        if self.is_negative() {
            out.push('-');
        }
        out.push('P');
        for symbol in [IsoSymbol::Years, IsoSymbol::Months, IsoSymbol::Weeks, IsoSymbol::Days] {
            push_field(&mut out, fields.get(symbol), symbol);
        }
        if fields.has_time() {
            out.push('T');
            push_field(&mut out, fields.get(IsoSymbol::Hours), IsoSymbol::Hours);
            push_field(&mut out, fields.get(IsoSymbol::Minutes), IsoSymbol::Minutes);
            let seconds = fields.get(IsoSymbol::Seconds);
            let nanos = fields.get(IsoSymbol::Nanos);
            if seconds != 0 || nanos != 0 {
                let _ = write!(out, "{seconds}");
                push_fraction(&mut out, nanos, decimal);
                out.push('S');
            }
        }
        out
    }
}

fn push_field(out: &mut String, amount: i64, symbol: IsoSymbol) {
    if amount != 0 {
        let _ = write!(out, "{amount}{}", symbol.letter());
    }
}

/// Append `decimal` and the nanoseconds without trailing zeros.
fn push_fraction(out: &mut String, nanos: i64, decimal: char) {
    if nanos == 0 {
        return;
    }
    let digits = format!("{nanos:09}");
    out.push(decimal);
    out.push_str(digits.trim_end_matches('0'));
}

impl<U: IsoFormatUnit> fmt::Display for Duration<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.print() {
            Ok(s) => f.write_str(&s),
            Err(_) => {
                // units without a symbol: list the items instead
                if self.is_negative() {
                    f.write_str("-")?;
                }
                f.write_str("[")?;
                for (i, item) in self.items().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_units::{CalendarUnit, ClockUnit, IsoUnit};

    #[test]
    fn prints_mixed_duration() {
        let d = Duration::of_positive()
            .years(12)
            .months(4)
            .days(3)
            .hours(150)
            .minutes(2)
            .seconds(4)
            .millis(758)
            .build()
            .unwrap();
        assert_eq!(d.print().unwrap(), "P12Y4M3DT150H2M4,758S");
        assert_eq!(d.print_xml().unwrap(), "P12Y4M3DT150H2M4.758S");
        assert_eq!(d.negate().to_string(), "-P12Y4M3DT150H2M4,758S");
    }

    #[test]
    fn empty_duration() {
        assert_eq!(Duration::<IsoUnit>::of_zero().print().unwrap(), "PT0S");
    }

    #[test]
    fn fraction_without_seconds() {
        let d = Duration::of(5, ClockUnit::Nanos).unwrap();
        assert_eq!(d.print().unwrap(), "PT0,000000005S");
    }

    #[test]
    fn nanos_carry_into_seconds() {
        let d = Duration::of(2_500_000_000, ClockUnit::Nanos).unwrap();
        assert_eq!(d.print().unwrap(), "PT2,5S");
    }

    #[test]
    fn xml_writes_weeks_as_days() {
        let d = Duration::of(3, CalendarUnit::WEEKS).unwrap();
        assert_eq!(d.print().unwrap(), "P3W");
        assert_eq!(d.print_xml().unwrap(), "P21D");
    }

    #[test]
    fn alternative_form() {
        let d = Duration::of_negative()
            .years(1)
            .months(2)
            .days(3)
            .hours(4)
            .seconds(5)
            .build()
            .unwrap();
        assert_eq!(d.print_alternative().unwrap(), "-P0001-02-03T04:00:05");
        let too_many_days = Duration::of(31, CalendarUnit::DAYS).unwrap();
        assert!(too_many_days.print_alternative().is_err());
    }

    #[test]
    fn custom_units_are_not_dropped() {
        let d = Duration::of(2, CalendarUnit::MONTHS.with_carry_over()).unwrap();
        assert!(matches!(d.print(), Err(Error::InvalidValue(_))));
        assert_eq!(d.to_string(), "[2 Month(s) [carry over]]");
    }
}
