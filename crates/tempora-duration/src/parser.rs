//! ISO-8601 duration parser.
//!
//! Accepted forms:
//!
//! ```text
//! [-]P[nY][nM][nW][nD][T[nH][nM][n[,.]fS]]
//! [-]P[±]YYYY-MM-DD[THH[:MM[:SS[,.]f]]]]
//! [-]PYYYYMMDD[THHMMSS[,.]f]]
//! ```
//!
//! Every rejection carries the byte offset of the first offending symbol.

use crate::duration::Duration;
use crate::iso::{IsoFormatUnit, IsoSymbol};
use std::str::FromStr;
use tempora_core::errors::{Error, Result};
use tempora_core::math::safe_negate;
use tempora_units::{CalendarUnit, ClockUnit, IsoUnit};

const MAX_FRACTION_DIGITS: usize = 9;

impl<U: IsoFormatUnit> Duration<U> {
    /// Parse the ISO-8601 representation of a duration.
    ///
    /// ```
    /// use tempora_duration::Duration;
    /// use tempora_units::IsoUnit;
    ///
    /// let d = Duration::<IsoUnit>::parse("-P1Y2DT3,5S").unwrap();
    /// assert!(d.is_negative());
    /// assert_eq!(d.get_partial_amount(IsoUnit::NANOS), 500_000_000);
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] with the offset of the first offending character.
    pub fn parse(text: &str) -> Result<Self> {
        Parser::new(text).parse()
    }
}

macro_rules! impl_from_str {
    ($($unit:ty),*) => {
        $(
            impl FromStr for Duration<$unit> {
                type Err = Error;
                fn from_str(s: &str) -> Result<Self> {
                    Duration::parse(s)
                }
            }
        )*
    };
}

impl_from_str!(CalendarUnit, ClockUnit, IsoUnit);

struct Parser<'a, U> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    entries: Vec<(U, i64)>,
}

impl<'a, U: IsoFormatUnit> Parser<'a, U> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            entries: Vec::with_capacity(8),
        }
    }

    fn error(&self, offset: usize, reason: impl Into<String>) -> Error {
        Error::parse(self.text, offset, reason)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn parse(mut self) -> Result<Duration<U>> {
        let mut negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'P') => self.pos += 1,
            Some(b'+') | Some(b'-') => {
                return Err(self.error(self.pos, "unexpected sign before the 'P' designator"))
            }
            Some(_) => return Err(self.error(self.pos, "duration must start with 'P'")),
            None => return Err(self.error(self.pos, "empty duration text")),
        }
        match self.peek() {
            None => return Err(self.error(self.pos, "duration has no fields")),
            Some(sign @ (b'+' | b'-')) => {
                // P±YYYY-MM-DD carries its own sign
                if !self.is_extended_alternative(self.pos + 1) {
                    return Err(self.error(self.pos, "sign must precede the 'P' designator"));
                }
                if negative {
                    return Err(self.error(self.pos, "duration is signed twice"));
                }
                negative = sign == b'-';
                self.pos += 1;
            }
            _ => {}
        }
        if self.is_alternative() {
            self.parse_alternative()?;
        } else {
            self.parse_standard()?;
        }
        if !self.at_end() {
            return Err(self.error(self.pos, "unexpected trailing characters"));
        }
        let mut signed = Vec::with_capacity(self.entries.len());
        for (unit, amount) in self.entries {
            signed.push((unit, if negative { safe_negate(amount)? } else { amount }));
        }
        Duration::from_signed(signed)
    }

    fn digit_run(&self, from: usize) -> usize {
        self.bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    }

    fn is_extended_alternative(&self, from: usize) -> bool {
        self.digit_run(from) == 4 && self.bytes.get(from + 4) == Some(&b'-')
    }

    fn is_alternative(&self) -> bool {
        let digits = self.digit_run(self.pos);
        let next = self.bytes.get(self.pos + digits).copied();
        (digits == 4 && next == Some(b'-')) || (digits == 8 && matches!(next, None | Some(b'T')))
    }

    // ── Standard form ─────────────────────────────────────────────────────

    fn parse_standard(&mut self) -> Result<()> {
        let mut last: Option<IsoSymbol> = None;
        while !self.at_end() && self.peek() != Some(b'T') {
            let amount = self.number()?;
            if matches!(self.peek(), Some(b',') | Some(b'.')) {
                return Err(self.error(self.pos, "a fraction is only allowed for seconds"));
            }
            let symbol = match self.peek() {
                Some(b'Y') => IsoSymbol::Years,
                Some(b'M') => IsoSymbol::Months,
                Some(b'W') => IsoSymbol::Weeks,
                Some(b'D') => IsoSymbol::Days,
                Some(b'H') | Some(b'S') => {
                    return Err(self.error(self.pos, "time unit before the 'T' separator"))
                }
                Some(_) => return Err(self.error(self.pos, "unknown date unit symbol")),
                None => return Err(self.error(self.pos, "unit symbol expected")),
            };
            self.push_symbol(symbol, amount, &mut last)?;
        }
        if self.peek() == Some(b'T') {
            let separator = self.pos;
            self.pos += 1;
            if self.at_end() {
                return Err(self.error(self.pos, "time fields expected after 'T'"));
            }
            if U::from_iso_symbol(IsoSymbol::Hours).is_none() {
                return Err(self.error(separator, "clock units are not supported here"));
            }
            last = None;
            while !self.at_end() {
                let amount = self.number()?;
                let fraction = self.fraction()?;
                let symbol_pos = self.pos;
                let symbol = match self.peek() {
                    Some(b'H') => IsoSymbol::Hours,
                    Some(b'M') => IsoSymbol::Minutes,
                    Some(b'S') => IsoSymbol::Seconds,
                    Some(b'Y') | Some(b'W') | Some(b'D') => {
                        return Err(self.error(self.pos, "date unit after the 'T' separator"))
                    }
                    Some(_) => return Err(self.error(self.pos, "unknown time unit symbol")),
                    None => return Err(self.error(self.pos, "unit symbol expected")),
                };
                if fraction.is_some() && symbol != IsoSymbol::Seconds {
                    return Err(self.error(symbol_pos, "a fraction is only allowed for seconds"));
                }
                self.push_symbol(symbol, amount, &mut last)?;
                if let Some(nanos) = fraction {
                    self.push_unit(IsoSymbol::Nanos, nanos, symbol_pos)?;
                }
            }
        }
        Ok(())
    }

    /// Consume the symbol at `self.pos` after checking the unit order.
    fn push_symbol(
        &mut self,
        symbol: IsoSymbol,
        amount: i64,
        last: &mut Option<IsoSymbol>,
    ) -> Result<()> {
        let symbol_pos = self.pos;
        if last.is_some_and(|l| l >= symbol) {
            return Err(self.error(symbol_pos, "wrong order of unit symbols"));
        }
        *last = Some(symbol);
        self.pos += 1;
        self.push_unit(symbol, amount, symbol_pos)
    }

    fn push_unit(&mut self, symbol: IsoSymbol, amount: i64, offset: usize) -> Result<()> {
        let unit = U::from_iso_symbol(symbol)
            .ok_or_else(|| self.error(offset, format!("unit {symbol:?} is not supported here")))?;
        self.entries.push((unit, amount));
        Ok(())
    }

    /// Read an unsigned decimal number.
    fn number(&mut self) -> Result<i64> {
        let start = self.pos;
        match self.peek() {
            Some(b'+') | Some(b'-') => {
                return Err(self.error(start, "a sign is not allowed before a field"))
            }
            Some(b) if b.is_ascii_digit() => {}
            Some(_) => return Err(self.error(start, "digit expected")),
            None => return Err(self.error(start, "digit expected")),
        }
        let len = self.digit_run(start);
        let digits = &self.text[start..start + len];
        let value = digits
            .parse::<i64>()
            .map_err(|_| self.error(start, "amount exceeds the 64-bit range"))?;
        self.pos += len;
        Ok(value)
    }

    /// Read an optional `[,.]f` fraction and return it in nanoseconds.
    fn fraction(&mut self) -> Result<Option<i64>> {
        if !matches!(self.peek(), Some(b',') | Some(b'.')) {
            return Ok(None);
        }
        self.pos += 1;
        let start = self.pos;
        let len = self.digit_run(start);
        if len == 0 {
            return Err(self.error(start, "fraction digits expected"));
        }
        if len > MAX_FRACTION_DIGITS {
            return Err(self.error(
                start + MAX_FRACTION_DIGITS,
                "at most nine fraction digits are allowed",
            ));
        }
        let mut nanos = 0i64;
        for i in 0..MAX_FRACTION_DIGITS {
            let digit = if i < len {
                i64::from(self.bytes[start + i] - b'0')
            } else {
                0
            };
            nanos = nanos * 10 + digit;
        }
        self.pos += len;
        Ok(Some(nanos))
    }

    // ── Alternative form ──────────────────────────────────────────────────

    fn parse_alternative(&mut self) -> Result<()> {
        let extended = self.digit_run(self.pos) == 4;
        self.fixed(4, IsoSymbol::Years, i64::MAX)?;
        if extended {
            self.expect(b'-')?;
        }
        self.fixed(2, IsoSymbol::Months, 12)?;
        if extended {
            self.expect(b'-')?;
        }
        self.fixed(2, IsoSymbol::Days, 30)?;
        if self.peek() != Some(b'T') {
            return Ok(());
        }
        let separator = self.pos;
        self.pos += 1;
        if U::from_iso_symbol(IsoSymbol::Hours).is_none() {
            return Err(self.error(separator, "clock units are not supported here"));
        }
        self.fixed(2, IsoSymbol::Hours, 24)?;
        if extended {
            if self.peek() != Some(b':') {
                return Ok(());
            }
            self.pos += 1;
            self.fixed(2, IsoSymbol::Minutes, 59)?;
            if self.peek() != Some(b':') {
                return Ok(());
            }
            self.pos += 1;
        } else {
            self.fixed(2, IsoSymbol::Minutes, 59)?;
        }
        self.fixed(2, IsoSymbol::Seconds, 59)?;
        let fraction_pos = self.pos;
        if let Some(nanos) = self.fraction()? {
            self.push_unit(IsoSymbol::Nanos, nanos, fraction_pos)?;
        }
        Ok(())
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(self.pos, format!("'{}' expected", byte as char)))
        }
    }

    /// Read exactly `width` digits for `symbol`, bounded by `max`.
    fn fixed(&mut self, width: usize, symbol: IsoSymbol, max: i64) -> Result<()> {
        let start = self.pos;
        let len = self.digit_run(start).min(width);
        if len < width {
            return Err(self.error(start + len, format!("{width} digits expected")));
        }
        let mut value = 0i64;
        for b in &self.bytes[start..start + width] {
            value = value * 10 + i64::from(b - b'0');
        }
        if value > max {
            return Err(self.error(start, format!("{symbol:?} must not exceed {max}")));
        }
        self.pos += width;
        self.push_unit(symbol, value, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_of(text: &str) -> usize {
        Duration::<IsoUnit>::parse(text)
            .unwrap_err()
            .error_offset()
            .unwrap()
    }

    #[test]
    fn standard_form() {
        let d = Duration::<IsoUnit>::parse("P12Y4M3DT150H2M4,758S").unwrap();
        assert_eq!(d.get_partial_amount(IsoUnit::YEARS), 12);
        assert_eq!(d.get_partial_amount(IsoUnit::HOURS), 150);
        assert_eq!(d.get_partial_amount(IsoUnit::NANOS), 758_000_000);
        assert_eq!(d.print().unwrap(), "P12Y4M3DT150H2M4,758S");
    }

    #[test]
    fn dot_fraction_is_accepted() {
        let d = Duration::<ClockUnit>::parse("PT0.000000001S").unwrap();
        assert_eq!(d.get_partial_amount(ClockUnit::Nanos), 1);
    }

    #[test]
    fn alternative_forms() {
        let ext = Duration::<IsoUnit>::parse("P0001-02-03T04:05:06,7").unwrap();
        let basic = Duration::<IsoUnit>::parse("P00010203T040506,7").unwrap();
        assert_eq!(ext, basic);
        assert_eq!(ext.get_partial_amount(IsoUnit::DAYS), 3);
        assert_eq!(ext.get_partial_amount(IsoUnit::NANOS), 700_000_000);
        let date_only = Duration::<CalendarUnit>::parse("P0002-00-10").unwrap();
        assert_eq!(date_only.get_partial_amount(CalendarUnit::YEARS), 2);
        assert!(!date_only.contains(CalendarUnit::MONTHS));
    }

    #[test]
    fn error_offsets() {
        assert_eq!(offset_of(""), 0);
        assert_eq!(offset_of("1Y"), 0);
        assert_eq!(offset_of("P"), 1);
        assert_eq!(offset_of("P-1Y"), 1);
        assert_eq!(offset_of("P1Y-2M"), 3);
        assert_eq!(offset_of("P1M2Y"), 4);
        assert_eq!(offset_of("PT1S2M"), 5);
        assert_eq!(offset_of("P1,5Y"), 2);
        assert_eq!(offset_of("PT1,5M"), 5);
        assert_eq!(offset_of("PT"), 2);
        assert_eq!(offset_of("PT1,1234567891S"), 13);
        assert_eq!(offset_of("P1X"), 2);
        assert_eq!(offset_of("P99999999999999999999D"), 1);
        assert_eq!(offset_of("P0001-13-01"), 6);
        assert_eq!(offset_of("P0001-01-31"), 9);
        assert_eq!(offset_of("P0001-01-01T25"), 12);
        assert_eq!(offset_of("P1DX"), 3);
    }

    #[test]
    fn wrong_order_is_reported() {
        let err = Duration::<IsoUnit>::parse("P1D2W").unwrap_err();
        match err {
            Error::Parse { offset, reason, .. } => {
                assert_eq!(offset, 4);
                assert!(reason.contains("wrong order"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unit_family_is_enforced() {
        let err = Duration::<CalendarUnit>::parse("P1DT2H").unwrap_err();
        assert_eq!(err.error_offset(), Some(3));
        let err = Duration::<ClockUnit>::parse("P1D").unwrap_err();
        assert_eq!(err.error_offset(), Some(2));
    }

    #[test]
    fn from_str() {
        let d: Duration<IsoUnit> = "-PT5M".parse().unwrap();
        assert_eq!(d.signed_amount(IsoUnit::MINUTES), -5);
    }
}
