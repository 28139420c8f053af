//! Byte cursor shared by the ISO-8601 parsers of dates, times and
//! timestamps.

use tempora_core::errors::{Error, Result};

pub(crate) struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(crate) fn error(&self, offset: usize, reason: impl Into<String>) -> Error {
        Error::parse(self.text, offset, reason)
    }

    /// Consume `byte` if it is next.
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        let found = self.peek() == Some(byte);
        if found {
            self.pos += 1;
        }
        found
    }

    pub(crate) fn expect(&mut self, byte: u8) -> Result<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error(self.pos, format!("'{}' expected", byte as char)))
        }
    }

    fn digit_run(&self) -> usize {
        self.bytes[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    }

    /// Consume between `min` and `max` digits; returns the value and the
    /// offset of the first digit.
    pub(crate) fn digits(&mut self, min: usize, max: usize) -> Result<(i64, usize)> {
        let start = self.pos;
        let run = self.digit_run();
        if run < min {
            return Err(self.error(start + run, format!("{min} digits expected")));
        }
        if run > max {
            return Err(self.error(start + max, format!("at most {max} digits expected")));
        }
        let mut value = 0i64;
        for &b in &self.bytes[start..start + run] {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(b - b'0')))
                .ok_or_else(|| self.error(start, "number too large"))?;
        }
        self.pos = start + run;
        Ok((value, start))
    }

    /// Consume exactly `count` digits.
    pub(crate) fn fixed(&mut self, count: usize) -> Result<(i64, usize)> {
        self.digits(count, count)
    }

    /// Consume a decimal fraction after `,` or `.` as nanoseconds, if
    /// present.
    pub(crate) fn fraction(&mut self) -> Result<Option<i32>> {
        if !matches!(self.peek(), Some(b',') | Some(b'.')) {
            return Ok(None);
        }
        self.pos += 1;
        let (value, start) = self.digits(1, 9)?;
        let scale = 10i64.pow(9 - (self.pos - start) as u32);
        Ok(Some((value * scale) as i32))
    }

    pub(crate) fn finish(&self) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error(self.pos, "unexpected trailing characters"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_limits_report_offsets() {
        let mut c = Cursor::new("12345");
        assert_eq!(c.digits(1, 9).unwrap(), (12345, 0));
        let mut c = Cursor::new("1a");
        assert_eq!(c.fixed(2).unwrap_err().error_offset(), Some(1));
        let mut c = Cursor::new("123");
        assert_eq!(c.fixed(2).unwrap_err().error_offset(), Some(2));
    }

    #[test]
    fn fractions_scale_to_nanos() {
        let mut c = Cursor::new(",5");
        assert_eq!(c.fraction().unwrap(), Some(500_000_000));
        let mut c = Cursor::new(".000000001");
        assert_eq!(c.fraction().unwrap(), Some(1));
        let mut c = Cursor::new("x");
        assert_eq!(c.fraction().unwrap(), None);
    }
}
