//! `MachineTimeFormatter`: pattern-driven formatting and parsing.
//!
//! | symbol | meaning |
//! |---|---|
//! | `D` `h` `m` `s` | days, hours, minutes, seconds; letter count = minimum width |
//! | `#` | one extra optional digit for the following field |
//! | `f` | fraction of second; letter count = exact digits (at most 9) |
//! | `+` | sign, always printed (first symbol only) |
//! | `-` | sign, printed for negative values (first symbol only) |
//! | `[` … `]` | optional section |
//! | `'` … `'` | quoted literal, `''` is a single quote |
//!
//! Fields must appear in descending order.  The largest field absorbs the
//! whole magnitude and is unbounded unless `#` limits it; smaller fields
//! hold the remainder, so parsing rejects hours above 23 and minutes or
//! seconds above 59 there.  Any other non-letter character is a literal.

use std::fmt;
use std::marker::PhantomData;

use tempora_core::errors::{Error, Result};

use crate::machine_time::MachineTime;
use crate::scale::Scale;

const MAX_FRACTION_DIGITS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum FieldUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl FieldUnit {
    fn of_symbol(c: char) -> Option<Self> {
        match c {
            'D' => Some(FieldUnit::Days),
            'h' => Some(FieldUnit::Hours),
            'm' => Some(FieldUnit::Minutes),
            's' => Some(FieldUnit::Seconds),
            _ => None,
        }
    }

    fn seconds(self) -> u128 {
        match self {
            FieldUnit::Days => 86_400,
            FieldUnit::Hours => 3_600,
            FieldUnit::Minutes => 60,
            FieldUnit::Seconds => 1,
        }
    }

    /// Exclusive bound of the field when a larger field precedes it.
    fn radix(self) -> Option<u128> {
        match self {
            FieldUnit::Days => None,
            FieldUnit::Hours => Some(24),
            FieldUnit::Minutes | FieldUnit::Seconds => Some(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Sign { always: bool },
    Field {
        unit: FieldUnit,
        min_width: usize,
        max_width: Option<usize>,
        limit: Option<u128>,
    },
    Fraction { digits: usize },
    Literal(String),
    Optional(Vec<Token>),
}

/// Formatter and parser of [`MachineTime<S>`] values.
///
/// ```
/// use tempora_scale::{MachineTime, MachineTimeFormatter, Posix};
///
/// let f = MachineTimeFormatter::<Posix>::of_pattern("+D:hh:mm:ss").unwrap();
/// let t = MachineTime::of_posix_units(93_784, 0).unwrap();
/// assert_eq!(f.format(&t).unwrap(), "+1:02:03:04");
/// assert_eq!(f.parse("+1:02:03:04").unwrap(), t);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineTimeFormatter<S: Scale> {
    pattern: String,
    tokens: Vec<Token>,
    scale: PhantomData<S>,
}

impl<S: Scale> MachineTimeFormatter<S> {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] with the offset of the offending pattern character.
    pub fn of_pattern(pattern: &str) -> Result<Self> {
        let tokens = Compiler::new(pattern).compile()?;
        Ok(Self {
            pattern: pattern.to_owned(),
            tokens,
            scale: PhantomData,
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Format `value`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidValue`] if the value is negative and the pattern has
    /// no sign, or if a bounded field is too small for its value.
    pub fn format(&self, value: &MachineTime<S>) -> Result<String> {
        let total = value.total_nanos();
        let negative = total < 0;
        if negative && !matches!(self.tokens.first(), Some(Token::Sign { .. })) {
            return Err(Error::InvalidValue(format!(
                "pattern {:?} cannot express the negative value {value}",
                self.pattern
            )));
        }
        let magnitude = total.unsigned_abs();
        let mut values = [0u128; 4];
        let mut remaining = magnitude / 1_000_000_000;
        for unit in fields(&self.tokens) {
            let v = remaining / unit.seconds();
            remaining -= v * unit.seconds();
            values[unit as usize] = v;
        }
        let printer = Printer {
            negative,
            values,
            fraction: magnitude % 1_000_000_000,
        };
        let mut out = String::with_capacity(self.pattern.len() + 8);
        printer.write(&self.tokens, &mut out)?;
        Ok(out)
    }

    /// Parse `text`, which must match the pattern exactly.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] with the offset of the first unmatched character.
    pub fn parse(&self, text: &str) -> Result<MachineTime<S>> {
        let mut state = ParseState::default();
        parse_tokens(&self.tokens, text, &mut state)?;
        if state.pos < text.len() {
            return Err(Error::parse(text, state.pos, "unexpected trailing characters"));
        }
        let total = state.seconds as i128 * 1_000_000_000 + state.nanos as i128;
        MachineTime::from_total_nanos(if state.negative { -total } else { total })
    }
}

impl<S: Scale> fmt::Display for MachineTimeFormatter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MachineTimeFormatter[{}]", self.pattern)
    }
}

/// All field units of a token list in pattern order.
fn fields(tokens: &[Token]) -> Vec<FieldUnit> {
    let mut out = Vec::with_capacity(4);
    for token in tokens {
        match token {
            Token::Field { unit, .. } => out.push(*unit),
            Token::Optional(section) => out.extend(fields(section)),
            _ => {}
        }
    }
    out
}

// ── Compilation ───────────────────────────────────────────────────────────────

struct Compiler<'a> {
    pattern: &'a str,
    chars: Vec<(usize, char)>,
    last_unit: Option<FieldUnit>,
    field_count: usize,
}

impl<'a> Compiler<'a> {
    fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            chars: pattern.char_indices().collect(),
            last_unit: None,
            field_count: 0,
        }
    }

    fn error(&self, offset: usize, reason: &str) -> Error {
        Error::parse(self.pattern, offset, reason)
    }

    fn offset(&self, i: usize) -> usize {
        self.chars.get(i).map_or(self.pattern.len(), |(o, _)| *o)
    }

    fn run_of(&self, from: usize, c: char) -> usize {
        self.chars[from..].iter().take_while(|(_, x)| *x == c).count()
    }

    fn compile(mut self) -> Result<Vec<Token>> {
        let mut stack: Vec<Vec<Token>> = vec![Vec::new()];
        let mut open: Vec<usize> = Vec::new();
        let mut i = 0;
        while i < self.chars.len() {
            let (offset, c) = self.chars[i];
            let token = match c {
                '+' | '-' if i == 0 => {
                    i += 1;
                    Token::Sign { always: c == '+' }
                }
                '#' | 'D' | 'h' | 'm' | 's' => {
                    let extra = self.run_of(i, '#');
                    i += extra;
                    let symbol = self.chars.get(i).map(|(_, c)| *c);
                    let unit = symbol.and_then(FieldUnit::of_symbol).ok_or_else(|| {
                        self.error(self.offset(i), "'#' must precede a field symbol")
                    })?;
                    let field_offset = self.offset(i);
                    if self.last_unit.is_some_and(|last| last >= unit) {
                        return Err(self.error(field_offset, "fields must be in descending order"));
                    }
                    let min_width = self.run_of(i, symbol.unwrap_or_default());
                    i += min_width;
                    let (max_width, limit) = if self.field_count == 0 {
                        ((extra > 0).then_some(min_width + extra), None)
                    } else {
                        (Some((min_width + extra).max(2)), unit.radix())
                    };
                    self.last_unit = Some(unit);
                    self.field_count += 1;
                    Token::Field {
                        unit,
                        min_width,
                        max_width,
                        limit,
                    }
                }
                'f' => {
                    if self.last_unit != Some(FieldUnit::Seconds) {
                        return Err(self.error(offset, "a fraction must follow the seconds field"));
                    }
                    let digits = self.run_of(i, 'f');
                    if digits > MAX_FRACTION_DIGITS {
                        return Err(self.error(
                            self.offset(i + MAX_FRACTION_DIGITS),
                            "at most nine fraction digits are allowed",
                        ));
                    }
                    i += digits;
                    Token::Fraction { digits }
                }
                '[' => {
                    stack.push(Vec::new());
                    open.push(offset);
                    i += 1;
                    continue;
                }
                ']' => {
                    if stack.len() == 1 {
                        return Err(self.error(offset, "']' without matching '['"));
                    }
                    open.pop();
                    i += 1;
                    let section = stack.pop().unwrap_or_default();
                    Token::Optional(section)
                }
                '\'' => {
                    let (literal, next) = self.quoted(i)?;
                    i = next;
                    Token::Literal(literal)
                }
                c if c.is_alphabetic() => {
                    return Err(self.error(offset, "unknown pattern symbol"));
                }
                c => {
                    i += 1;
                    Token::Literal(c.to_string())
                }
            };
            if let Some(top) = stack.last_mut() {
                push_token(top, token);
            }
        }
        if let Some(&offset) = open.last() {
            return Err(self.error(offset, "unclosed optional section"));
        }
        if self.field_count == 0 {
            return Err(self.error(0, "pattern contains no field"));
        }
        Ok(stack.pop().unwrap_or_default())
    }

    /// Read a quoted literal starting at the quote `i`.
    fn quoted(&self, i: usize) -> Result<(String, usize)> {
        if self.chars.get(i + 1).map(|(_, c)| *c) == Some('\'') {
            return Ok(("'".to_owned(), i + 2));
        }
        let mut literal = String::new();
        let mut j = i + 1;
        loop {
            match self.chars.get(j) {
                None => return Err(self.error(self.offset(i), "unterminated quoted literal")),
                Some((_, '\'')) if self.chars.get(j + 1).map(|(_, c)| *c) == Some('\'') => {
                    literal.push('\'');
                    j += 2;
                }
                Some((_, '\'')) => return Ok((literal, j + 1)),
                Some((_, c)) => {
                    literal.push(*c);
                    j += 1;
                }
            }
        }
    }
}

/// Append a token, merging adjacent literals.
fn push_token(tokens: &mut Vec<Token>, token: Token) {
    if let (Some(Token::Literal(prev)), Token::Literal(next)) = (tokens.last_mut(), &token) {
        prev.push_str(next);
        return;
    }
    tokens.push(token);
}

// ── Formatting ────────────────────────────────────────────────────────────────

struct Printer {
    negative: bool,
    values: [u128; 4],
    fraction: u128,
}

impl Printer {
    fn fraction_value(&self, digits: usize) -> u128 {
        self.fraction / 10u128.pow((MAX_FRACTION_DIGITS - digits) as u32)
    }

    fn is_present(&self, tokens: &[Token]) -> bool {
        tokens.iter().any(|t| match t {
            Token::Field { unit, .. } => self.values[*unit as usize] != 0,
            Token::Fraction { digits } => self.fraction_value(*digits) != 0,
            Token::Optional(section) => self.is_present(section),
            _ => false,
        })
    }

    fn write(&self, tokens: &[Token], out: &mut String) -> Result<()> {
        for token in tokens {
            match token {
                Token::Sign { always } => {
                    if self.negative {
                        out.push('-');
                    } else if *always {
                        out.push('+');
                    }
                }
                Token::Field {
                    unit,
                    min_width,
                    max_width,
                    ..
                } => {
                    let digits = self.values[*unit as usize].to_string();
                    if let Some(max) = max_width {
                        if digits.len() > *max {
                            return Err(Error::InvalidValue(format!(
                                "{digits} does not fit into {max} digits"
                            )));
                        }
                    }
                    for _ in digits.len()..*min_width {
                        out.push('0');
                    }
                    out.push_str(&digits);
                }
                Token::Fraction { digits } => {
                    let value = self.fraction_value(*digits);
                    out.push_str(&format!("{value:0width$}", width = *digits));
                }
                Token::Literal(s) => out.push_str(s),
                Token::Optional(section) => {
                    if self.is_present(section) {
                        self.write(section, out)?;
                    }
                }
            }
        }
        Ok(())
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
struct ParseState {
    pos: usize,
    negative: bool,
    seconds: u128,
    nanos: u128,
}

fn parse_tokens(tokens: &[Token], text: &str, state: &mut ParseState) -> Result<()> {
    let bytes = text.as_bytes();
    for (idx, token) in tokens.iter().enumerate() {
        match token {
            Token::Sign { always } => match bytes.get(state.pos) {
                Some(b'-') => {
                    state.negative = true;
                    state.pos += 1;
                }
                Some(b'+') if *always => state.pos += 1,
                _ if *always => return Err(Error::parse(text, state.pos, "sign expected")),
                _ => {}
            },
            Token::Field {
                unit,
                min_width,
                max_width,
                limit,
            } => {
                let run = bytes[state.pos..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                let reserve: usize = tokens[idx + 1..]
                    .iter()
                    .map_while(|t| match t {
                        Token::Field { min_width, .. } => Some(*min_width),
                        _ => None,
                    })
                    .sum();
                let take = run
                    .saturating_sub(reserve)
                    .min(max_width.unwrap_or(usize::MAX));
                if take < *min_width {
                    return Err(Error::parse(
                        text,
                        state.pos + take,
                        format!("at least {min_width} digits expected"),
                    ));
                }
                let digits = &text[state.pos..state.pos + take];
                let amount = digits.parse::<u128>().ok();
                if let (Some(amount), Some(limit)) = (amount, limit) {
                    if amount >= *limit {
                        return Err(Error::parse(
                            text,
                            state.pos,
                            format!("{amount} exceeds the field maximum {}", limit - 1),
                        ));
                    }
                }
                let value = amount.and_then(|v| v.checked_mul(unit.seconds()))
                    .and_then(|v| v.checked_add(state.seconds))
                    .filter(|v| *v <= i64::MAX as u128)
                    .ok_or_else(|| Error::parse(text, state.pos, "value out of range"))?;
                state.seconds = value;
                state.pos += take;
            }
            Token::Fraction { digits } => {
                let run = bytes[state.pos..]
                    .iter()
                    .take(*digits)
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if run < *digits {
                    return Err(Error::parse(
                        text,
                        state.pos + run,
                        format!("{digits} fraction digits expected"),
                    ));
                }
                let mut value = 0u128;
                for b in &bytes[state.pos..state.pos + digits] {
                    value = value * 10 + u128::from(b - b'0');
                }
                state.nanos = value * 10u128.pow((MAX_FRACTION_DIGITS - digits) as u32);
                state.pos += digits;
            }
            Token::Literal(s) => {
                if text[state.pos..].starts_with(s.as_str()) {
                    state.pos += s.len();
                } else {
                    return Err(Error::parse(text, state.pos, format!("{s:?} expected")));
                }
            }
            Token::Optional(section) => {
                let saved = *state;
                if parse_tokens(section, text, state).is_err() {
                    *state = saved;
                }
            }
        }
    }
    Ok(())
}
