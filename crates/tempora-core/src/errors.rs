//! Error types for tempora.
//!
//! Every failure of the engine is reported through a single
//! `thiserror`-derived enum.  The variants correspond to the error kinds of
//! the engine (out of range, invalid value, unsupported element, arithmetic
//! overflow, grammar error, sign conflict, duplicate unit).  The `ensure!`
//! and `fail!` macros defined here produce them.

use thiserror::Error;

/// The top-level error type used throughout tempora.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value exceeds the supported span of an entity.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// A value fails an element's validity predicate (or is absent).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// The entity's axis has no rule for the requested element.
    #[error("unsupported element: {0}")]
    UnsupportedElement(String),

    /// Signed 64-bit or range arithmetic would overflow.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    /// Text does not match the expected grammar.
    #[error("cannot parse {text:?} at offset {offset}: {reason}")]
    Parse {
        /// The complete input text.
        text: String,
        /// Offset (in bytes) of the first offending character.
        offset: usize,
        /// What was expected or found.
        reason: String,
    },

    /// Duration items would end up with different signs.
    #[error("sign conflict: {0}")]
    SignConflict(String),

    /// The same unit was supplied twice to a builder.
    #[error("duplicate unit: {0}")]
    DuplicateUnit(String),

    /// Caller contract violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),
}

impl Error {
    /// Build a [`Error::Parse`] for `text` at `offset`.
    pub fn parse(text: &str, offset: usize, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::trace!(text, offset, %reason, "parse rejected");
        Error::Parse {
            text: text.to_owned(),
            offset,
            reason,
        }
    }

    /// Offset of the offending character for parse errors.
    pub fn error_offset(&self) -> Option<usize> {
        match self {
            Error::Parse { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Shorthand `Result` type used throughout tempora.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return early with the given error kind if `$cond` is false.
///
/// # Example
/// ```
/// use tempora_core::{ensure, errors::Error};
/// fn month(m: i32) -> tempora_core::Result<i32> {
///     ensure!((1..=12).contains(&m), InvalidValue, "month {m} out of range [1, 12]");
///     Ok(m)
/// }
/// assert!(month(12).is_ok());
/// assert_eq!(month(13).unwrap_err(), Error::InvalidValue("month 13 out of range [1, 12]".into()));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:ident, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::$kind(format!($($msg)*)));
        }
    };
}

/// Return `Err` of the given error kind immediately.
///
/// # Example
/// ```
/// use tempora_core::{fail, errors::Error};
/// fn always_err() -> tempora_core::Result<()> {
///     fail!(UnsupportedElement, "no rule for {}", "DAY_OF_WEEK");
/// }
/// assert!(matches!(always_err(), Err(Error::UnsupportedElement(_))));
/// ```
#[macro_export]
macro_rules! fail {
    ($kind:ident, $($msg:tt)*) => {
        return Err($crate::errors::Error::$kind(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_carries_offset() {
        let e = Error::parse("P1X", 2, "unknown unit symbol");
        assert_eq!(e.error_offset(), Some(2));
        assert_eq!(
            e.to_string(),
            "cannot parse \"P1X\" at offset 2: unknown unit symbol"
        );
    }

    #[test]
    fn other_errors_have_no_offset() {
        assert_eq!(Error::SignConflict("x".into()).error_offset(), None);
    }
}
