//! `RoundingMode`: rounding of integer quotients.

use std::cmp::Ordering;

use tempora_core::errors::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an inexact quotient is rounded to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Towards zero.
    Down,
    /// Towards positive infinity.
    Ceiling,
    /// Towards negative infinity.
    Floor,
    /// To nearest, ties away from zero.
    HalfUp,
    /// To nearest, ties towards zero.
    HalfDown,
    /// To nearest, ties to the even neighbour.
    HalfEven,
    /// The quotient must be exact.
    Unnecessary,
}

impl RoundingMode {
    /// Divide `dividend` by `divisor` and round the quotient.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidValue`] on division by zero or if the mode is
    ///   [`RoundingMode::Unnecessary`] and the quotient is inexact.
    /// * [`Error::ArithmeticOverflow`] for `i128::MIN / -1`.
    pub fn divide(self, dividend: i128, divisor: i128) -> Result<i128> {
        if divisor == 0 {
            return Err(Error::InvalidValue("division by zero".into()));
        }
        let quotient = dividend.checked_div(divisor).ok_or_else(|| {
            Error::ArithmeticOverflow(format!("{dividend} / {divisor} overflows"))
        })?;
        let remainder = dividend % divisor;
        if remainder == 0 {
            return Ok(quotient);
        }
        let negative = (dividend < 0) != (divisor < 0);
        let away_from_zero = match self {
            RoundingMode::Up => true,
            RoundingMode::Down => false,
            RoundingMode::Ceiling => !negative,
            RoundingMode::Floor => negative,
            RoundingMode::HalfUp | RoundingMode::HalfDown | RoundingMode::HalfEven => {
                match (remainder.unsigned_abs() * 2).cmp(&divisor.unsigned_abs()) {
                    Ordering::Greater => true,
                    Ordering::Less => false,
                    Ordering::Equal => match self {
                        RoundingMode::HalfUp => true,
                        RoundingMode::HalfDown => false,
                        _ => quotient % 2 != 0,
                    },
                }
            }
            RoundingMode::Unnecessary => {
                return Err(Error::InvalidValue(format!(
                    "rounding necessary for {dividend} / {divisor}"
                )))
            }
        };
        Ok(if !away_from_zero {
            quotient
        } else if negative {
            quotient - 1
        } else {
            quotient + 1
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(dividend: i128, divisor: i128) -> Vec<i128> {
        [
            RoundingMode::Up,
            RoundingMode::Down,
            RoundingMode::Ceiling,
            RoundingMode::Floor,
            RoundingMode::HalfUp,
            RoundingMode::HalfDown,
            RoundingMode::HalfEven,
        ]
        .iter()
        .map(|m| m.divide(dividend, divisor).unwrap())
        .collect()
    }

    #[test]
    fn decimal_rounding_table() {
        // 5.5, 2.5, 1.6, 1.1, -1.1, -1.6, -2.5, -5.5
        assert_eq!(all(55, 10), [6, 5, 6, 5, 6, 5, 6]);
        assert_eq!(all(25, 10), [3, 2, 3, 2, 3, 2, 2]);
        assert_eq!(all(16, 10), [2, 1, 2, 1, 2, 2, 2]);
        assert_eq!(all(11, 10), [2, 1, 2, 1, 1, 1, 1]);
        assert_eq!(all(-11, 10), [-2, -1, -1, -2, -1, -1, -1]);
        assert_eq!(all(-16, 10), [-2, -1, -1, -2, -2, -2, -2]);
        assert_eq!(all(-25, 10), [-3, -2, -2, -3, -3, -2, -2]);
        assert_eq!(all(55, -10), [-6, -5, -5, -6, -6, -5, -6]);
    }

    #[test]
    fn exact_and_invalid() {
        assert_eq!(RoundingMode::Unnecessary.divide(9, 3).unwrap(), 3);
        assert!(matches!(
            RoundingMode::Unnecessary.divide(10, 3),
            Err(Error::InvalidValue(_))
        ));
        assert!(matches!(
            RoundingMode::HalfUp.divide(1, 0),
            Err(Error::InvalidValue(_))
        ));
    }
}
