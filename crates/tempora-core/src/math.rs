//! Overflow-checked integer arithmetic.
//!
//! All helpers report overflow as [`Error::ArithmeticOverflow`] instead of
//! wrapping or panicking.  Division helpers use floor semantics (the
//! remainder has the sign of the divisor), which is what every calendar and
//! machine-time computation in tempora needs.

use crate::errors::{Error, Result};
use num_traits::{CheckedAdd, CheckedMul, CheckedNeg, CheckedSub, NumCast, PrimInt, ToPrimitive};

/// `a + b`, or an overflow error.
pub fn safe_add<T: CheckedAdd + std::fmt::Display>(a: T, b: T) -> Result<T> {
    a.checked_add(&b)
        .ok_or_else(|| Error::ArithmeticOverflow(format!("{a} + {b}")))
}

/// `a - b`, or an overflow error.
pub fn safe_sub<T: CheckedSub + std::fmt::Display>(a: T, b: T) -> Result<T> {
    a.checked_sub(&b)
        .ok_or_else(|| Error::ArithmeticOverflow(format!("{a} - {b}")))
}

/// `a * b`, or an overflow error.
pub fn safe_mul<T: CheckedMul + std::fmt::Display>(a: T, b: T) -> Result<T> {
    a.checked_mul(&b)
        .ok_or_else(|| Error::ArithmeticOverflow(format!("{a} * {b}")))
}

/// `-a`, or an overflow error (`i64::MIN`).
pub fn safe_negate<T: CheckedNeg + std::fmt::Display>(a: T) -> Result<T> {
    a.checked_neg()
        .ok_or_else(|| Error::ArithmeticOverflow(format!("-({a})")))
}

/// Narrowing conversion, or an overflow error.
pub fn safe_cast<S: ToPrimitive + Copy + std::fmt::Display, T: PrimInt>(value: S) -> Result<T> {
    <T as NumCast>::from(value).ok_or_else(|| {
        Error::ArithmeticOverflow(format!(
            "{value} does not fit into {}",
            std::any::type_name::<T>()
        ))
    })
}

/// Floor division (rounds towards negative infinity).
pub fn floor_div(value: i64, divisor: i64) -> i64 {
    value.div_euclid(divisor) - <i64 as From<bool>>::from(divisor < 0 && value.rem_euclid(divisor) != 0)
}

/// Floor modulo (result has the sign of the divisor).
pub fn floor_mod(value: i64, divisor: i64) -> i64 {
    value - divisor * floor_div(value, divisor)
}
