//! `MachineTime<S>`: elapsed time as seconds plus a nanosecond fraction.
//!
//! Values are floor-normalized: the fraction is always in
//! `0..1_000_000_000`, also for negative values (`-2.123456789 s` is stored
//! as `-3 s + 876543211 ns`).  All arithmetic is performed on the combined
//! nanosecond value as `i128`.

use std::fmt;
use std::marker::PhantomData;

use tempora_core::errors::{Error, Result};
use tempora_core::math::{floor_div, floor_mod, safe_add, safe_cast, safe_mul};
use tempora_core::NANOS_PER_SECOND;
use tempora_units::ClockUnit;

use crate::leap_seconds::LeapSeconds;
use crate::moment::Moment;
use crate::rounding::RoundingMode;
use crate::scale::{Posix, Scale, TimeScale, Utc};

/// Elapsed time on the scale `S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MachineTime<S: Scale> {
    seconds: i64,
    nanos: i32,
    scale: PhantomData<S>,
}

impl<S: Scale> Default for MachineTime<S> {
    fn default() -> Self {
        Self::ZERO
    }
}

const NANOS: i128 = NANOS_PER_SECOND as i128;

impl<S: Scale> MachineTime<S> {
    /// The zero length.
    pub const ZERO: Self = Self {
        seconds: 0,
        nanos: 0,
        scale: PhantomData,
    };

    /// Normalize `seconds + nanos` (any sign) into canonical form.
    pub fn of_units(seconds: i64, nanos: i64) -> Result<Self> {
        let seconds = safe_add(seconds, floor_div(nanos, NANOS_PER_SECOND))?;
        Ok(Self {
            seconds,
            nanos: floor_mod(nanos, NANOS_PER_SECOND) as i32,
            scale: PhantomData,
        })
    }

    /// `amount` of `unit`.
    pub fn of(amount: i64, unit: ClockUnit) -> Result<Self> {
        let per_unit = unit.nanos();
        if per_unit >= NANOS_PER_SECOND {
            Self::of_units(safe_mul(amount, per_unit / NANOS_PER_SECOND)?, 0)
        } else {
            Self::of_units(0, safe_mul(amount, per_unit)?)
        }
    }

    /// Decimal seconds rounded to the nearest nanosecond.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidValue`] for NaN or infinite input and
    /// [`Error::ArithmeticOverflow`] beyond the `i64` seconds range.
    pub fn of_decimal_seconds(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidValue(format!("{value} is not a finite number")));
        }
        let whole = value.floor();
        let seconds: i64 = safe_cast(whole)?;
        let nanos = ((value - whole) * 1e9).round() as i64;
        Self::of_units(seconds, nanos)
    }

    pub(crate) fn from_total_nanos(total: i128) -> Result<Self> {
        let seconds = i64::try_from(total.div_euclid(NANOS)).map_err(|_| {
            Error::ArithmeticOverflow(format!("{total} ns exceed the machine-time range"))
        })?;
        Ok(Self {
            seconds,
            nanos: total.rem_euclid(NANOS) as i32,
            scale: PhantomData,
        })
    }

    pub(crate) fn total_nanos(&self) -> i128 {
        i128::from(self.seconds) * NANOS + i128::from(self.nanos)
    }

    /// Elapsed time between two moments counted on this scale.
    ///
    /// On the UTC scale an interval spanning an insertion is one second
    /// longer than on the POSIX scale.
    pub fn between(start: &Moment, end: &Moment, table: &LeapSeconds) -> Result<Self> {
        let seconds = i128::from(S::elapsed_seconds(end, table))
            - i128::from(S::elapsed_seconds(start, table));
        let nanos = i128::from(end.nanosecond()) - i128::from(start.nanosecond());
        Self::from_total_nanos(seconds * NANOS + nanos)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Whole seconds (floor).
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanosecond fraction in `0..1_000_000_000`.
    pub fn fraction(&self) -> i32 {
        self.nanos
    }

    /// The time scale.
    pub fn scale(&self) -> TimeScale {
        S::SCALE
    }

    /// `true` below zero.
    pub fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    /// `true` above zero.
    pub fn is_positive(&self) -> bool {
        self.seconds > 0 || (self.seconds == 0 && self.nanos > 0)
    }

    /// `true` for the zero length.
    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }

    /// Decimal seconds as `f64` (lossy).
    pub fn to_decimal_seconds(&self) -> f64 {
        self.seconds as f64 + f64::from(self.nanos) / 1e9
    }

    /// Exact decimal representation in seconds (`-2.123456789`).
    pub fn to_decimal_string(&self) -> String {
        let total = self.total_nanos();
        let sign = if total < 0 { "-" } else { "" };
        let abs = total.unsigned_abs();
        let whole = abs / NANOS as u128;
        let frac = abs % NANOS as u128;
        if frac == 0 {
            format!("{sign}{whole}")
        } else {
            let digits = format!("{frac:09}");
            format!("{sign}{whole}.{}", digits.trim_end_matches('0'))
        }
    }

    // ── Arithmetic ────────────────────────────────────────────────────────

    /// Sum of two values on the same scale.
    pub fn plus(&self, other: &Self) -> Result<Self> {
        Self::from_total_nanos(self.total_nanos() + other.total_nanos())
    }

    /// Difference of two values on the same scale.
    pub fn minus(&self, other: &Self) -> Result<Self> {
        Self::from_total_nanos(self.total_nanos() - other.total_nanos())
    }

    /// Add `amount` of `unit`.
    pub fn plus_amount(&self, amount: i64, unit: ClockUnit) -> Result<Self> {
        let delta = i128::from(amount) * i128::from(unit.nanos());
        Self::from_total_nanos(self.total_nanos() + delta)
    }

    /// Multiply by an integer factor.
    pub fn multiplied_by(&self, factor: i64) -> Result<Self> {
        let total = self
            .total_nanos()
            .checked_mul(i128::from(factor))
            .ok_or_else(|| Error::ArithmeticOverflow(format!("{self} * {factor} overflows")))?;
        Self::from_total_nanos(total)
    }

    /// Divide by an integer, rounding the nanosecond quotient with `mode`.
    ///
    /// ```
    /// use tempora_scale::{MachineTime, Posix, RoundingMode};
    ///
    /// let t = MachineTime::<Posix>::of_units(7, 500_000_001).unwrap();
    /// let q = t.divided_by(3, RoundingMode::HalfUp).unwrap();
    /// assert_eq!((q.seconds(), q.fraction()), (2, 500_000_000));
    /// ```
    pub fn divided_by(&self, divisor: i64, mode: RoundingMode) -> Result<Self> {
        if divisor == 1 {
            return Ok(*self);
        }
        Self::from_total_nanos(mode.divide(self.total_nanos(), i128::from(divisor))?)
    }

    /// The value with the opposite sign.
    pub fn negate(&self) -> Result<Self> {
        Self::from_total_nanos(-self.total_nanos())
    }

    /// The absolute value.
    pub fn abs(&self) -> Result<Self> {
        if self.is_negative() {
            self.negate()
        } else {
            Ok(*self)
        }
    }
}

impl MachineTime<Posix> {
    /// Civil seconds and nanoseconds (any sign).
    pub fn of_posix_units(seconds: i64, nanos: i64) -> Result<Self> {
        Self::of_units(seconds, nanos)
    }

    /// Decimal civil seconds.
    pub fn of_posix_seconds(value: f64) -> Result<Self> {
        Self::of_decimal_seconds(value)
    }

    /// Lossless conversion of a platform duration.
    pub fn from_std_duration(value: std::time::Duration) -> Result<Self> {
        let seconds: i64 = safe_cast(value.as_secs())?;
        Self::of_units(seconds, i64::from(value.subsec_nanos()))
    }

    /// Conversion into a platform duration; fails with
    /// [`Error::OutOfRange`] for negative values.
    pub fn to_std_duration(&self) -> Result<std::time::Duration> {
        if self.is_negative() {
            return Err(Error::OutOfRange(format!(
                "negative machine time {self} has no platform representation"
            )));
        }
        // the fraction is never negative
        Ok(std::time::Duration::new(self.seconds as u64, self.nanos as u32))
    }
}

impl MachineTime<Utc> {
    /// SI seconds and nanoseconds (any sign).
    pub fn of_si_units(seconds: i64, nanos: i64) -> Result<Self> {
        Self::of_units(seconds, nanos)
    }

    /// Decimal SI seconds.
    pub fn of_si_seconds(value: f64) -> Result<Self> {
        Self::of_decimal_seconds(value)
    }
}

impl TryFrom<std::time::Duration> for MachineTime<Posix> {
    type Error = Error;
    fn try_from(value: std::time::Duration) -> Result<Self> {
        Self::from_std_duration(value)
    }
}

impl TryFrom<MachineTime<Posix>> for std::time::Duration {
    type Error = Error;
    fn try_from(value: MachineTime<Posix>) -> Result<Self> {
        value.to_std_duration()
    }
}

impl<S: Scale> fmt::Display for MachineTime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s [{}]", self.to_decimal_string(), S::SCALE)
    }
}
