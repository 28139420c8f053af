//! `DurationBuilder`: assembles a duration of ISO units field by field.
//!
//! Validation is deferred to [`DurationBuilder::build`] so that calls can be
//! chained; the first problem encountered is the one reported.

use std::collections::HashSet;

use crate::duration::Duration;
use tempora_core::errors::{Error, Result};
use tempora_core::math::safe_negate;
use tempora_units::IsoUnit;

/// Builder for `Duration<IsoUnit>` with a fixed sign.
///
/// Each unit may be set at most once and amounts must be non-negative; the
/// sign is chosen by [`Duration::of_positive`] or [`Duration::of_negative`].
///
/// ```
/// use tempora_duration::Duration;
///
/// let d = Duration::of_positive().years(1).months(2).hours(5).build().unwrap();
/// assert_eq!(d.print().unwrap(), "P1Y2MT5H");
/// ```
#[derive(Debug, Clone)]
pub struct DurationBuilder {
    negative: bool,
    entries: Vec<(IsoUnit, i64)>,
    seen: HashSet<IsoUnit>,
    error: Option<Error>,
}

impl DurationBuilder {
    pub(crate) fn new(negative: bool) -> Self {
        Self {
            negative,
            entries: Vec::new(),
            seen: HashSet::new(),
            error: None,
        }
    }

    fn set(mut self, amount: i64, unit: IsoUnit) -> Self {
        if self.error.is_some() {
            return self;
        }
        if !self.seen.insert(unit) {
            self.error = Some(Error::DuplicateUnit(format!("{unit} set twice")));
        } else if amount < 0 {
            self.error = Some(Error::InvalidValue(format!(
                "negative amount {amount} for {unit}; use of_negative() instead"
            )));
        } else {
            self.entries.push((unit, amount));
        }
        self
    }

    /// Set the years.
    pub fn years(self, amount: i64) -> Self {
        self.set(amount, IsoUnit::YEARS)
    }

    /// Set the months.
    pub fn months(self, amount: i64) -> Self {
        self.set(amount, IsoUnit::MONTHS)
    }

    /// Set the weeks.
    pub fn weeks(self, amount: i64) -> Self {
        self.set(amount, IsoUnit::WEEKS)
    }

    /// Set the days.
    pub fn days(self, amount: i64) -> Self {
        self.set(amount, IsoUnit::DAYS)
    }

    /// Set the hours.
    pub fn hours(self, amount: i64) -> Self {
        self.set(amount, IsoUnit::HOURS)
    }

    /// Set the minutes.
    pub fn minutes(self, amount: i64) -> Self {
        self.set(amount, IsoUnit::MINUTES)
    }

    /// Set the seconds.
    pub fn seconds(self, amount: i64) -> Self {
        self.set(amount, IsoUnit::SECONDS)
    }

    /// Set the milliseconds (stored as nanoseconds).
    pub fn millis(self, amount: i64) -> Self {
        self.set(amount, IsoUnit::MILLIS)
    }

    /// Set the microseconds (stored as nanoseconds).
    pub fn micros(self, amount: i64) -> Self {
        self.set(amount, IsoUnit::MICROS)
    }

    /// Set the nanoseconds.
    pub fn nanos(self, amount: i64) -> Self {
        self.set(amount, IsoUnit::NANOS)
    }

    /// Finish the duration.
    ///
    /// # Errors
    ///
    /// * [`Error::DuplicateUnit`] if a unit was set twice.
    /// * [`Error::InvalidValue`] if an amount was negative.
    /// * [`Error::ArithmeticOverflow`] if collapsing sub-second units
    ///   overflows.
    pub fn build(self) -> Result<Duration<IsoUnit>> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let mut entries = Vec::with_capacity(self.entries.len());
        for (unit, amount) in self.entries {
            let signed = if self.negative { safe_negate(amount)? } else { amount };
            entries.push((unit, signed));
        }
        Duration::from_signed(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_units_are_rejected() {
        let r = Duration::of_positive().days(1).hours(2).days(3).build();
        assert!(matches!(r, Err(Error::DuplicateUnit(_))));
    }

    #[test]
    fn millis_and_nanos_may_both_be_set() {
        let d = Duration::of_positive().millis(1).nanos(5).build().unwrap();
        assert_eq!(d.get_partial_amount(IsoUnit::NANOS), 1_000_005);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let r = Duration::of_negative().years(-1).build();
        assert!(matches!(r, Err(Error::InvalidValue(_))));
    }

    #[test]
    fn negative_builder_sets_sign() {
        let d = Duration::of_negative().months(3).minutes(4).build().unwrap();
        assert!(d.is_negative());
        assert_eq!(d.signed_amount(IsoUnit::MONTHS), -3);
        assert_eq!(d.signed_amount(IsoUnit::MINUTES), -4);
    }

    #[test]
    fn all_zero_builds_empty() {
        let d = Duration::of_negative().days(0).build().unwrap();
        assert!(d.is_empty());
        assert!(!d.is_negative());
    }
}
