//! The `Duration<U>` type.
//!
//! A duration is an ordered set of [`Item`]s (largest unit first) and one
//! sign shared by all items.  Construction always normalizes:
//!
//! * units with a [`ChronoUnit::collapse`] target are folded into it on
//!   entry (milliseconds and microseconds become nanoseconds);
//! * units with a [`ChronoUnit::merge_into`] target are folded into it when
//!   the target is also present (weeks become days next to days);
//! * zero amounts are dropped, so the zero duration has no items;
//! * every remaining item must have the same sign, otherwise the
//!   construction fails with [`Error::SignConflict`].

use crate::builder::DurationBuilder;
use crate::item::Item;
use crate::normalizer::Normalizer;
use tempora_core::errors::{Error, Result};
use tempora_core::math::{safe_add, safe_mul, safe_negate};
use tempora_units::{by_length_descending, CalendarUnit, ChronoUnit, ClockUnit, IsoUnit};

/// An amount of time in the units `U`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Duration<U: ChronoUnit> {
    items: Vec<Item<U>>,
    negative: bool,
}

impl<U: ChronoUnit> Default for Duration<U> {
    fn default() -> Self {
        Self::of_zero()
    }
}

// ── Construction ─────────────────────────────────────────────────────────────

impl<U: ChronoUnit> Duration<U> {
    /// The empty duration.
    pub fn of_zero() -> Self {
        Self {
            items: Vec::new(),
            negative: false,
        }
    }

    /// A duration of a single unit; the sign is taken from `amount`.
    pub fn of(amount: i64, unit: U) -> Result<Self> {
        Self::from_signed([(unit, amount)])
    }

    /// Build a normalized duration from signed `(unit, amount)` entries.
    ///
    /// Entries of the same unit are summed.  Fails with
    /// [`Error::SignConflict`] if the non-zero results have different signs.
    pub fn from_signed(entries: impl IntoIterator<Item = (U, i64)>) -> Result<Self> {
        let sums = sum_entries(entries)?;
        let positive = sums.iter().any(|(_, a)| *a > 0);
        let negative = sums.iter().any(|(_, a)| *a < 0);
        if positive && negative {
            return Err(Error::SignConflict(format!(
                "mixed signs in duration items: {}",
                describe(&sums)
            )));
        }
        Self::from_sums(sums, negative)
    }

    fn from_sums(mut sums: Vec<(U, i64)>, negative: bool) -> Result<Self> {
        sums.retain(|(_, a)| *a != 0);
        sums.sort_by(|a, b| by_length_descending(&a.0, &b.0));
        let mut items = Vec::with_capacity(sums.len());
        for (unit, amount) in sums {
            let magnitude = if amount < 0 { safe_negate(amount)? } else { amount };
            items.push(Item::new(magnitude, unit));
        }
        let negative = negative && !items.is_empty();
        Ok(Self { items, negative })
    }

    /// The signed `(unit, amount)` pairs of this duration.
    pub fn signed_entries(&self) -> impl Iterator<Item = (U, i64)> + '_ {
        let sign = if self.negative { -1 } else { 1 };
        self.items.iter().map(move |i| (i.unit(), sign * i.amount()))
    }
}

impl Duration<IsoUnit> {
    /// Start building a non-negative duration.
    pub fn of_positive() -> DurationBuilder {
        DurationBuilder::new(false)
    }

    /// Start building a non-positive duration.
    pub fn of_negative() -> DurationBuilder {
        DurationBuilder::new(true)
    }

    /// Combine a calendar period and a clock period.
    ///
    /// Fails with [`Error::SignConflict`] if both are non-empty and differ
    /// in sign.
    pub fn compose(
        calendar: &Duration<CalendarUnit>,
        clock: &Duration<ClockUnit>,
    ) -> Result<Self> {
        let entries = calendar
            .signed_entries()
            .map(|(u, a)| (IsoUnit::Calendar(u), a))
            .chain(clock.signed_entries().map(|(u, a)| (IsoUnit::Clock(u), a)));
        Self::from_signed(entries)
    }

    /// The calendar items of this duration.
    pub fn to_calendar_period(&self) -> Duration<CalendarUnit> {
        Duration {
            items: self
                .items
                .iter()
                .filter_map(|i| i.unit().as_calendar().map(|u| Item::new(i.amount(), u)))
                .collect(),
            negative: self.negative,
        }
        .fix_empty_sign()
    }

    /// The clock items of this duration.
    pub fn to_clock_period(&self) -> Duration<ClockUnit> {
        Duration {
            items: self
                .items
                .iter()
                .filter_map(|i| i.unit().as_clock().map(|u| Item::new(i.amount(), u)))
                .collect(),
            negative: self.negative,
        }
        .fix_empty_sign()
    }
}

impl Duration<CalendarUnit> {
    /// A calendar period of years, months and days (all of one sign).
    pub fn of_calendar_units(years: i64, months: i64, days: i64) -> Result<Self> {
        Self::from_signed([
            (CalendarUnit::YEARS, years),
            (CalendarUnit::MONTHS, months),
            (CalendarUnit::DAYS, days),
        ])
    }
}

impl Duration<ClockUnit> {
    /// A clock period of hours, minutes and seconds (all of one sign).
    pub fn of_clock_units(hours: i64, minutes: i64, seconds: i64) -> Result<Self> {
        Self::from_signed([
            (ClockUnit::Hours, hours),
            (ClockUnit::Minutes, minutes),
            (ClockUnit::Seconds, seconds),
        ])
    }

    /// Lossless conversion of a platform duration into seconds and
    /// nanoseconds.
    pub fn from_std_duration(value: std::time::Duration) -> Result<Self> {
        let seconds = i64::try_from(value.as_secs()).map_err(|_| {
            Error::ArithmeticOverflow(format!("{} seconds exceed i64", value.as_secs()))
        })?;
        Self::from_signed([
            (ClockUnit::Seconds, seconds),
            (ClockUnit::Nanos, i64::from(value.subsec_nanos())),
        ])
    }

    /// Conversion into a platform duration.
    ///
    /// Fails with [`Error::OutOfRange`] for negative durations, which the
    /// platform type cannot represent.
    pub fn to_std_duration(&self) -> Result<std::time::Duration> {
        if self.negative {
            return Err(Error::OutOfRange(format!(
                "negative duration {self} has no platform representation"
            )));
        }
        let total: i128 = self
            .items
            .iter()
            .map(|i| i128::from(i.amount()) * i128::from(i.unit().nanos()))
            .sum();
        let seconds = u64::try_from(total / 1_000_000_000).map_err(|_| {
            Error::ArithmeticOverflow(format!("{self} exceeds the platform duration range"))
        })?;
        // remainder of a non-negative value is in [0, 1e9)
        let nanos = (total % 1_000_000_000) as u32;
        Ok(std::time::Duration::new(seconds, nanos))
    }
}

impl From<Duration<CalendarUnit>> for Duration<IsoUnit> {
    fn from(d: Duration<CalendarUnit>) -> Self {
        Duration {
            items: d
                .items
                .iter()
                .map(|i| Item::new(i.amount(), IsoUnit::Calendar(i.unit())))
                .collect(),
            negative: d.negative,
        }
    }
}

impl From<Duration<ClockUnit>> for Duration<IsoUnit> {
    fn from(d: Duration<ClockUnit>) -> Self {
        Duration {
            items: d
                .items
                .iter()
                .map(|i| Item::new(i.amount(), IsoUnit::Clock(i.unit())))
                .collect(),
            negative: d.negative,
        }
    }
}

// ── Accessors ────────────────────────────────────────────────────────────────

impl<U: ChronoUnit> Duration<U> {
    /// The items, largest unit first.
    pub fn items(&self) -> &[Item<U>] {
        &self.items
    }

    /// `true` if this duration has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` if this duration is non-empty and positive.
    pub fn is_positive(&self) -> bool {
        !self.is_empty() && !self.negative
    }

    /// `true` if this duration is negative.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// `true` if an item of `unit` is present.
    pub fn contains(&self, unit: U) -> bool {
        self.items.iter().any(|i| i.unit() == unit)
    }

    /// The (non-negative) amount of `unit`, zero if absent.
    pub fn get_partial_amount(&self, unit: U) -> i64 {
        self.items
            .iter()
            .find(|i| i.unit() == unit)
            .map_or(0, Item::amount)
    }

    /// The signed amount of `unit`, zero if absent.
    pub fn signed_amount(&self, unit: U) -> i64 {
        let amount = self.get_partial_amount(unit);
        if self.negative {
            -amount
        } else {
            amount
        }
    }

    fn fix_empty_sign(mut self) -> Self {
        if self.items.is_empty() {
            self.negative = false;
        }
        self
    }
}

// ── Arithmetic ───────────────────────────────────────────────────────────────

impl<U: ChronoUnit> Duration<U> {
    /// The duration with the opposite sign.
    pub fn negate(&self) -> Self {
        Self {
            items: self.items.clone(),
            negative: !self.negative,
        }
        .fix_empty_sign()
    }

    /// The duration with a non-negative sign.
    pub fn abs(&self) -> Self {
        Self {
            items: self.items.clone(),
            negative: false,
        }
    }

    /// Add `amount` of `unit`.
    ///
    /// The amount is added to an existing item of the same unit or inserted
    /// as a new item.  Fails with [`Error::SignConflict`] if the result
    /// would mix signs.
    pub fn plus(&self, amount: i64, unit: U) -> Result<Self> {
        if amount == 0 {
            return Ok(self.clone());
        }
        Self::from_signed(self.signed_entries().chain(std::iter::once((unit, amount))))
    }

    /// Subtract `amount` of `unit`.
    pub fn minus(&self, amount: i64, unit: U) -> Result<Self> {
        self.plus(safe_negate(amount)?, unit)
    }

    /// Add another duration; fails with [`Error::SignConflict`] if the sum
    /// cannot be expressed with one sign.
    pub fn plus_duration(&self, other: &Self) -> Result<Self> {
        Self::from_signed(self.signed_entries().chain(other.signed_entries()))
    }

    /// Subtract another duration.
    pub fn minus_duration(&self, other: &Self) -> Result<Self> {
        self.plus_duration(&other.negate())
    }

    /// Merge two durations.
    ///
    /// Returns a single duration if the item-wise sum has one sign, and
    /// otherwise one positive and one negative duration.  Never fails on
    /// sign conflicts; only arithmetic overflow is reported.
    pub fn union(&self, other: &Self) -> Result<Vec<Self>> {
        let sums = sum_entries(self.signed_entries().chain(other.signed_entries()))?;
        let (positive, negative): (Vec<_>, Vec<_>) = sums
            .into_iter()
            .filter(|(_, a)| *a != 0)
            .partition(|(_, a)| *a > 0);
        match (positive.is_empty(), negative.is_empty()) {
            (_, true) => Ok(vec![Self::from_sums(positive, false)?]),
            (true, false) => Ok(vec![Self::from_sums(negative, true)?]),
            (false, false) => Ok(vec![
                Self::from_sums(positive, false)?,
                Self::from_sums(negative, true)?,
            ]),
        }
    }

    /// Multiply every item by `factor` (a negative factor flips the sign).
    pub fn multiplied_by(&self, factor: i64) -> Result<Self> {
        match factor {
            0 => Ok(Self::of_zero()),
            1 => Ok(self.clone()),
            -1 => Ok(self.negate()),
            _ => {
                let mut items = Vec::with_capacity(self.items.len());
                for item in &self.items {
                    items.push(Item::new(
                        safe_mul(item.amount(), factor.abs())?,
                        item.unit(),
                    ));
                }
                Ok(Self {
                    items,
                    negative: self.negative != (factor < 0),
                }
                .fix_empty_sign())
            }
        }
    }

    /// Apply a normalizer.
    pub fn with<N: Normalizer<U> + ?Sized>(&self, normalizer: &N) -> Result<Self> {
        normalizer.normalize(self)
    }
}

impl<U: ChronoUnit> std::ops::Neg for Duration<U> {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Sum signed entries per unit after collapsing and merging units.
fn sum_entries<U: ChronoUnit>(entries: impl IntoIterator<Item = (U, i64)>) -> Result<Vec<(U, i64)>> {
    let mut sums: Vec<(U, i64)> = Vec::new();
    for (unit, amount) in entries {
        let (unit, amount) = match unit.collapse() {
            Some((target, factor)) => (target, safe_mul(amount, factor)?),
            None => (unit, amount),
        };
        accumulate(&mut sums, unit, amount)?;
    }
    // fold merge sources into their target when the target is present
    let present: Vec<U> = sums
        .iter()
        .filter(|(_, a)| *a != 0)
        .map(|(u, _)| *u)
        .collect();
    let mut merged: Vec<(U, i64)> = Vec::with_capacity(sums.len());
    for (unit, amount) in sums {
        match unit.merge_into() {
            Some((target, factor)) if present.contains(&target) => {
                accumulate(&mut merged, target, safe_mul(amount, factor)?)?;
            }
            _ => accumulate(&mut merged, unit, amount)?,
        }
    }
    Ok(merged)
}

fn accumulate<U: ChronoUnit>(sums: &mut Vec<(U, i64)>, unit: U, amount: i64) -> Result<()> {
    match sums.iter_mut().find(|(u, _)| *u == unit) {
        Some((_, total)) => *total = safe_add(*total, amount)?,
        None => sums.push((unit, amount)),
    }
    Ok(())
}

fn describe<U: ChronoUnit>(sums: &[(U, i64)]) -> String {
    sums.iter()
        .filter(|(_, a)| *a != 0)
        .map(|(u, a)| format!("{a} {u}"))
        .collect::<Vec<_>>()
        .join(", ")
}
