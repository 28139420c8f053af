//! Normalizers rewrite a duration into an equivalent one with a canonical
//! set of units.
//!
//! Every normalizer in this module is idempotent.  Units with a custom
//! overflow policy and week-based years are never converted because they
//! have no fixed ratio to the canonical units.

use crate::duration::Duration;
use tempora_core::errors::{Error, Result};
use tempora_core::math::{safe_add, safe_mul};
use tempora_core::NANOS_PER_DAY;
use tempora_units::{CalendarUnit, CalendarUnitKind, ChronoUnit, ClockUnit, IsoUnit};

/// Strategy rewriting a duration into a normalized form.
pub trait Normalizer<U: ChronoUnit> {
    /// The normalized duration.
    fn normalize(&self, duration: &Duration<U>) -> Result<Duration<U>>;
}

/// Full normalization of mixed durations.
///
/// * millennia, centuries, decades, years, quarters and months become
///   years and months (`12 months = 1 year`);
/// * weeks become days;
/// * the clock part is decomposed into hours, minutes, seconds and
///   nanoseconds, and every 24 hours become one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdPeriod;

/// Normalization of the calendar part only (the clock part is kept as is).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdCalendarPeriod;

/// Normalization of the clock part only, with unbounded hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdClockPeriod;

impl Normalizer<IsoUnit> for StdPeriod {
    fn normalize(&self, duration: &Duration<IsoUnit>) -> Result<Duration<IsoUnit>> {
        let (mut calendar, clock) = split(duration);
        let (days, clock) = normalize_clock(&clock, true)?;
        if days > 0 {
            calendar.push((CalendarUnit::DAYS, days));
        }
        let calendar = normalize_calendar(&calendar)?;
        rebuild(duration.is_negative(), &calendar, &clock)
    }
}

impl Normalizer<IsoUnit> for StdCalendarPeriod {
    fn normalize(&self, duration: &Duration<IsoUnit>) -> Result<Duration<IsoUnit>> {
        let (calendar, clock) = split(duration);
        rebuild(duration.is_negative(), &normalize_calendar(&calendar)?, &clock)
    }
}

impl Normalizer<CalendarUnit> for StdCalendarPeriod {
    fn normalize(&self, duration: &Duration<CalendarUnit>) -> Result<Duration<CalendarUnit>> {
        let entries: Vec<_> = duration.items().iter().map(|i| (i.unit(), i.amount())).collect();
        let normalized = normalize_calendar(&entries)?;
        Duration::from_signed(signed(duration.is_negative(), normalized))
    }
}

impl Normalizer<IsoUnit> for StdClockPeriod {
    fn normalize(&self, duration: &Duration<IsoUnit>) -> Result<Duration<IsoUnit>> {
        let (calendar, clock) = split(duration);
        let (_, clock) = normalize_clock(&clock, false)?;
        rebuild(duration.is_negative(), &calendar, &clock)
    }
}

impl Normalizer<ClockUnit> for StdClockPeriod {
    fn normalize(&self, duration: &Duration<ClockUnit>) -> Result<Duration<ClockUnit>> {
        let entries: Vec<_> = duration.items().iter().map(|i| (i.unit(), i.amount())).collect();
        let (_, normalized) = normalize_clock(&entries, false)?;
        Duration::from_signed(signed(duration.is_negative(), normalized))
    }
}

type CalendarEntries = Vec<(CalendarUnit, i64)>;
type ClockEntries = Vec<(ClockUnit, i64)>;

fn split(duration: &Duration<IsoUnit>) -> (CalendarEntries, ClockEntries) {
    let mut calendar = Vec::new();
    let mut clock = Vec::new();
    for item in duration.items() {
        match item.unit() {
            IsoUnit::Calendar(u) => calendar.push((u, item.amount())),
            IsoUnit::Clock(u) => clock.push((u, item.amount())),
        }
    }
    (calendar, clock)
}

fn signed<U>(negative: bool, entries: Vec<(U, i64)>) -> impl Iterator<Item = (U, i64)> {
    entries
        .into_iter()
        .map(move |(u, a)| (u, if negative { -a } else { a }))
}

fn rebuild(
    negative: bool,
    calendar: &[(CalendarUnit, i64)],
    clock: &[(ClockUnit, i64)],
) -> Result<Duration<IsoUnit>> {
    let entries: Vec<(IsoUnit, i64)> = calendar
        .iter()
        .map(|(u, a)| (IsoUnit::Calendar(*u), *a))
        .chain(clock.iter().map(|(u, a)| (IsoUnit::Clock(*u), *a)))
        .collect();
    Duration::from_signed(signed(negative, entries))
}

/// Fold month-based units into years and months and weeks into days.
fn normalize_calendar(entries: &[(CalendarUnit, i64)]) -> Result<CalendarEntries> {
    let mut months = 0i64;
    let mut days = 0i64;
    let mut kept = Vec::new();
    for &(unit, amount) in entries {
        if !unit.is_default_policy() || unit.kind() == CalendarUnitKind::WeekBasedYears {
            kept.push((unit, amount));
        } else if let Some(factor) = unit.months_factor() {
            months = safe_add(months, safe_mul(amount, factor)?)?;
        } else if let Some(factor) = unit.days_factor() {
            days = safe_add(days, safe_mul(amount, factor)?)?;
        }
    }
    kept.push((CalendarUnit::YEARS, months / 12));
    kept.push((CalendarUnit::MONTHS, months % 12));
    kept.push((CalendarUnit::DAYS, days));
    kept.retain(|(_, a)| *a != 0);
    Ok(kept)
}

/// Decompose the clock part into hours, minutes, seconds and nanoseconds.
///
/// With `carry_days` set, whole days are split off and returned separately.
fn normalize_clock(entries: &[(ClockUnit, i64)], carry_days: bool) -> Result<(i64, ClockEntries)> {
    let total: i128 = entries
        .iter()
        .map(|(u, a)| i128::from(*a) * i128::from(u.nanos()))
        .sum();
    let (days, rest) = if carry_days {
        let day = i128::from(NANOS_PER_DAY);
        (narrow(total / day)?, total % day)
    } else {
        (0, total)
    };
    let mut out = Vec::with_capacity(4);
    let mut remainder = rest;
    for unit in [ClockUnit::Hours, ClockUnit::Minutes, ClockUnit::Seconds] {
        let factor = i128::from(unit.nanos());
        let amount = narrow(remainder / factor)?;
        remainder %= factor;
        if amount != 0 {
            out.push((unit, amount));
        }
    }
    if remainder != 0 {
        out.push((ClockUnit::Nanos, narrow(remainder)?));
    }
    Ok((days, out))
}

fn narrow(value: i128) -> Result<i64> {
    i64::try_from(value)
        .map_err(|_| Error::ArithmeticOverflow(format!("{value} does not fit into i64")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(entries: &[(IsoUnit, i64)]) -> Duration<IsoUnit> {
        Duration::from_signed(entries.iter().copied()).unwrap()
    }

    #[test]
    fn std_period_folds_everything() {
        let d = iso(&[
            (IsoUnit::MONTHS, 14),
            (IsoUnit::WEEKS, 1),
            (IsoUnit::HOURS, 50),
            (IsoUnit::MINUTES, 61),
            (IsoUnit::NANOS, 1_500_000_000),
        ]);
        let n = d.with(&StdPeriod).unwrap();
        assert_eq!(
            n,
            iso(&[
                (IsoUnit::YEARS, 1),
                (IsoUnit::MONTHS, 2),
                (IsoUnit::DAYS, 9),
                (IsoUnit::HOURS, 3),
                (IsoUnit::MINUTES, 1),
                (IsoUnit::SECONDS, 1),
                (IsoUnit::NANOS, 500_000_000),
            ])
        );
        assert_eq!(n.with(&StdPeriod).unwrap(), n);
    }

    #[test]
    fn decades_and_quarters_fold() {
        let d = iso(&[
            (IsoUnit::Calendar(CalendarUnit::DECADES), 1),
            (IsoUnit::Calendar(CalendarUnit::QUARTERS), 5),
        ]);
        let n = d.with(&StdPeriod).unwrap();
        assert_eq!(n, iso(&[(IsoUnit::YEARS, 11), (IsoUnit::MONTHS, 3)]));
    }

    #[test]
    fn custom_policies_are_untouched() {
        let carry = IsoUnit::Calendar(CalendarUnit::MONTHS.with_carry_over());
        let d = iso(&[(carry, 13), (IsoUnit::MONTHS, 13)]);
        let n = d.with(&StdPeriod).unwrap();
        assert_eq!(n.get_partial_amount(carry), 13);
        assert_eq!(n.get_partial_amount(IsoUnit::YEARS), 1);
        assert_eq!(n.get_partial_amount(IsoUnit::MONTHS), 1);
    }

    #[test]
    fn clock_period_keeps_hours_unbounded() {
        let d = Duration::of_clock_units(25, 90, 0).unwrap();
        let n = d.with(&StdClockPeriod).unwrap();
        assert_eq!(n, Duration::of_clock_units(26, 30, 0).unwrap());
    }

    #[test]
    fn sign_is_preserved() {
        let d = iso(&[(IsoUnit::MONTHS, -15), (IsoUnit::SECONDS, -60)]);
        let n = d.with(&StdPeriod).unwrap();
        assert!(n.is_negative());
        assert_eq!(n.signed_amount(IsoUnit::YEARS), -1);
        assert_eq!(n.signed_amount(IsoUnit::MONTHS), -3);
        assert_eq!(n.signed_amount(IsoUnit::MINUTES), -1);
    }

    #[test]
    fn calendar_period_only_touches_calendar_part() {
        let d = iso(&[(IsoUnit::MONTHS, 24), (IsoUnit::MINUTES, 120)]);
        let n = d.with(&StdCalendarPeriod).unwrap();
        assert_eq!(n, iso(&[(IsoUnit::YEARS, 2), (IsoUnit::MINUTES, 120)]));
    }
}
