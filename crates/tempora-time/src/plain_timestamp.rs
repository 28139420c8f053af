//! `PlainTimestamp`: a date with a wall time, without zone.
//!
//! A timestamp never holds 24:00: [`PlainTimestamp::of`] turns the end of a
//! day into the start of the next one.

use std::fmt;
use std::str::FromStr;

use tempora_core::errors::{Error, Result};
use tempora_core::math::{floor_div, floor_mod, safe_add, safe_negate, safe_sub};
use tempora_core::{NANOS_PER_DAY, NANOS_PER_SECOND, SECONDS_PER_DAY};
use tempora_duration::{Duration, Item, Normalizer};
use tempora_scale::Moment;
use tempora_units::{by_length_descending, CalendarUnit, IsoUnit};

use crate::engine::{Axis, ChronoEntity};
use crate::plain_date::PlainDate;
use crate::plain_time::PlainTime;
use crate::rules::timestamp::TIMESTAMP_AXIS;
use crate::text::Cursor;

/// A local date-time.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainTimestamp {
    date: PlainDate,
    time: PlainTime,
}

impl PlainTimestamp {
    /// The earliest timestamp.
    pub const MIN: PlainTimestamp = PlainTimestamp {
        date: PlainDate::MIN,
        time: PlainTime::MIDNIGHT_AT_START,
    };

    /// The latest timestamp.
    pub const MAX: PlainTimestamp = PlainTimestamp {
        date: PlainDate::MAX,
        time: PlainTime::LAST,
    };

    /// `date` at `time`; `(d, 24:00)` becomes `(d + 1, 00:00)`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if 24:00 on the last supported date is given.
    pub fn of(date: PlainDate, time: PlainTime) -> Result<Self> {
        if time.is_end_of_day() {
            let next = date.plus(1, CalendarUnit::DAYS)?;
            return Ok(Self::at_midnight(next));
        }
        Ok(Self { date, time })
    }

    /// The timestamp `year-month-day` `hour:minute:second`.
    pub fn of_components(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self> {
        Self::of(
            PlainDate::of(year, month, day)?,
            PlainTime::of(hour, minute, second, 0)?,
        )
    }

    pub(crate) fn at_midnight(date: PlainDate) -> Self {
        Self {
            date,
            time: PlainTime::MIDNIGHT_AT_START,
        }
    }

    /// The calendar date.
    pub fn date(&self) -> PlainDate {
        self.date
    }

    /// The wall time (never 24:00).
    pub fn time(&self) -> PlainTime {
        self.time
    }

    /// Whether this timestamp is earlier than `other`.
    pub fn is_before(&self, other: &PlainTimestamp) -> bool {
        self < other
    }

    /// Whether this timestamp is later than `other`.
    pub fn is_after(&self, other: &PlainTimestamp) -> bool {
        self > other
    }

    /// Whether both timestamps are equal.
    pub fn is_simultaneous(&self, other: &PlainTimestamp) -> bool {
        self == other
    }

    fn total_nanos(&self) -> i128 {
        i128::from(self.date.unix_days()) * i128::from(NANOS_PER_DAY)
            + i128::from(self.time.nano_of_day())
    }
}

// ── Arithmetic ───────────────────────────────────────────────────────────────

impl PlainTimestamp {
    /// Add `amount` of `unit`.
    ///
    /// Calendar units act on the date; clock units carry into the date.
    pub fn plus(&self, amount: i64, unit: IsoUnit) -> Result<Self> {
        if amount == 0 {
            return Ok(*self);
        }
        match unit {
            IsoUnit::Calendar(unit) => Ok(Self {
                date: self.date.plus(amount, unit)?,
                time: self.time,
            }),
            IsoUnit::Clock(unit) => {
                let cycles = self.time.roll(amount, unit);
                Ok(Self {
                    date: self.date.plus(cycles.day_overflow(), CalendarUnit::DAYS)?,
                    time: cycles.wall_time(),
                })
            }
        }
    }

    /// Subtract `amount` of `unit`.
    pub fn minus(&self, amount: i64, unit: IsoUnit) -> Result<Self> {
        self.plus(safe_negate(amount)?, unit)
    }

    /// Add every item of `duration`, largest unit first.
    pub fn plus_duration(&self, duration: &Duration<IsoUnit>) -> Result<Self> {
        duration
            .signed_entries()
            .try_fold(*self, |ts, (unit, amount)| ts.plus(amount, unit))
    }

    /// Subtract every item of `duration`.
    pub fn minus_duration(&self, duration: &Duration<IsoUnit>) -> Result<Self> {
        self.plus_duration(&duration.negate())
    }

    /// Whole `unit`s from this timestamp to `end`.
    pub fn until(&self, end: &PlainTimestamp, unit: IsoUnit) -> Result<i64> {
        match unit {
            IsoUnit::Clock(clock) => {
                let amount = (end.total_nanos() - self.total_nanos()) / i128::from(clock.nanos());
                i64::try_from(amount).map_err(|_| {
                    Error::ArithmeticOverflow(format!("{amount} {clock} exceed the i64 range"))
                })
            }
            IsoUnit::Calendar(calendar) => {
                let mut amount = self.date.until(&end.date, calendar)?;
                while amount > 0 && self.plus(amount, unit)? > *end {
                    amount -= 1;
                }
                while amount < 0 && self.plus(amount, unit)? < *end {
                    amount += 1;
                }
                Ok(amount)
            }
        }
    }

    /// Greedy difference in `units`, largest unit first.
    ///
    /// ```
    /// use tempora_time::PlainTimestamp;
    /// use tempora_units::IsoUnit;
    ///
    /// let start = PlainTimestamp::of_components(2012, 2, 29, 17, 0, 0).unwrap();
    /// let end = PlainTimestamp::of_components(2012, 3, 2, 9, 30, 0).unwrap();
    /// let d = start
    ///     .until_duration(&end, &[IsoUnit::DAYS, IsoUnit::HOURS, IsoUnit::MINUTES])
    ///     .unwrap();
    /// assert_eq!(d.to_string(), "P1DT16H30M");
    /// ```
    pub fn until_duration(
        &self,
        end: &PlainTimestamp,
        units: &[IsoUnit],
    ) -> Result<Duration<IsoUnit>> {
        let mut units = units.to_vec();
        units.sort_by(by_length_descending);
        units.dedup();
        let mut current = *self;
        let mut entries = Vec::with_capacity(units.len());
        for unit in units {
            let amount = current.until(end, unit)?;
            if amount != 0 {
                current = current.plus(amount, unit)?;
                entries.push((unit, amount));
            }
        }
        Duration::from_signed(entries)
    }
}

impl ChronoEntity for PlainTimestamp {
    fn axis() -> &'static Axis<Self> {
        &TIMESTAMP_AXIS
    }

    fn plus_in(&self, amount: i64, unit: IsoUnit) -> Result<Self> {
        self.plus(amount, unit)
    }
}

/// A start timestamp normalizes a duration into the same units measured
/// from itself (`P1DT36H` from 2012-02-28T12:00 becomes `P2DT12H`).
impl Normalizer<IsoUnit> for PlainTimestamp {
    fn normalize(&self, duration: &Duration<IsoUnit>) -> Result<Duration<IsoUnit>> {
        let end = self.plus_duration(duration)?;
        let units: Vec<IsoUnit> = duration.items().iter().map(Item::unit).collect();
        self.until_duration(&end, &units)
    }
}

// ── Instants ─────────────────────────────────────────────────────────────────

impl PlainTimestamp {
    /// This timestamp read as UTC wall time.
    pub fn at_utc(&self) -> Result<Moment> {
        self.at_offset(0)
    }

    /// This timestamp read as wall time at `offset_seconds` east of UTC.
    pub fn at_offset(&self, offset_seconds: i32) -> Result<Moment> {
        let local = safe_add(
            self.date.unix_days() * SECONDS_PER_DAY,
            self.time.second_of_day(),
        )?;
        let posix = safe_sub(local, i64::from(offset_seconds))?;
        Moment::of_posix(posix, self.time.nanosecond() as i32)
    }

    /// The wall time of `moment` at `offset_seconds` east of UTC.
    ///
    /// A leap second has the civil seconds of the preceding second and maps
    /// to `23:59:59`.
    pub fn of_moment(moment: &Moment, offset_seconds: i32) -> Result<Self> {
        let local = safe_add(moment.posix_seconds(), i64::from(offset_seconds))?;
        let date = PlainDate::from_unix_days(floor_div(local, SECONDS_PER_DAY))?;
        let second_of_day = floor_mod(local, SECONDS_PER_DAY);
        let nano_of_day = second_of_day * NANOS_PER_SECOND + i64::from(moment.nanosecond());
        Ok(Self {
            date,
            time: PlainTime::of_nano_of_day(nano_of_day)?,
        })
    }
}

/// Conversion of instants into local timestamps.
pub trait MomentExt {
    /// The UTC wall time of this instant.
    fn to_timestamp_utc(&self) -> Result<PlainTimestamp>;

    /// The wall time of this instant at `offset_seconds` east of UTC.
    fn to_timestamp_at_offset(&self, offset_seconds: i32) -> Result<PlainTimestamp>;
}

impl MomentExt for Moment {
    fn to_timestamp_utc(&self) -> Result<PlainTimestamp> {
        PlainTimestamp::of_moment(self, 0)
    }

    fn to_timestamp_at_offset(&self, offset_seconds: i32) -> Result<PlainTimestamp> {
        PlainTimestamp::of_moment(self, offset_seconds)
    }
}

// ── Text ─────────────────────────────────────────────────────────────────────

impl fmt::Display for PlainTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.date, self.time)
    }
}

impl FromStr for PlainTimestamp {
    type Err = Error;

    /// Parse `YYYY-MM-DDTHH[:MM[:SS[,f]]]`; `T24:00` denotes the start of
    /// the next day.
    fn from_str(s: &str) -> Result<Self> {
        let mut cursor = Cursor::new(s);
        let date = PlainDate::parse_at(&mut cursor)?;
        cursor.expect(b'T')?;
        let time_pos = cursor.pos();
        let time = PlainTime::parse_at(&mut cursor)?;
        cursor.finish()?;
        Self::of(date, time).map_err(|e| cursor.error(time_pos, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_units::ClockUnit;

    fn ts(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> PlainTimestamp {
        PlainTimestamp::of_components(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn end_of_day_is_applied_once() {
        let date = PlainDate::of(2012, 2, 29).unwrap();
        let t = PlainTimestamp::of(date, PlainTime::MIDNIGHT_AT_END).unwrap();
        assert_eq!(t, ts(2012, 3, 1, 0, 0, 0));
        assert!(PlainTimestamp::of(PlainDate::MAX, PlainTime::MIDNIGHT_AT_END).is_err());
    }

    #[test]
    fn clock_units_carry() {
        let t = ts(2012, 12, 31, 23, 59, 59);
        assert_eq!(t.plus(1, IsoUnit::SECONDS).unwrap(), ts(2013, 1, 1, 0, 0, 0));
        assert_eq!(
            t.plus(-48, ClockUnit::Hours.into()).unwrap(),
            ts(2012, 12, 29, 23, 59, 59)
        );
        let nano = t.plus(1_000_000_001, IsoUnit::NANOS).unwrap();
        assert_eq!(nano.date(), PlainDate::of(2013, 1, 1).unwrap());
        assert_eq!(nano.time(), PlainTime::of(0, 0, 0, 1).unwrap());
        assert_eq!(t.plus(0, IsoUnit::MONTHS).unwrap(), t);
        assert_eq!(
            ts(2013, 1, 31, 9, 0, 0).plus(1, IsoUnit::MONTHS).unwrap(),
            ts(2013, 2, 28, 9, 0, 0)
        );
    }

    #[test]
    fn metric_respects_the_time() {
        let start = ts(2013, 1, 31, 12, 0, 0);
        assert_eq!(start.until(&ts(2013, 2, 28, 10, 0, 0), IsoUnit::MONTHS).unwrap(), 0);
        assert_eq!(start.until(&ts(2013, 2, 28, 12, 0, 0), IsoUnit::MONTHS).unwrap(), 1);
        assert_eq!(start.until(&ts(2013, 2, 1, 11, 0, 0), IsoUnit::DAYS).unwrap(), 0);
        assert_eq!(start.until(&ts(2013, 1, 30, 13, 0, 0), IsoUnit::HOURS).unwrap(), -23);
    }

    #[test]
    fn relative_normalization() {
        let start = ts(2012, 2, 28, 12, 0, 0);
        let d = Duration::<IsoUnit>::parse("P1DT36H").unwrap();
        // 2012-02-29T12:00 + 36 h = 2012-03-02T00:00
        let normalized = d.with(&start).unwrap();
        assert_eq!(normalized.to_string(), "P2DT12H");
        assert_eq!(normalized.with(&start).unwrap(), normalized);
    }

    #[test]
    fn instants() {
        let t = ts(2012, 6, 30, 23, 59, 59);
        let m = t.at_utc().unwrap();
        assert_eq!(m.posix_seconds(), 1_341_100_799);
        assert_eq!(m.to_timestamp_utc().unwrap(), t);
        let shifted = t.at_offset(3600).unwrap();
        assert_eq!(shifted.posix_seconds(), 1_341_097_199);
        assert_eq!(shifted.to_timestamp_at_offset(3600).unwrap(), t);
        let before = ts(1969, 12, 31, 23, 0, 0).at_utc().unwrap();
        assert_eq!(before.posix_seconds(), -3600);
        assert_eq!(before.to_timestamp_utc().unwrap(), ts(1969, 12, 31, 23, 0, 0));
    }

    #[test]
    fn text() {
        let t = ts(2012, 2, 29, 12, 30, 0);
        assert_eq!(t.to_string(), "2012-02-29T12:30");
        assert_eq!("2012-02-29T12:30".parse::<PlainTimestamp>().unwrap(), t);
        assert_eq!(
            "2012-02-29T24:00".parse::<PlainTimestamp>().unwrap(),
            ts(2012, 3, 1, 0, 0, 0)
        );
        assert_eq!(
            "2012-02-29 12:30".parse::<PlainTimestamp>().unwrap_err().error_offset(),
            Some(10)
        );
    }
}
