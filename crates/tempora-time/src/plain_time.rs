//! `PlainTime`: a wall-clock time of day, 00:00 up to and including 24:00.
//!
//! 24:00 is the end of the day.  It compares greater than every other time,
//! and arithmetic treats it like 00:00 of the following day.

use std::fmt;
use std::str::FromStr;

use tempora_core::errors::{Error, Result};
use tempora_core::{ensure, fail, NANOS_PER_DAY, NANOS_PER_SECOND};
use tempora_duration::Duration;
use tempora_units::{ClockUnit, IsoUnit};

use crate::engine::{Axis, ChronoEntity};
use crate::rules::time::TIME_AXIS;
use crate::text::Cursor;

/// A time of day with nanosecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainTime {
    hour: u8,
    minute: u8,
    second: u8,
    nano: u32,
}

/// Result of [`PlainTime::roll`]: the wall time plus the number of day
/// boundaries crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCycles {
    day_overflow: i64,
    wall_time: PlainTime,
}

impl DayCycles {
    /// Days crossed, negative when rolling backwards.
    pub fn day_overflow(&self) -> i64 {
        self.day_overflow
    }

    /// The resulting wall time (never 24:00).
    pub fn wall_time(&self) -> PlainTime {
        self.wall_time
    }
}

impl PlainTime {
    /// 00:00, the start of the day.
    pub const MIDNIGHT_AT_START: PlainTime = PlainTime {
        hour: 0,
        minute: 0,
        second: 0,
        nano: 0,
    };

    /// 24:00, the end of the day.
    pub const MIDNIGHT_AT_END: PlainTime = PlainTime {
        hour: 24,
        minute: 0,
        second: 0,
        nano: 0,
    };

    /// 23:59:59.999999999, the last time before the end of the day.
    pub(crate) const LAST: PlainTime = PlainTime {
        hour: 23,
        minute: 59,
        second: 59,
        nano: 999_999_999,
    };

    /// 12:00.
    pub const NOON: PlainTime = PlainTime {
        hour: 12,
        minute: 0,
        second: 0,
        nano: 0,
    };

    /// The time `hour:minute:second.nano`.
    ///
    /// # Errors
    ///
    /// `InvalidValue` for a component out of range, or for hour 24 with any
    /// other component non-zero.
    pub fn of(hour: u8, minute: u8, second: u8, nano: u32) -> Result<Self> {
        ensure!(hour <= 24, InvalidValue, "hour {hour} out of range [0, 24]");
        ensure!(minute <= 59, InvalidValue, "minute {minute} out of range [0, 59]");
        ensure!(second <= 59, InvalidValue, "second {second} out of range [0, 59]");
        ensure!(
            i64::from(nano) < NANOS_PER_SECOND,
            InvalidValue,
            "nanosecond {nano} out of range [0, 999999999]"
        );
        ensure!(
            hour < 24 || (minute == 0 && second == 0 && nano == 0),
            InvalidValue,
            "24:00 allows no minutes, seconds or fraction: {hour}:{minute}:{second}.{nano}"
        );
        Ok(Self {
            hour,
            minute,
            second,
            nano,
        })
    }

    /// The full minute `hour:minute`.
    pub fn of_hour_minute(hour: u8, minute: u8) -> Result<Self> {
        Self::of(hour, minute, 0, 0)
    }

    /// The time `nano_of_day` nanoseconds after midnight; a full day gives
    /// 24:00.
    pub fn of_nano_of_day(nano_of_day: i64) -> Result<Self> {
        ensure!(
            (0..=NANOS_PER_DAY).contains(&nano_of_day),
            InvalidValue,
            "nano of day {nano_of_day} out of range [0, {NANOS_PER_DAY}]"
        );
        Ok(Self::wrapped(nano_of_day))
    }

    /// Hour (0–24).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute of hour.
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Second of minute.
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Nanosecond of second.
    pub fn nanosecond(&self) -> u32 {
        self.nano
    }

    /// Seconds since midnight; 86 400 at 24:00.
    pub fn second_of_day(&self) -> i64 {
        i64::from(self.hour) * 3600 + i64::from(self.minute) * 60 + i64::from(self.second)
    }

    /// Nanoseconds since midnight; `NANOS_PER_DAY` at 24:00.
    pub fn nano_of_day(&self) -> i64 {
        self.second_of_day() * NANOS_PER_SECOND + i64::from(self.nano)
    }

    /// The finest clock unit with a non-zero value (hours if none).
    pub fn precision(&self) -> ClockUnit {
        if self.nano % 1_000 != 0 {
            ClockUnit::Nanos
        } else if self.nano % 1_000_000 != 0 {
            ClockUnit::Micros
        } else if self.nano != 0 {
            ClockUnit::Millis
        } else if self.second != 0 {
            ClockUnit::Seconds
        } else if self.minute != 0 {
            ClockUnit::Minutes
        } else {
            ClockUnit::Hours
        }
    }

    /// Whether this time is earlier than `other`.
    pub fn is_before(&self, other: &PlainTime) -> bool {
        self < other
    }

    /// Whether this time is later than `other`.
    pub fn is_after(&self, other: &PlainTime) -> bool {
        self > other
    }

    /// Whether both times are equal.
    pub fn is_simultaneous(&self, other: &PlainTime) -> bool {
        self == other
    }

    // ── Arithmetic ────────────────────────────────────────────────────────

    /// Add `amount` of `unit` and report the day boundaries crossed.
    ///
    /// ```
    /// use tempora_time::PlainTime;
    /// use tempora_units::ClockUnit;
    ///
    /// let cycles = PlainTime::of(22, 0, 0, 0).unwrap().roll(27, ClockUnit::Hours);
    /// assert_eq!(cycles.day_overflow(), 2);
    /// assert_eq!(cycles.wall_time(), PlainTime::of(1, 0, 0, 0).unwrap());
    /// ```
    pub fn roll(&self, amount: i64, unit: ClockUnit) -> DayCycles {
        if amount == 0 {
            return DayCycles {
                day_overflow: 0,
                wall_time: *self,
            };
        }
        let total = i128::from(self.nano_of_day()) + i128::from(amount) * i128::from(unit.nanos());
        let day = i128::from(NANOS_PER_DAY);
        // |amount × unit| / day fits into i64 for every clock unit
        let day_overflow = total.div_euclid(day) as i64;
        let nano_of_day = total.rem_euclid(day) as i64;
        DayCycles {
            day_overflow,
            wall_time: Self::wrapped(nano_of_day),
        }
    }

    fn wrapped(nano_of_day: i64) -> Self {
        let second_of_day = nano_of_day / NANOS_PER_SECOND;
        Self {
            hour: (second_of_day / 3600) as u8,
            minute: (second_of_day / 60 % 60) as u8,
            second: (second_of_day % 60) as u8,
            nano: (nano_of_day % NANOS_PER_SECOND) as u32,
        }
    }

    /// Add `amount` of `unit`, wrapping around midnight (24:00 + 1 h =
    /// 01:00).
    pub fn plus(&self, amount: i64, unit: ClockUnit) -> Self {
        self.roll(amount, unit).wall_time
    }

    /// Subtract `amount` of `unit`, wrapping around midnight.
    pub fn minus(&self, amount: i64, unit: ClockUnit) -> Self {
        if amount == 0 {
            return *self;
        }
        let total = i128::from(self.nano_of_day()) - i128::from(amount) * i128::from(unit.nanos());
        Self::wrapped(total.rem_euclid(i128::from(NANOS_PER_DAY)) as i64)
    }

    /// Add every item of `duration`, wrapping around midnight.
    pub fn plus_duration(&self, duration: &Duration<ClockUnit>) -> Self {
        duration
            .signed_entries()
            .fold(*self, |time, (unit, amount)| time.plus(amount, unit))
    }

    /// Subtract every item of `duration`, wrapping around midnight.
    pub fn minus_duration(&self, duration: &Duration<ClockUnit>) -> Self {
        self.plus_duration(&duration.negate())
    }

    /// Whole `unit`s from this time to `end` within the same day.
    pub fn until(&self, end: &PlainTime, unit: ClockUnit) -> i64 {
        (end.nano_of_day() - self.nano_of_day()) / unit.nanos()
    }

    /// Greedy difference in `units`, coarsest unit first.
    pub fn until_duration(&self, end: &PlainTime, units: &[ClockUnit]) -> Result<Duration<ClockUnit>> {
        let mut units = units.to_vec();
        units.sort();
        units.dedup();
        let mut remaining = end.nano_of_day() - self.nano_of_day();
        let mut entries = Vec::with_capacity(units.len());
        for unit in units {
            let amount = remaining / unit.nanos();
            remaining -= amount * unit.nanos();
            entries.push((unit, amount));
        }
        Duration::from_signed(entries)
    }
}

impl ChronoEntity for PlainTime {
    fn axis() -> &'static Axis<Self> {
        &TIME_AXIS
    }

    fn plus_in(&self, amount: i64, unit: IsoUnit) -> Result<Self> {
        match unit {
            IsoUnit::Clock(unit) => Ok(self.plus(amount, unit)),
            IsoUnit::Calendar(unit) => fail!(InvalidValue, "{unit} cannot be added to a time"),
        }
    }

    fn is_end_of_day(&self) -> bool {
        self.hour == 24
    }
}

// ── Text ─────────────────────────────────────────────────────────────────────

impl PlainTime {
    /// Write `HH:MM[:SS[.fff[fff[fff]]]]` without the `T` prefix.
    pub(crate) fn write_iso(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)?;
        if self.second == 0 && self.nano == 0 {
            return Ok(());
        }
        write!(f, ":{:02}", self.second)?;
        match self.nano {
            0 => Ok(()),
            n if n % 1_000_000 == 0 => write!(f, ".{:03}", n / 1_000_000),
            n if n % 1_000 == 0 => write!(f, ".{:06}", n / 1_000),
            n => write!(f, ".{n:09}"),
        }
    }

    /// Parse `HH[:MM[:SS[,fraction]]]` at the cursor.
    pub(crate) fn parse_at(cursor: &mut Cursor<'_>) -> Result<Self> {
        let (hour, hour_pos) = cursor.fixed(2)?;
        let (mut minute, mut second, mut nano) = (0, 0, 0);
        if cursor.eat(b':') {
            minute = cursor.fixed(2)?.0;
            if cursor.eat(b':') {
                second = cursor.fixed(2)?.0;
                nano = cursor.fraction()?.unwrap_or(0);
            }
        }
        if hour > 24 || minute > 59 || second > 59 {
            return Err(cursor.error(hour_pos, "time field out of range"));
        }
        Self::of(hour as u8, minute as u8, second as u8, nano as u32)
            .map_err(|e| cursor.error(hour_pos, e.to_string()))
    }
}

impl fmt::Display for PlainTime {
    /// ISO form with the `T` prefix: `T12:30`, `T12:30:15.500`, `T24:00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("T")?;
        self.write_iso(f)
    }
}

impl FromStr for PlainTime {
    type Err = Error;

    /// Parse `[T]HH[:MM[:SS[,f]]]`; `24:00` is accepted.
    fn from_str(s: &str) -> Result<Self> {
        let mut cursor = Cursor::new(s);
        cursor.eat(b'T');
        let time = Self::parse_at(&mut cursor)?;
        cursor.finish()?;
        Ok(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u8, m: u8, s: u8, n: u32) -> PlainTime {
        PlainTime::of(h, m, s, n).unwrap()
    }

    #[test]
    fn hour_24_only_at_full_midnight() {
        assert_eq!(time(24, 0, 0, 0), PlainTime::MIDNIGHT_AT_END);
        assert!(PlainTime::of(24, 0, 0, 1).is_err());
        assert!(PlainTime::of(25, 0, 0, 0).is_err());
        assert!(PlainTime::MIDNIGHT_AT_END > time(23, 59, 59, 999_999_999));
        assert_eq!(
            PlainTime::of_nano_of_day(NANOS_PER_DAY).unwrap(),
            PlainTime::MIDNIGHT_AT_END
        );
    }

    #[test]
    fn wrapping_arithmetic() {
        let end = PlainTime::MIDNIGHT_AT_END;
        assert_eq!(end.plus(1, ClockUnit::Hours), time(1, 0, 0, 0));
        assert_eq!(end.plus(0, ClockUnit::Hours), end);
        assert_eq!(end.minus(1, ClockUnit::Seconds), time(23, 59, 59, 0));
        assert_eq!(time(0, 0, 0, 0).minus(1, ClockUnit::Nanos), time(23, 59, 59, 999_999_999));
        let back = time(1, 0, 0, 0).roll(-2, ClockUnit::Hours);
        assert_eq!((back.day_overflow(), back.wall_time()), (-1, time(23, 0, 0, 0)));
        assert_eq!(end.roll(0, ClockUnit::Hours).wall_time(), end);
    }

    #[test]
    fn metric() {
        let start = time(10, 15, 0, 0);
        let end = time(12, 0, 30, 500_000_000);
        assert_eq!(start.until(&end, ClockUnit::Minutes), 105);
        assert_eq!(end.until(&start, ClockUnit::Hours), -1);
        let d = start
            .until_duration(&end, &[ClockUnit::Seconds, ClockUnit::Hours, ClockUnit::Minutes])
            .unwrap();
        assert_eq!(d.to_string(), "PT1H45M30S");
        assert_eq!(
            start.until(&PlainTime::MIDNIGHT_AT_END, ClockUnit::Minutes),
            825
        );
    }

    #[test]
    fn precision() {
        assert_eq!(time(10, 0, 0, 0).precision(), ClockUnit::Hours);
        assert_eq!(time(10, 0, 1, 0).precision(), ClockUnit::Seconds);
        assert_eq!(time(10, 0, 0, 1_000).precision(), ClockUnit::Micros);
    }

    #[test]
    fn text() {
        assert_eq!(time(12, 30, 0, 0).to_string(), "T12:30");
        assert_eq!(time(12, 30, 15, 500_000_000).to_string(), "T12:30:15.500");
        assert_eq!(time(12, 30, 15, 1).to_string(), "T12:30:15.000000001");
        assert_eq!(PlainTime::MIDNIGHT_AT_END.to_string(), "T24:00");
        assert_eq!("T24:00".parse::<PlainTime>().unwrap(), PlainTime::MIDNIGHT_AT_END);
        assert_eq!("12:30:15,5".parse::<PlainTime>().unwrap(), time(12, 30, 15, 500_000_000));
        assert_eq!("07".parse::<PlainTime>().unwrap(), time(7, 0, 0, 0));
        assert_eq!("24:00:01".parse::<PlainTime>().unwrap_err().error_offset(), Some(0));
        assert_eq!("12:3".parse::<PlainTime>().unwrap_err().error_offset(), Some(4));
        assert_eq!("12:30x".parse::<PlainTime>().unwrap_err().error_offset(), Some(5));
    }
}
