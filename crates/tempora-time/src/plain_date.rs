//! `PlainDate`: a proleptic gregorian calendar date without time or zone.
//!
//! Years range over ±999,999,999.  Arithmetic is done on unix epoch days
//! (day 0 = 1970-01-01) for day-based units and on proleptic months for
//! month-based units, whose overflow policy decides what happens when the
//! target month is too short for the day of month.

use std::fmt;
use std::str::FromStr;

use tempora_core::errors::{Error, Result};
use tempora_core::gregorian::{
    date_of_epoch_day, day_of_year, epoch_day, is_leap_year, iso_day_of_week, length_of_month,
    length_of_year,
};
use tempora_core::math::{floor_div, floor_mod, safe_add, safe_mul, safe_negate, safe_sub};
use tempora_core::{ensure, fail};
use tempora_duration::{Duration, Item, Normalizer};
use tempora_units::{by_length_descending, CalendarUnit, IsoUnit, OverflowPolicy};

use crate::engine::{Axis, ChronoEntity};
use crate::epoch_days::EpochDays;
use crate::month::Month;
use crate::plain_time::PlainTime;
use crate::plain_timestamp::PlainTimestamp;
use crate::quarter::Quarter;
use crate::rules::date::DATE_AXIS;
use crate::text::Cursor;
use crate::weekday::Weekday;
use crate::weekmodel::Weekmodel;

/// Largest absolute year.
pub(crate) const MAX_YEAR: i32 = 999_999_999;

/// A calendar date.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainDate {
    year: i32,
    month: u8,
    day: u8,
}

fn check_year(year: i64) -> Result<i32> {
    ensure!(
        (-i64::from(MAX_YEAR)..=i64::from(MAX_YEAR)).contains(&year),
        OutOfRange,
        "year {year} out of range [-{MAX_YEAR}, {MAX_YEAR}]"
    );
    Ok(year as i32)
}

// ── Construction ─────────────────────────────────────────────────────────────

impl PlainDate {
    /// The earliest date, `-999999999-01-01`.
    pub const MIN: PlainDate = PlainDate {
        year: -MAX_YEAR,
        month: 1,
        day: 1,
    };

    /// The latest date, `+999999999-12-31`.
    pub const MAX: PlainDate = PlainDate {
        year: MAX_YEAR,
        month: 12,
        day: 31,
    };

    /// The date `year-month-day`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the year exceeds ±999,999,999; `InvalidValue` for a
    /// month outside 1–12 or a day the month does not have.
    pub fn of(year: i32, month: u8, day: u8) -> Result<Self> {
        check_year(i64::from(year))?;
        ensure!(
            (1..=12).contains(&month),
            InvalidValue,
            "month {month} out of range [1, 12]"
        );
        let len = length_of_month(i64::from(year), month);
        ensure!(
            (1..=len).contains(&day),
            InvalidValue,
            "day {day} out of range [1, {len}] for {year}-{month:02}"
        );
        Ok(Self { year, month, day })
    }

    /// The date `year-month-day` with a typed month.
    pub fn of_month(year: i32, month: Month, day: u8) -> Result<Self> {
        Self::of(year, month.number(), day)
    }

    /// The `day_of_year`-th day (1-based) of `year`.
    pub fn of_year_day(year: i32, day_of_year: u16) -> Result<Self> {
        let y = i64::from(check_year(i64::from(year))?);
        let len = length_of_year(y);
        ensure!(
            (1..=len).contains(&day_of_year),
            InvalidValue,
            "day of year {day_of_year} out of range [1, {len}] for {year}"
        );
        Self::from_unix_days(epoch_day(y, 1, 1) + i64::from(day_of_year) - 1)
    }

    /// The date of an ISO week date (`2009-W01-1` is 2008-12-29).
    pub fn of_week_date(year_of_weekdate: i32, week: u8, weekday: Weekday) -> Result<Self> {
        let iso = Weekmodel::ISO;
        let y = i64::from(check_year(i64::from(year_of_weekdate))?);
        let weeks = iso.weeks_in_year(y);
        ensure!(
            (1..=weeks).contains(&i64::from(week)),
            InvalidValue,
            "week {week} out of range [1, {weeks}] for week-based year {y}"
        );
        let start = iso.first_week_start(y);
        Self::from_unix_days(start + (i64::from(week) - 1) * 7 + i64::from(weekday.ordinal()) - 1)
    }

    /// The date `value` days after the epoch of `system`.
    pub fn of_epoch_day(value: i64, system: EpochDays) -> Result<Self> {
        Self::from_unix_days(system.to_unix(value)?)
    }

    pub(crate) fn from_unix_days(unix: i64) -> Result<Self> {
        ensure!(
            (Self::MIN.unix_days()..=Self::MAX.unix_days()).contains(&unix),
            OutOfRange,
            "epoch day {unix} out of the supported date range"
        );
        let (year, month, day) = date_of_epoch_day(unix);
        Ok(Self {
            year: year as i32,
            month,
            day,
        })
    }
}

// ── Accessors ────────────────────────────────────────────────────────────────

impl PlainDate {
    /// Proleptic ISO year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month of year.
    pub fn month(&self) -> Month {
        Month::from_number(self.month).unwrap_or(Month::January)
    }

    /// Month of year as number (1–12).
    pub fn month_number(&self) -> u8 {
        self.month
    }

    /// Day of month.
    pub fn day_of_month(&self) -> u8 {
        self.day
    }

    /// Day of year (1–366).
    pub fn day_of_year(&self) -> u16 {
        day_of_year(i64::from(self.year), self.month, self.day)
    }

    /// Quarter of year.
    pub fn quarter(&self) -> Quarter {
        self.month().quarter()
    }

    /// Day of quarter (1–92).
    pub fn day_of_quarter(&self) -> u8 {
        let first = self.quarter().first_month().number();
        let before: u8 = (first..self.month)
            .map(|m| length_of_month(i64::from(self.year), m))
            .sum();
        before + self.day
    }

    /// Number of days in the quarter of this date.
    pub fn length_of_quarter(&self) -> u8 {
        let first = self.quarter().first_month().number();
        (first..first + 3)
            .map(|m| length_of_month(i64::from(self.year), m))
            .sum()
    }

    /// ISO day of week.
    pub fn day_of_week(&self) -> Weekday {
        Weekday::from_ordinal(iso_day_of_week(self.unix_days())).unwrap_or(Weekday::Monday)
    }

    /// Number of days in the month of this date.
    pub fn length_of_month(&self) -> u8 {
        length_of_month(i64::from(self.year), self.month)
    }

    /// Number of days in the year of this date.
    pub fn length_of_year(&self) -> u16 {
        length_of_year(i64::from(self.year))
    }

    /// Whether the year of this date is a leap year.
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(i64::from(self.year))
    }

    /// Day count of this date in `system`.
    pub fn epoch_day(&self, system: EpochDays) -> Result<i64> {
        system.from_unix(self.unix_days())
    }

    pub(crate) fn unix_days(&self) -> i64 {
        epoch_day(i64::from(self.year), self.month, self.day)
    }

    /// The date in `year`-`month` with `day` clamped to the month length.
    pub(crate) fn with_clamped(year: i64, month: u8, day: u8) -> Result<Self> {
        let year = check_year(year)?;
        let day = day.min(length_of_month(i64::from(year), month));
        Ok(Self { year, month, day })
    }

    pub(crate) fn proleptic_month(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Whether this date is earlier than `other`.
    pub fn is_before(&self, other: &PlainDate) -> bool {
        self < other
    }

    /// Whether this date is later than `other`.
    pub fn is_after(&self, other: &PlainDate) -> bool {
        self > other
    }

    /// Whether both dates denote the same day.
    pub fn is_simultaneous(&self, other: &PlainDate) -> bool {
        self == other
    }

    /// This date at `time`; 24:00 yields the start of the next day.
    pub fn at_time(&self, time: PlainTime) -> Result<PlainTimestamp> {
        PlainTimestamp::of(*self, time)
    }

    /// This date at 00:00.
    pub fn at_start_of_day(&self) -> PlainTimestamp {
        PlainTimestamp::at_midnight(*self)
    }
}

// ── Arithmetic ───────────────────────────────────────────────────────────────

impl PlainDate {
    /// Add `amount` of `unit`.
    ///
    /// Month-based units resolve a nonexistent day with the unit's overflow
    /// policy; week-based years keep the week (week 53 becomes 52) and the
    /// weekday.
    ///
    /// ```
    /// use tempora_time::PlainDate;
    /// use tempora_units::CalendarUnit;
    ///
    /// let leap = PlainDate::of(2012, 2, 29).unwrap();
    /// assert_eq!(leap.plus(1, CalendarUnit::YEARS).unwrap(), PlainDate::of(2013, 2, 28).unwrap());
    /// ```
    pub fn plus(&self, amount: i64, unit: CalendarUnit) -> Result<Self> {
        if amount == 0 {
            return Ok(*self);
        }
        match (unit.months_factor(), unit.days_factor()) {
            (Some(factor), _) => self.plus_months(safe_mul(amount, factor)?, unit.policy()),
            (_, Some(factor)) => {
                Self::from_unix_days(safe_add(self.unix_days(), safe_mul(amount, factor)?)?)
            }
            _ => self.plus_week_based_years(amount),
        }
    }

    /// Subtract `amount` of `unit`.
    pub fn minus(&self, amount: i64, unit: CalendarUnit) -> Result<Self> {
        self.plus(safe_negate(amount)?, unit)
    }

    /// Add every item of `duration`, largest unit first.
    pub fn plus_duration(&self, duration: &Duration<CalendarUnit>) -> Result<Self> {
        duration
            .signed_entries()
            .try_fold(*self, |date, (unit, amount)| date.plus(amount, unit))
    }

    /// Subtract every item of `duration`.
    pub fn minus_duration(&self, duration: &Duration<CalendarUnit>) -> Result<Self> {
        self.plus_duration(&duration.negate())
    }

    fn plus_months(&self, months: i64, policy: OverflowPolicy) -> Result<Self> {
        let total = safe_add(self.proleptic_month(), months)?;
        let year = i64::from(check_year(floor_div(total, 12))?);
        let month = (floor_mod(total, 12) + 1) as u8;
        let len = length_of_month(year, month);
        if self.day <= len {
            let day = match policy {
                OverflowPolicy::AtEndOfMonth => len,
                OverflowPolicy::KeepingEndOfMonth if self.day == self.length_of_month() => len,
                _ => self.day,
            };
            return Self::of(year as i32, month, day);
        }
        let last = epoch_day(year, month, len);
        match policy {
            OverflowPolicy::PreviousValidDate
            | OverflowPolicy::KeepingEndOfMonth
            | OverflowPolicy::AtEndOfMonth => Self::of(year as i32, month, len),
            OverflowPolicy::NextValidDate => Self::from_unix_days(last + 1),
            OverflowPolicy::CarryOver => {
                Self::from_unix_days(last + i64::from(self.day - len))
            }
            OverflowPolicy::UnlessInvalid => fail!(
                InvalidValue,
                "{self} plus {months} months has no day {} in {year}-{month:02}",
                self.day
            ),
        }
    }

    pub(crate) fn plus_week_based_years(&self, amount: i64) -> Result<Self> {
        let iso = Weekmodel::ISO;
        let (week_year, week) = iso.week_date(self.unix_days());
        let target = i64::from(check_year(safe_add(week_year, amount)?)?);
        let week = week.min(iso.weeks_in_year(target));
        let weekday = i64::from(iso_day_of_week(self.unix_days()));
        Self::from_unix_days(iso.first_week_start(target) + (week - 1) * 7 + weekday - 1)
    }

    /// Number of whole `unit`s from this date to `end` (negative if `end`
    /// is earlier).
    pub fn until(&self, end: &PlainDate, unit: CalendarUnit) -> Result<i64> {
        match (unit.months_factor(), unit.days_factor()) {
            (Some(factor), _) => Ok(self.months_until(end, unit.policy())? / factor),
            (_, Some(factor)) => Ok(safe_sub(end.unix_days(), self.unix_days())? / factor),
            _ => self.week_based_years_until(end),
        }
    }

    /// Greedy difference in `units`, largest unit first.
    ///
    /// ```
    /// use tempora_time::PlainDate;
    /// use tempora_units::CalendarUnit;
    ///
    /// let start = PlainDate::of(2012, 1, 31).unwrap();
    /// let end = PlainDate::of(2013, 3, 2).unwrap();
    /// let d = start
    ///     .until_duration(&end, &[CalendarUnit::YEARS, CalendarUnit::MONTHS, CalendarUnit::DAYS])
    ///     .unwrap();
    /// assert_eq!(d.to_string(), "P1Y1M2D");
    /// ```
    pub fn until_duration(
        &self,
        end: &PlainDate,
        units: &[CalendarUnit],
    ) -> Result<Duration<CalendarUnit>> {
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

    fn months_until(&self, end: &PlainDate, policy: OverflowPolicy) -> Result<i64> {
        // a failing policy would abort the metric, clamping measures the same
        let policy = match policy {
            OverflowPolicy::UnlessInvalid => OverflowPolicy::PreviousValidDate,
            p => p,
        };
        let mut delta = safe_sub(end.proleptic_month(), self.proleptic_month())?;
        while delta > 0 && self.plus_months(delta, policy)? > *end {
            delta -= 1;
        }
        while delta < 0 && self.plus_months(delta, policy)? < *end {
            delta += 1;
        }
        Ok(delta)
    }

    fn week_based_years_until(&self, end: &PlainDate) -> Result<i64> {
        let iso = Weekmodel::ISO;
        let mut delta = iso.week_date(end.unix_days()).0 - iso.week_date(self.unix_days()).0;
        while delta > 0 && self.plus_week_based_years(delta)? > *end {
            delta -= 1;
        }
        while delta < 0 && self.plus_week_based_years(delta)? < *end {
            delta += 1;
        }
        Ok(delta)
    }
}

impl ChronoEntity for PlainDate {
    fn axis() -> &'static Axis<Self> {
        &DATE_AXIS
    }

    fn plus_in(&self, amount: i64, unit: IsoUnit) -> Result<Self> {
        match unit {
            IsoUnit::Calendar(unit) => self.plus(amount, unit),
            IsoUnit::Clock(unit) => fail!(InvalidValue, "{unit} cannot be added to a date"),
        }
    }
}

/// A start date normalizes a duration into the same units measured from
/// itself (`P13M` stays `P13M`, `P1M40D` from January 31st becomes `P2M9D`
/// with units months and days).
impl Normalizer<CalendarUnit> for PlainDate {
    fn normalize(&self, duration: &Duration<CalendarUnit>) -> Result<Duration<CalendarUnit>> {
        let end = self.plus_duration(duration)?;
        let units: Vec<CalendarUnit> = duration.items().iter().map(Item::unit).collect();
        self.until_duration(&end, &units)
    }
}

// ── Text ─────────────────────────────────────────────────────────────────────

impl fmt::Display for PlainDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            0..=9999 => write!(f, "{:04}", self.year)?,
            y if y < 0 => write!(f, "-{:04}", -i64::from(y))?,
            y => write!(f, "+{y}")?,
        }
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

impl PlainDate {
    /// Parse `YYYY-MM-DD` or an expanded `±YYYYY-MM-DD` at the cursor.
    pub(crate) fn parse_at(cursor: &mut Cursor<'_>) -> Result<Self> {
        let negative = cursor.eat(b'-');
        let signed = negative || cursor.eat(b'+');
        let (year, _) = if signed {
            cursor.digits(4, 9)?
        } else {
            cursor.fixed(4)?
        };
        let year = if negative { -year } else { year };
        cursor.expect(b'-')?;
        let (month, month_pos) = cursor.fixed(2)?;
        cursor.expect(b'-')?;
        let (day, day_pos) = cursor.fixed(2)?;
        if !(1..=12).contains(&month) {
            return Err(cursor.error(month_pos, format!("month {month} out of range [1, 12]")));
        }
        let len = length_of_month(year, month as u8);
        if !(1..=i64::from(len)).contains(&day) {
            return Err(cursor.error(day_pos, format!("day {day} out of range [1, {len}]")));
        }
        Ok(Self {
            year: year as i32,
            month: month as u8,
            day: day as u8,
        })
    }
}

impl FromStr for PlainDate {
    type Err = Error;

    /// Parse the ISO extended form (`2012-02-29`, `-0044-03-15`,
    /// `+12345-01-01`).
    fn from_str(s: &str) -> Result<Self> {
        let mut cursor = Cursor::new(s);
        let date = Self::parse_at(&mut cursor)?;
        cursor.finish()?;
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> PlainDate {
        PlainDate::of(y, m, d).unwrap()
    }

    #[test]
    fn construction_errors() {
        assert!(matches!(PlainDate::of(2013, 2, 29), Err(Error::InvalidValue(_))));
        assert!(matches!(PlainDate::of(2013, 13, 1), Err(Error::InvalidValue(_))));
        assert!(matches!(
            PlainDate::of(1_000_000_000, 1, 1),
            Err(Error::OutOfRange(_))
        ));
        assert_eq!(PlainDate::of_year_day(2012, 60).unwrap(), date(2012, 2, 29));
        assert!(PlainDate::of_year_day(2013, 366).is_err());
        assert_eq!(
            PlainDate::of_week_date(2009, 1, Weekday::Monday).unwrap(),
            date(2008, 12, 29)
        );
        assert!(PlainDate::of_week_date(2016, 53, Weekday::Monday).is_err());
    }

    #[test]
    fn epoch_days() {
        assert_eq!(PlainDate::of_epoch_day(0, EpochDays::Unix).unwrap(), date(1970, 1, 1));
        assert_eq!(PlainDate::of_epoch_day(0, EpochDays::Utc).unwrap(), date(1972, 1, 1));
        assert_eq!(
            PlainDate::of_epoch_day(0, EpochDays::ModifiedJulianDate).unwrap(),
            date(1858, 11, 17)
        );
        assert_eq!(date(1, 1, 1).epoch_day(EpochDays::RataDie).unwrap(), 1);
        assert!(PlainDate::MAX.plus(1, CalendarUnit::DAYS).is_err());
    }

    #[test]
    fn overflow_policies() {
        let jan31 = date(2013, 1, 31);
        let months = CalendarUnit::MONTHS;
        assert_eq!(jan31.plus(1, months).unwrap(), date(2013, 2, 28));
        assert_eq!(jan31.plus(1, months.next_valid_date()).unwrap(), date(2013, 3, 1));
        assert_eq!(jan31.plus(1, months.with_carry_over()).unwrap(), date(2013, 3, 3));
        assert!(jan31.plus(1, months.unless_invalid()).is_err());
        let feb28 = date(2013, 2, 28);
        assert_eq!(feb28.plus(1, months.keeping_end_of_month()).unwrap(), date(2013, 3, 31));
        assert_eq!(feb28.plus(1, months).unwrap(), date(2013, 3, 28));
        assert_eq!(date(2013, 3, 5).plus(1, months.at_end_of_month()).unwrap(), date(2013, 4, 30));
        assert_eq!(date(2013, 3, 31).plus(-1, months).unwrap(), date(2013, 2, 28));
        assert_eq!(date(2012, 2, 29).plus(1, CalendarUnit::YEARS).unwrap(), date(2013, 2, 28));
    }

    #[test]
    fn week_based_years_keep_week_and_weekday() {
        // 2015-W53-4 becomes 2016-W52-4
        let d = date(2015, 12, 31);
        let next = d.plus(1, CalendarUnit::WEEK_BASED_YEARS).unwrap();
        assert_eq!(next, date(2016, 12, 29));
        assert_eq!(d.until(&next, CalendarUnit::WEEK_BASED_YEARS).unwrap(), 1);
        // going back from W52 lands on 2015-W52-4, before the start
        assert_eq!(next.until(&d, CalendarUnit::WEEK_BASED_YEARS).unwrap(), 0);
    }

    #[test]
    fn metric() {
        let start = date(2012, 2, 29);
        assert_eq!(start.until(&date(2013, 2, 28), CalendarUnit::YEARS).unwrap(), 1);
        assert_eq!(start.until(&date(2013, 2, 27), CalendarUnit::YEARS).unwrap(), 0);
        assert_eq!(start.until(&date(2012, 3, 28), CalendarUnit::MONTHS).unwrap(), 0);
        assert_eq!(date(2012, 3, 28).until(&start, CalendarUnit::MONTHS).unwrap(), 0);
        assert_eq!(start.until(&date(2012, 3, 14), CalendarUnit::WEEKS).unwrap(), 2);
        let d = start
            .until_duration(&date(2011, 1, 1), &[CalendarUnit::MONTHS, CalendarUnit::DAYS])
            .unwrap();
        assert_eq!(d.to_string(), "-P13M28D");
    }

    #[test]
    fn relative_normalization() {
        let start = date(2013, 1, 31);
        let d = Duration::of_calendar_units(0, 1, 40).unwrap();
        // 2013-02-28 + 40 days = 2013-04-09
        assert_eq!(d.with(&start).unwrap().to_string(), "P2M9D");
        let normalized = d.with(&start).unwrap();
        assert_eq!(normalized.with(&start).unwrap(), normalized);
    }

    #[test]
    fn text() {
        assert_eq!(date(2012, 2, 29).to_string(), "2012-02-29");
        assert_eq!(date(-44, 3, 15).to_string(), "-0044-03-15");
        assert_eq!(date(12345, 1, 1).to_string(), "+12345-01-01");
        for s in ["2012-02-29", "-0044-03-15", "+12345-01-01"] {
            assert_eq!(s.parse::<PlainDate>().unwrap().to_string(), s);
        }
        assert_eq!("2013-02-29".parse::<PlainDate>().unwrap_err().error_offset(), Some(8));
        assert_eq!("2013-13-01".parse::<PlainDate>().unwrap_err().error_offset(), Some(5));
        assert_eq!("2013-1-01".parse::<PlainDate>().unwrap_err().error_offset(), Some(6));
        assert_eq!("2013-01-01T".parse::<PlainDate>().unwrap_err().error_offset(), Some(10));
    }
}
