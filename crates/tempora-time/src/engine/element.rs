//! Element identities and typed element handles.
//!
//! [`ElementId`] is the closed set of temporal fields known to the engine.
//! An [`Element<V>`] is a typed handle over an identity; two handles are the
//! same element if and only if their identities are equal.

use std::fmt;
use std::marker::PhantomData;

use tempora_units::{CalendarUnit, ClockUnit, IsoUnit};

use crate::engine::value::{ElementValue, ValueKind};
use crate::meridiem::Meridiem;
use crate::month::Month;
use crate::quarter::Quarter;
use crate::weekday::Weekday;
use crate::weekmodel::Weekmodel;

/// Identity of a temporal element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Proleptic ISO year.
    Year,
    /// Year of the ISO week date.
    YearOfWeekdate,
    /// Quarter of year.
    QuarterOfYear,
    /// Month of year as enum.
    MonthOfYear,
    /// Month of year as number.
    MonthAsNumber,
    /// Day of month.
    DayOfMonth,
    /// Day of quarter.
    DayOfQuarter,
    /// Day of year.
    DayOfYear,
    /// ISO day of week (Monday first).
    DayOfWeek,
    /// Ordinal of the weekday within the month.
    WeekdayInMonth,
    /// Week of the week-based year of a week model.
    WeekOfYear(Weekmodel),
    /// Week of month of a week model.
    WeekOfMonth(Weekmodel),
    /// Day of week of a week model.
    LocalDayOfWeek(Weekmodel),
    /// AM or PM.
    AmPmOfDay,
    /// Clock hour of half day (1–12).
    ClockHourOfAmPm,
    /// Clock hour of day (1–24).
    ClockHourOfDay,
    /// Digital hour of half day (0–11).
    DigitalHourOfAmPm,
    /// Digital hour of day (0–23).
    DigitalHourOfDay,
    /// ISO hour (0–24).
    IsoHour,
    /// Minute of hour.
    MinuteOfHour,
    /// Minute of day.
    MinuteOfDay,
    /// Second of minute.
    SecondOfMinute,
    /// Second of day.
    SecondOfDay,
    /// Millisecond of second.
    MilliOfSecond,
    /// Microsecond of second.
    MicroOfSecond,
    /// Nanosecond of second.
    NanoOfSecond,
    /// Millisecond of day.
    MilliOfDay,
    /// Microsecond of day.
    MicroOfDay,
    /// Nanosecond of day.
    NanoOfDay,
    /// Finest non-zero clock unit.
    Precision,
}

/// Navigation cycle of an element: `length` values, one `step` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    /// Number of distinct values in one cycle.
    pub length: i64,
    /// Amount of the base unit between two neighbouring values.
    pub step: i64,
}

const fn cycle(length: i64, step: i64) -> Option<Cycle> {
    Some(Cycle { length, step })
}

impl ElementId {
    /// The name of the element (`"DAY_OF_MONTH"`).
    pub fn name(&self) -> String {
        let fixed = match self {
            ElementId::Year => "YEAR",
            ElementId::YearOfWeekdate => "YEAR_OF_WEEKDATE",
            ElementId::QuarterOfYear => "QUARTER_OF_YEAR",
            ElementId::MonthOfYear => "MONTH_OF_YEAR",
            ElementId::MonthAsNumber => "MONTH_AS_NUMBER",
            ElementId::DayOfMonth => "DAY_OF_MONTH",
            ElementId::DayOfQuarter => "DAY_OF_QUARTER",
            ElementId::DayOfYear => "DAY_OF_YEAR",
            ElementId::DayOfWeek => "DAY_OF_WEEK",
            ElementId::WeekdayInMonth => "WEEKDAY_IN_MONTH",
            ElementId::WeekOfYear(m) => return format!("WEEK_OF_YEAR[{m}]"),
            ElementId::WeekOfMonth(m) => return format!("WEEK_OF_MONTH[{m}]"),
            ElementId::LocalDayOfWeek(m) => return format!("LOCAL_DAY_OF_WEEK[{m}]"),
            ElementId::AmPmOfDay => "AM_PM_OF_DAY",
            ElementId::ClockHourOfAmPm => "CLOCK_HOUR_OF_AMPM",
            ElementId::ClockHourOfDay => "CLOCK_HOUR_OF_DAY",
            ElementId::DigitalHourOfAmPm => "DIGITAL_HOUR_OF_AMPM",
            ElementId::DigitalHourOfDay => "DIGITAL_HOUR_OF_DAY",
            ElementId::IsoHour => "ISO_HOUR",
            ElementId::MinuteOfHour => "MINUTE_OF_HOUR",
            ElementId::MinuteOfDay => "MINUTE_OF_DAY",
            ElementId::SecondOfMinute => "SECOND_OF_MINUTE",
            ElementId::SecondOfDay => "SECOND_OF_DAY",
            ElementId::MilliOfSecond => "MILLI_OF_SECOND",
            ElementId::MicroOfSecond => "MICRO_OF_SECOND",
            ElementId::NanoOfSecond => "NANO_OF_SECOND",
            ElementId::MilliOfDay => "MILLI_OF_DAY",
            ElementId::MicroOfDay => "MICRO_OF_DAY",
            ElementId::NanoOfDay => "NANO_OF_DAY",
            ElementId::Precision => "PRECISION",
        };
        fixed.to_owned()
    }

    /// The value type of the element.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            ElementId::QuarterOfYear => ValueKind::Quarter,
            ElementId::MonthOfYear => ValueKind::Month,
            ElementId::DayOfWeek | ElementId::LocalDayOfWeek(_) => ValueKind::Weekday,
            ElementId::AmPmOfDay => ValueKind::Meridiem,
            ElementId::Precision => ValueKind::ClockUnit,
            ElementId::MicroOfDay | ElementId::NanoOfDay => ValueKind::I64,
            _ => ValueKind::I32,
        }
    }

    /// `true` for elements of the calendar date.
    pub fn is_date_element(&self) -> bool {
        matches!(
            self,
            ElementId::Year
                | ElementId::YearOfWeekdate
                | ElementId::QuarterOfYear
                | ElementId::MonthOfYear
                | ElementId::MonthAsNumber
                | ElementId::DayOfMonth
                | ElementId::DayOfQuarter
                | ElementId::DayOfYear
                | ElementId::DayOfWeek
                | ElementId::WeekdayInMonth
                | ElementId::WeekOfYear(_)
                | ElementId::WeekOfMonth(_)
                | ElementId::LocalDayOfWeek(_)
        )
    }

    /// `true` for elements of the wall time.
    pub fn is_time_element(&self) -> bool {
        !self.is_date_element()
    }

    /// Format symbol of the element, if it has one.
    pub fn symbol(&self) -> Option<char> {
        match self {
            ElementId::Year => Some('u'),
            ElementId::YearOfWeekdate => Some('Y'),
            ElementId::QuarterOfYear => Some('Q'),
            ElementId::MonthOfYear | ElementId::MonthAsNumber => Some('M'),
            ElementId::DayOfMonth => Some('d'),
            ElementId::DayOfYear => Some('D'),
            ElementId::DayOfWeek => Some('E'),
            ElementId::WeekdayInMonth => Some('F'),
            ElementId::WeekOfYear(_) => Some('w'),
            ElementId::WeekOfMonth(_) => Some('W'),
            ElementId::LocalDayOfWeek(_) => Some('e'),
            ElementId::AmPmOfDay => Some('a'),
            ElementId::ClockHourOfAmPm => Some('h'),
            ElementId::ClockHourOfDay => Some('k'),
            ElementId::DigitalHourOfAmPm => Some('K'),
            ElementId::DigitalHourOfDay => Some('H'),
            ElementId::MinuteOfHour => Some('m'),
            ElementId::SecondOfMinute => Some('s'),
            ElementId::MilliOfDay => Some('A'),
            _ => None,
        }
    }

    /// Whether the element accepts out-of-range values in lenient mode,
    /// resolving them by arithmetic in its base unit.
    pub fn is_lenient(&self) -> bool {
        matches!(
            self,
            ElementId::DayOfMonth
                | ElementId::DayOfQuarter
                | ElementId::DayOfYear
                | ElementId::MinuteOfHour
                | ElementId::SecondOfMinute
                | ElementId::MinuteOfDay
                | ElementId::SecondOfDay
        )
    }

    /// Unit of one step of the element.
    pub fn base_unit(&self) -> Option<IsoUnit> {
        let unit = match self {
            ElementId::Year => CalendarUnit::YEARS.into(),
            ElementId::YearOfWeekdate => CalendarUnit::WEEK_BASED_YEARS.into(),
            ElementId::QuarterOfYear => CalendarUnit::QUARTERS.into(),
            ElementId::MonthOfYear | ElementId::MonthAsNumber => CalendarUnit::MONTHS.into(),
            ElementId::DayOfMonth
            | ElementId::DayOfQuarter
            | ElementId::DayOfYear
            | ElementId::DayOfWeek
            | ElementId::LocalDayOfWeek(_) => CalendarUnit::DAYS.into(),
            ElementId::WeekdayInMonth | ElementId::WeekOfYear(_) | ElementId::WeekOfMonth(_) => {
                CalendarUnit::WEEKS.into()
            }
            ElementId::AmPmOfDay
            | ElementId::ClockHourOfAmPm
            | ElementId::ClockHourOfDay
            | ElementId::DigitalHourOfAmPm
            | ElementId::DigitalHourOfDay
            | ElementId::IsoHour => ClockUnit::Hours.into(),
            ElementId::MinuteOfHour | ElementId::MinuteOfDay => ClockUnit::Minutes.into(),
            ElementId::SecondOfMinute | ElementId::SecondOfDay => ClockUnit::Seconds.into(),
            ElementId::MilliOfSecond | ElementId::MilliOfDay => ClockUnit::Millis.into(),
            ElementId::MicroOfSecond | ElementId::MicroOfDay => ClockUnit::Micros.into(),
            ElementId::NanoOfSecond | ElementId::NanoOfDay => ClockUnit::Nanos.into(),
            ElementId::Precision => return None,
        };
        Some(unit)
    }

    /// Amount of the base unit added by one increment.
    pub fn step(&self) -> i64 {
        match self {
            ElementId::AmPmOfDay => 12,
            _ => 1,
        }
    }

    /// Navigation cycle for `set_to_next` and friends; `None` for elements
    /// which do not repeat.
    pub fn cycle(&self) -> Option<Cycle> {
        match self {
            ElementId::QuarterOfYear => cycle(4, 1),
            ElementId::MonthOfYear | ElementId::MonthAsNumber => cycle(12, 1),
            ElementId::DayOfWeek | ElementId::LocalDayOfWeek(_) => cycle(7, 1),
            ElementId::AmPmOfDay => cycle(2, 12),
            ElementId::ClockHourOfAmPm | ElementId::DigitalHourOfAmPm => cycle(12, 1),
            ElementId::ClockHourOfDay | ElementId::DigitalHourOfDay => cycle(24, 1),
            ElementId::MinuteOfHour | ElementId::SecondOfMinute => cycle(60, 1),
            ElementId::MilliOfSecond => cycle(1_000, 1),
            ElementId::MicroOfSecond => cycle(1_000_000, 1),
            ElementId::NanoOfSecond => cycle(1_000_000_000, 1),
            _ => None,
        }
    }

    /// Default minimum as raw value.
    pub fn default_minimum(&self) -> i64 {
        match self {
            ElementId::Year | ElementId::YearOfWeekdate => -999_999_999,
            ElementId::QuarterOfYear
            | ElementId::MonthOfYear
            | ElementId::MonthAsNumber
            | ElementId::DayOfMonth
            | ElementId::DayOfQuarter
            | ElementId::DayOfYear
            | ElementId::DayOfWeek
            | ElementId::WeekdayInMonth
            | ElementId::WeekOfYear(_)
            | ElementId::ClockHourOfAmPm
            | ElementId::ClockHourOfDay => 1,
            ElementId::LocalDayOfWeek(m) => i64::from(m.first_day_of_week().ordinal()),
            _ => 0,
        }
    }

    /// Default maximum as raw value.
    pub fn default_maximum(&self) -> i64 {
        match self {
            ElementId::Year | ElementId::YearOfWeekdate => 999_999_999,
            ElementId::QuarterOfYear => 4,
            ElementId::MonthOfYear | ElementId::MonthAsNumber => 12,
            ElementId::DayOfMonth => 31,
            ElementId::DayOfQuarter => 92,
            ElementId::DayOfYear => 365,
            ElementId::DayOfWeek => 7,
            ElementId::WeekdayInMonth => 5,
            ElementId::WeekOfYear(_) => 52,
            ElementId::WeekOfMonth(_) => 5,
            ElementId::LocalDayOfWeek(m) => i64::from(m.last_day_of_week().ordinal()),
            ElementId::AmPmOfDay => 1,
            ElementId::ClockHourOfAmPm => 12,
            ElementId::ClockHourOfDay => 24,
            ElementId::DigitalHourOfAmPm => 11,
            ElementId::DigitalHourOfDay => 23,
            ElementId::IsoHour => 23,
            ElementId::MinuteOfHour | ElementId::SecondOfMinute => 59,
            ElementId::MinuteOfDay => 1_439,
            ElementId::SecondOfDay => 86_399,
            ElementId::MilliOfSecond => 999,
            ElementId::MicroOfSecond => 999_999,
            ElementId::NanoOfSecond => 999_999_999,
            ElementId::MilliOfDay => 86_399_999,
            ElementId::MicroOfDay => 86_399_999_999,
            ElementId::NanoOfDay => 86_399_999_999_999,
            ElementId::Precision => ClockUnit::Nanos as i64,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A typed element handle.
pub struct Element<V> {
    id: ElementId,
    value: PhantomData<fn() -> V>,
}

impl<V> Element<V> {
    pub(crate) const fn new(id: ElementId) -> Self {
        Self {
            id,
            value: PhantomData,
        }
    }

    /// The identity of this element.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The name of this element.
    pub fn name(&self) -> String {
        self.id.name()
    }

    /// Whether the element resolves out-of-range values leniently.
    pub fn is_lenient(&self) -> bool {
        self.id.is_lenient()
    }
}

impl<V: ElementValue> Element<V> {
    /// Default minimum of the element.
    pub fn default_minimum(&self) -> Option<V> {
        V::from_raw(self.id.default_minimum())
    }

    /// Default maximum of the element.
    pub fn default_maximum(&self) -> Option<V> {
        V::from_raw(self.id.default_maximum())
    }
}

// Manual impls: `V` itself need not be `Clone` or `Eq`.
impl<V> Clone for Element<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Element<V> {}

impl<V> PartialEq for Element<V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<V> Eq for Element<V> {}

impl<V> std::hash::Hash for Element<V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<V> fmt::Debug for Element<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({})", self.id)
    }
}

impl<V> fmt::Display for Element<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

// ── Element catalogue ─────────────────────────────────────────────────────────

/// Proleptic ISO year (±999,999,999).
pub const YEAR: Element<i32> = Element::new(ElementId::Year);
/// Year of the ISO week date.
pub const YEAR_OF_WEEKDATE: Element<i32> = Element::new(ElementId::YearOfWeekdate);
/// Quarter of year.
pub const QUARTER_OF_YEAR: Element<Quarter> = Element::new(ElementId::QuarterOfYear);
/// Month of year.
pub const MONTH_OF_YEAR: Element<Month> = Element::new(ElementId::MonthOfYear);
/// Month of year (1–12).
pub const MONTH_AS_NUMBER: Element<i32> = Element::new(ElementId::MonthAsNumber);
/// Day of month.
pub const DAY_OF_MONTH: Element<i32> = Element::new(ElementId::DayOfMonth);
/// Day of quarter.
pub const DAY_OF_QUARTER: Element<i32> = Element::new(ElementId::DayOfQuarter);
/// Day of year.
pub const DAY_OF_YEAR: Element<i32> = Element::new(ElementId::DayOfYear);
/// ISO day of week.
pub const DAY_OF_WEEK: Element<Weekday> = Element::new(ElementId::DayOfWeek);
/// Ordinal of the weekday within the month (the 2nd Tuesday is 2).
pub const WEEKDAY_IN_MONTH: Element<i32> = Element::new(ElementId::WeekdayInMonth);
/// AM or PM.
pub const AM_PM_OF_DAY: Element<Meridiem> = Element::new(ElementId::AmPmOfDay);
/// Clock hour of half day (1–12).
pub const CLOCK_HOUR_OF_AMPM: Element<i32> = Element::new(ElementId::ClockHourOfAmPm);
/// Clock hour of day (1–24).
pub const CLOCK_HOUR_OF_DAY: Element<i32> = Element::new(ElementId::ClockHourOfDay);
/// Digital hour of half day (0–11).
pub const DIGITAL_HOUR_OF_AMPM: Element<i32> = Element::new(ElementId::DigitalHourOfAmPm);
/// Digital hour of day (0–23).
pub const DIGITAL_HOUR_OF_DAY: Element<i32> = Element::new(ElementId::DigitalHourOfDay);
/// ISO hour (0–24 on plain times, 0–23 on timestamps).
pub const ISO_HOUR: Element<i32> = Element::new(ElementId::IsoHour);
/// Minute of hour.
pub const MINUTE_OF_HOUR: Element<i32> = Element::new(ElementId::MinuteOfHour);
/// Minute of day.
pub const MINUTE_OF_DAY: Element<i32> = Element::new(ElementId::MinuteOfDay);
/// Second of minute.
pub const SECOND_OF_MINUTE: Element<i32> = Element::new(ElementId::SecondOfMinute);
/// Second of day.
pub const SECOND_OF_DAY: Element<i32> = Element::new(ElementId::SecondOfDay);
/// Millisecond of second.
pub const MILLI_OF_SECOND: Element<i32> = Element::new(ElementId::MilliOfSecond);
/// Microsecond of second.
pub const MICRO_OF_SECOND: Element<i32> = Element::new(ElementId::MicroOfSecond);
/// Nanosecond of second.
pub const NANO_OF_SECOND: Element<i32> = Element::new(ElementId::NanoOfSecond);
/// Millisecond of day.
pub const MILLI_OF_DAY: Element<i32> = Element::new(ElementId::MilliOfDay);
/// Microsecond of day.
pub const MICRO_OF_DAY: Element<i64> = Element::new(ElementId::MicroOfDay);
/// Nanosecond of day.
pub const NANO_OF_DAY: Element<i64> = Element::new(ElementId::NanoOfDay);
/// Finest clock unit with a non-zero value; setting it truncates.
pub const PRECISION: Element<ClockUnit> = Element::new(ElementId::Precision);
