//! Element rules of `PlainTime` and the time axis.
//!
//! The 24:00 sentinel counts as hour 0 for the half-day elements and as the
//! maximum for the `*_OF_DAY` elements; every sub-hour element is pinned to
//! zero there.

use tempora_core::define_singleton;
use tempora_core::errors::Result;
use tempora_core::math::safe_sub;
use tempora_core::{fail, NANOS_PER_DAY, NANOS_PER_SECOND};
use tempora_units::ClockUnit;

use crate::engine::{Axis, ChronoEntity, ElementId, ElementRule};
use crate::meridiem::Meridiem;
use crate::plain_time::PlainTime;

/// Elements of a wall time.
pub(crate) const TIME_ELEMENTS: [ElementId; 17] = [
    ElementId::AmPmOfDay,
    ElementId::ClockHourOfAmPm,
    ElementId::ClockHourOfDay,
    ElementId::DigitalHourOfAmPm,
    ElementId::DigitalHourOfDay,
    ElementId::IsoHour,
    ElementId::MinuteOfHour,
    ElementId::MinuteOfDay,
    ElementId::SecondOfMinute,
    ElementId::SecondOfDay,
    ElementId::MilliOfSecond,
    ElementId::MicroOfSecond,
    ElementId::NanoOfSecond,
    ElementId::MilliOfDay,
    ElementId::MicroOfDay,
    ElementId::NanoOfDay,
    ElementId::Precision,
];

define_singleton!(
    /// The element axis of `PlainTime`.
    pub(crate) TIME_AXIS,
    Axis<PlainTime>,
    Axis::builder(
        "PlainTime",
        PlainTime::MIDNIGHT_AT_START,
        PlainTime::MIDNIGHT_AT_END,
        ClockUnit::Nanos.into(),
    )
    .append_all(TIME_ELEMENTS, TimeRule)
    .build()
);

/// Rule of one time element.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimeRule(pub(crate) ElementId);

const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_MICRO: i64 = 1_000;

/// Hour counted on a 0–23 dial.
fn dial_hour(time: &PlainTime) -> i64 {
    i64::from(time.hour() % 24)
}

fn is_pm(time: &PlainTime) -> bool {
    Meridiem::of_hour(time.hour()) == Meridiem::Pm
}

fn with_hour(time: &PlainTime, hour: i64) -> Result<PlainTime> {
    PlainTime::of(hour as u8, time.minute(), time.second(), time.nanosecond())
}

fn with_nano_of_day(nano_of_day: i64) -> Result<PlainTime> {
    PlainTime::of_nano_of_day(nano_of_day)
}

impl ElementRule<PlainTime> for TimeRule {
    fn get_value(&self, time: &PlainTime) -> i64 {
        let nano = i64::from(time.nanosecond());
        let nano_of_day = time.nano_of_day();
        match self.0 {
            ElementId::AmPmOfDay => i64::from(is_pm(time)),
            ElementId::ClockHourOfAmPm => match dial_hour(time) % 12 {
                0 => 12,
                h => h,
            },
            ElementId::ClockHourOfDay => match dial_hour(time) {
                0 => 24,
                h => h,
            },
            ElementId::DigitalHourOfAmPm => dial_hour(time) % 12,
            ElementId::DigitalHourOfDay => dial_hour(time),
            ElementId::IsoHour => i64::from(time.hour()),
            ElementId::MinuteOfHour => i64::from(time.minute()),
            ElementId::MinuteOfDay => i64::from(time.hour()) * 60 + i64::from(time.minute()),
            ElementId::SecondOfMinute => i64::from(time.second()),
            ElementId::SecondOfDay => time.second_of_day(),
            ElementId::MilliOfSecond => nano / NANOS_PER_MILLI,
            ElementId::MicroOfSecond => nano / NANOS_PER_MICRO,
            ElementId::NanoOfSecond => nano,
            ElementId::MilliOfDay => nano_of_day / NANOS_PER_MILLI,
            ElementId::MicroOfDay => nano_of_day / NANOS_PER_MICRO,
            ElementId::NanoOfDay => nano_of_day,
            ElementId::Precision => time.precision() as i64,
            _ => 0,
        }
    }

    fn get_minimum(&self, _: &PlainTime) -> i64 {
        self.0.default_minimum()
    }

    fn get_maximum(&self, time: &PlainTime) -> i64 {
        let end_of_day = time.hour() == 24;
        let nano = i64::from(time.nanosecond());
        match self.0 {
            ElementId::IsoHour => {
                if time.minute() == 0 && time.second() == 0 && nano == 0 {
                    24
                } else {
                    23
                }
            }
            ElementId::MinuteOfHour
            | ElementId::SecondOfMinute
            | ElementId::MilliOfSecond
            | ElementId::MicroOfSecond
            | ElementId::NanoOfSecond
            | ElementId::Precision
                if end_of_day =>
            {
                0
            }
            ElementId::MinuteOfDay if time.second() == 0 && nano == 0 => 1_440,
            ElementId::SecondOfDay if nano == 0 => 86_400,
            ElementId::MilliOfDay if nano % NANOS_PER_MILLI == 0 => NANOS_PER_DAY / NANOS_PER_MILLI,
            ElementId::MicroOfDay if nano % NANOS_PER_MICRO == 0 => NANOS_PER_DAY / NANOS_PER_MICRO,
            ElementId::NanoOfDay => NANOS_PER_DAY,
            id => id.default_maximum(),
        }
    }

    fn set(&self, time: &PlainTime, value: i64) -> Result<PlainTime> {
        let nano = i64::from(time.nanosecond());
        let second_part = i64::from(time.second()) * NANOS_PER_SECOND + nano;
        let pm = if is_pm(time) { 12 } else { 0 };
        match self.0 {
            ElementId::AmPmOfDay => {
                let hour = dial_hour(time);
                with_hour(time, if value == 1 { hour % 12 + 12 } else { hour % 12 })
            }
            ElementId::ClockHourOfAmPm => with_hour(time, value % 12 + pm),
            ElementId::ClockHourOfDay => with_hour(time, value % 24),
            ElementId::DigitalHourOfAmPm => with_hour(time, value + pm),
            ElementId::DigitalHourOfDay | ElementId::IsoHour => with_hour(time, value),
            ElementId::MinuteOfHour => {
                PlainTime::of(time.hour(), value as u8, time.second(), time.nanosecond())
            }
            ElementId::SecondOfMinute => {
                PlainTime::of(time.hour(), time.minute(), value as u8, time.nanosecond())
            }
            ElementId::MilliOfSecond => PlainTime::of(
                time.hour(),
                time.minute(),
                time.second(),
                (value * NANOS_PER_MILLI + nano % NANOS_PER_MILLI) as u32,
            ),
            ElementId::MicroOfSecond => PlainTime::of(
                time.hour(),
                time.minute(),
                time.second(),
                (value * NANOS_PER_MICRO + nano % NANOS_PER_MICRO) as u32,
            ),
            ElementId::NanoOfSecond => {
                PlainTime::of(time.hour(), time.minute(), time.second(), value as u32)
            }
            ElementId::MinuteOfDay => with_nano_of_day(value * 60 * NANOS_PER_SECOND + second_part),
            ElementId::SecondOfDay => with_nano_of_day(value * NANOS_PER_SECOND + nano),
            ElementId::MilliOfDay => {
                with_nano_of_day(value * NANOS_PER_MILLI + nano % NANOS_PER_MILLI)
            }
            ElementId::MicroOfDay => {
                with_nano_of_day(value * NANOS_PER_MICRO + nano % NANOS_PER_MICRO)
            }
            ElementId::NanoOfDay => with_nano_of_day(value),
            ElementId::Precision => {
                let Some(unit) = ClockUnit::ALL.get(value as usize) else {
                    fail!(InvalidValue, "no clock unit with index {value}");
                };
                let nano_of_day = time.nano_of_day();
                with_nano_of_day(nano_of_day - nano_of_day % unit.nanos())
            }
            id => fail!(UnsupportedElement, "{id} on PlainTime"),
        }
    }

    fn set_lenient(&self, time: &PlainTime, value: i64) -> Result<PlainTime> {
        let id = self.0;
        let Some(unit) = id.base_unit().filter(|_| id.is_lenient()) else {
            fail!(InvalidValue, "{value} is out of range for {id}");
        };
        time.plus_in(safe_sub(value, self.get_value(time))?, unit)
    }

    fn child_at_floor(&self, _: &PlainTime) -> Option<ElementId> {
        match self.0 {
            ElementId::AmPmOfDay => Some(ElementId::DigitalHourOfAmPm),
            ElementId::ClockHourOfAmPm
            | ElementId::ClockHourOfDay
            | ElementId::DigitalHourOfAmPm
            | ElementId::DigitalHourOfDay
            | ElementId::IsoHour => Some(ElementId::MinuteOfHour),
            ElementId::MinuteOfHour | ElementId::MinuteOfDay => Some(ElementId::SecondOfMinute),
            ElementId::SecondOfMinute | ElementId::SecondOfDay => Some(ElementId::NanoOfSecond),
            _ => None,
        }
    }
}
