//! Element rules of `PlainTimestamp`: the date and time rules lifted onto
//! the combined entity.

use tempora_core::errors::Result;
use tempora_core::{define_singleton, fail};
use tempora_core::math::safe_sub;
use tempora_units::ClockUnit;

use crate::engine::{Axis, ChronoEntity, ElementId, ElementRule};
use crate::plain_timestamp::PlainTimestamp;
use crate::rules::date::{date_elements, DateRule};
use crate::rules::time::{TimeRule, TIME_ELEMENTS};

define_singleton!(
    /// The element axis of `PlainTimestamp`.
    pub(crate) TIMESTAMP_AXIS,
    Axis<PlainTimestamp>,
    Axis::builder(
        "PlainTimestamp",
        PlainTimestamp::MIN,
        PlainTimestamp::MAX,
        ClockUnit::Nanos.into(),
    )
    .append_all(date_elements(), |id| TimestampRule::Date(DateRule(id)))
    .append_all(TIME_ELEMENTS, |id| TimestampRule::Time(TimeRule(id)))
    .build()
);

/// Rule of one timestamp element, delegating to the date or time part.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TimestampRule {
    Date(DateRule),
    Time(TimeRule),
}

impl ElementRule<PlainTimestamp> for TimestampRule {
    fn get_value(&self, ts: &PlainTimestamp) -> i64 {
        match self {
            TimestampRule::Date(rule) => rule.get_value(&ts.date()),
            TimestampRule::Time(rule) => rule.get_value(&ts.time()),
        }
    }

    fn get_minimum(&self, ts: &PlainTimestamp) -> i64 {
        match self {
            TimestampRule::Date(rule) => rule.get_minimum(&ts.date()),
            TimestampRule::Time(rule) => rule.get_minimum(&ts.time()),
        }
    }

    fn get_maximum(&self, ts: &PlainTimestamp) -> i64 {
        match self {
            TimestampRule::Date(rule) => rule.get_maximum(&ts.date()),
            // a timestamp never shows 24:00
            TimestampRule::Time(rule) => rule.get_maximum(&ts.time()).min(rule.0.default_maximum()),
        }
    }

    fn is_valid(&self, ts: &PlainTimestamp, value: i64) -> bool {
        match self {
            TimestampRule::Date(rule) => rule.is_valid(&ts.date(), value),
            TimestampRule::Time(_) => {
                (self.get_minimum(ts)..=self.get_maximum(ts)).contains(&value)
            }
        }
    }

    fn set(&self, ts: &PlainTimestamp, value: i64) -> Result<PlainTimestamp> {
        match self {
            TimestampRule::Date(rule) => PlainTimestamp::of(rule.set(&ts.date(), value)?, ts.time()),
            TimestampRule::Time(rule) => PlainTimestamp::of(ts.date(), rule.set(&ts.time(), value)?),
        }
    }

    fn set_lenient(&self, ts: &PlainTimestamp, value: i64) -> Result<PlainTimestamp> {
        let id = match self {
            TimestampRule::Date(rule) => rule.0,
            TimestampRule::Time(rule) => rule.0,
        };
        let Some(unit) = id.base_unit().filter(|_| id.is_lenient()) else {
            fail!(InvalidValue, "{value} is out of range for {id}");
        };
        ts.plus_in(safe_sub(value, self.get_value(ts))?, unit)
    }

    fn child_at_floor(&self, ts: &PlainTimestamp) -> Option<ElementId> {
        match self {
            TimestampRule::Date(rule) => rule
                .child_at_floor(&ts.date())
                .or(Some(ElementId::IsoHour)),
            TimestampRule::Time(rule) => rule.child_at_floor(&ts.time()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::element::{
        DAY_OF_MONTH, ISO_HOUR, MINUTE_OF_DAY, MINUTE_OF_HOUR, MONTH_OF_YEAR, NANO_OF_DAY, YEAR,
    };
    use crate::month::Month;
    use crate::plain_date::PlainDate;
    use crate::plain_time::PlainTime;

    fn ts(y: i32, mo: u8, d: u8, h: u8, mi: u8) -> PlainTimestamp {
        let date = PlainDate::of(y, mo, d).unwrap();
        PlainTimestamp::of(date, PlainTime::of_hour_minute(h, mi).unwrap()).unwrap()
    }

    #[test]
    fn time_maxima_stop_before_midnight() {
        let t = ts(2012, 2, 29, 12, 0);
        assert_eq!(t.get_maximum(ISO_HOUR).unwrap(), 23);
        assert_eq!(t.get_maximum(MINUTE_OF_DAY).unwrap(), 1_439);
        let last = PlainTime::of(23, 59, 59, 999_999_999).unwrap();
        assert_eq!(t.maximized(NANO_OF_DAY).unwrap().time(), last);
        assert!(t.with(ISO_HOUR, 24).is_err());
    }

    #[test]
    fn date_and_time_setters() {
        let t = ts(2012, 2, 29, 12, 30);
        assert_eq!(t.with(YEAR, 2013).unwrap(), ts(2013, 2, 28, 12, 30));
        assert_eq!(t.with(MONTH_OF_YEAR, Month::April).unwrap(), ts(2012, 4, 29, 12, 30));
        assert_eq!(t.with(ISO_HOUR, 0).unwrap(), ts(2012, 2, 29, 0, 30));
    }

    #[test]
    fn lenient_carries_into_the_date() {
        let t = ts(2012, 2, 29, 23, 30);
        assert_eq!(t.with_lenient(MINUTE_OF_HOUR, 90).unwrap(), ts(2012, 3, 1, 0, 30));
        assert_eq!(t.with_lenient(DAY_OF_MONTH, 31).unwrap(), ts(2012, 3, 2, 23, 30));
    }

    #[test]
    fn floor_walks_from_date_into_time() {
        let t = ts(2012, 2, 29, 23, 30);
        assert_eq!(t.at_floor(DAY_OF_MONTH).unwrap(), ts(2012, 2, 29, 0, 0));
        assert_eq!(t.at_floor(YEAR).unwrap(), ts(2012, 1, 1, 0, 0));
        let ceiling = t.at_ceiling(MONTH_OF_YEAR).unwrap();
        assert_eq!(ceiling.date(), t.date());
        assert_eq!(ceiling.time(), PlainTime::of(23, 59, 59, 999_999_999).unwrap());
    }
}
