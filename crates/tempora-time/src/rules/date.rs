//! Element rules of `PlainDate` and the date axis.

use tempora_core::define_singleton;
use tempora_core::errors::Result;
use tempora_core::fail;
use tempora_units::CalendarUnit;

use crate::engine::{Axis, ElementId, ElementRule};
use crate::plain_date::{PlainDate, MAX_YEAR};
use crate::quarter::Quarter;
use crate::weekmodel::Weekmodel;

/// Elements of a calendar date: the fixed ones followed by the three week
/// elements of every week model.
pub(crate) fn date_elements() -> impl Iterator<Item = ElementId> {
    [
        ElementId::Year,
        ElementId::YearOfWeekdate,
        ElementId::QuarterOfYear,
        ElementId::MonthOfYear,
        ElementId::MonthAsNumber,
        ElementId::DayOfMonth,
        ElementId::DayOfQuarter,
        ElementId::DayOfYear,
        ElementId::DayOfWeek,
        ElementId::WeekdayInMonth,
    ]
    .into_iter()
    .chain(Weekmodel::all().flat_map(|model| {
        [
            ElementId::WeekOfYear(model),
            ElementId::WeekOfMonth(model),
            ElementId::LocalDayOfWeek(model),
        ]
    }))
}

define_singleton!(
    /// The element axis of `PlainDate`.
    pub(crate) DATE_AXIS,
    Axis<PlainDate>,
    Axis::builder("PlainDate", PlainDate::MIN, PlainDate::MAX, CalendarUnit::DAYS.into())
        .append_all(date_elements(), DateRule)
        .build()
);

/// Rule of one date element.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DateRule(pub(crate) ElementId);

fn shift_days(date: &PlainDate, days: i64) -> Result<PlainDate> {
    date.plus(days, CalendarUnit::DAYS)
}

/// Epoch day of the first day of the month of `date`.
fn first_of_month(date: &PlainDate) -> i64 {
    date.unix_days() - i64::from(date.day_of_month()) + 1
}

impl ElementRule<PlainDate> for DateRule {
    fn get_value(&self, date: &PlainDate) -> i64 {
        let unix = date.unix_days();
        match self.0 {
            ElementId::Year => i64::from(date.year()),
            ElementId::YearOfWeekdate => Weekmodel::ISO.week_date(unix).0,
            ElementId::QuarterOfYear => i64::from(date.quarter().number()),
            ElementId::MonthOfYear | ElementId::MonthAsNumber => i64::from(date.month_number()),
            ElementId::DayOfMonth => i64::from(date.day_of_month()),
            ElementId::DayOfQuarter => i64::from(date.day_of_quarter()),
            ElementId::DayOfYear => i64::from(date.day_of_year()),
            ElementId::DayOfWeek | ElementId::LocalDayOfWeek(_) => {
                i64::from(date.day_of_week().ordinal())
            }
            ElementId::WeekdayInMonth => (i64::from(date.day_of_month()) - 1) / 7 + 1,
            ElementId::WeekOfYear(model) => model.week_date(unix).1,
            ElementId::WeekOfMonth(model) => model.week_of_month_of(
                i64::from(date.day_of_month()),
                model.local_ordinal(unix),
            ),
            _ => 0,
        }
    }

    fn get_minimum(&self, date: &PlainDate) -> i64 {
        match self.0 {
            ElementId::WeekOfMonth(model) => {
                model.week_of_month_of(1, model.local_ordinal(first_of_month(date)))
            }
            id => id.default_minimum(),
        }
    }

    fn get_maximum(&self, date: &PlainDate) -> i64 {
        let unix = date.unix_days();
        match self.0 {
            ElementId::Year | ElementId::YearOfWeekdate => i64::from(MAX_YEAR),
            ElementId::DayOfMonth => i64::from(date.length_of_month()),
            ElementId::DayOfQuarter => i64::from(date.length_of_quarter()),
            ElementId::DayOfYear => i64::from(date.length_of_year()),
            ElementId::WeekdayInMonth => {
                let remaining = i64::from(date.length_of_month() - date.day_of_month());
                self.get_value(date) + remaining / 7
            }
            ElementId::WeekOfYear(model) => model.weeks_in_year(model.week_date(unix).0),
            ElementId::WeekOfMonth(model) => {
                let len = i64::from(date.length_of_month());
                let last = first_of_month(date) + len - 1;
                model.week_of_month_of(len, model.local_ordinal(last))
            }
            id => id.default_maximum(),
        }
    }

    fn is_valid(&self, date: &PlainDate, value: i64) -> bool {
        match self.0 {
            // any weekday, its position in the model week is derived
            ElementId::LocalDayOfWeek(_) => (1..=7).contains(&value),
            _ => (self.get_minimum(date)..=self.get_maximum(date)).contains(&value),
        }
    }

    fn set(&self, date: &PlainDate, value: i64) -> Result<PlainDate> {
        let current = self.get_value(date);
        match self.0 {
            ElementId::Year => PlainDate::with_clamped(value, date.month_number(), date.day_of_month()),
            ElementId::YearOfWeekdate => date.plus_week_based_years(value - current),
            ElementId::QuarterOfYear => {
                let Some(quarter) = Quarter::from_number(value as u8) else {
                    fail!(InvalidValue, "quarter {value} out of range [1, 4]");
                };
                let month_in_quarter = (date.month_number() - 1) % 3;
                let month = quarter.first_month().number() + month_in_quarter;
                PlainDate::with_clamped(i64::from(date.year()), month, date.day_of_month())
            }
            ElementId::MonthOfYear | ElementId::MonthAsNumber => {
                PlainDate::with_clamped(i64::from(date.year()), value as u8, date.day_of_month())
            }
            ElementId::DayOfMonth => PlainDate::of(date.year(), date.month_number(), value as u8),
            ElementId::DayOfQuarter | ElementId::DayOfYear | ElementId::DayOfWeek => {
                shift_days(date, value - current)
            }
            ElementId::WeekdayInMonth | ElementId::WeekOfYear(_) => {
                shift_days(date, 7 * (value - current))
            }
            ElementId::WeekOfMonth(_) => {
                let shifted = shift_days(date, 7 * (value - current))?;
                // partial weeks at the edges stay inside the month
                let first = first_of_month(date);
                let last = first + i64::from(date.length_of_month()) - 1;
                PlainDate::from_unix_days(shifted.unix_days().clamp(first, last))
            }
            ElementId::LocalDayOfWeek(model) => {
                let first = i64::from(model.first_day_of_week().ordinal());
                let target = (value - first).rem_euclid(7) + 1;
                shift_days(date, target - model.local_ordinal(date.unix_days()))
            }
            id => fail!(UnsupportedElement, "{id} on PlainDate"),
        }
    }

    fn set_lenient(&self, date: &PlainDate, value: i64) -> Result<PlainDate> {
        match self.0 {
            ElementId::DayOfMonth | ElementId::DayOfQuarter | ElementId::DayOfYear => {
                shift_days(date, value - self.get_value(date))
            }
            id => fail!(InvalidValue, "{value} is out of range for {id}"),
        }
    }

    fn child_at_floor(&self, _: &PlainDate) -> Option<ElementId> {
        match self.0 {
            ElementId::Year => Some(ElementId::MonthAsNumber),
            ElementId::YearOfWeekdate => Some(ElementId::WeekOfYear(Weekmodel::ISO)),
            ElementId::QuarterOfYear => Some(ElementId::DayOfQuarter),
            ElementId::MonthOfYear | ElementId::MonthAsNumber => Some(ElementId::DayOfMonth),
            ElementId::WeekOfYear(model) | ElementId::WeekOfMonth(model) => {
                Some(ElementId::LocalDayOfWeek(model))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ChronoEntity;
    use crate::engine::element::{
        DAY_OF_MONTH, DAY_OF_QUARTER, DAY_OF_WEEK, MONTH_AS_NUMBER, QUARTER_OF_YEAR,
        WEEKDAY_IN_MONTH, YEAR, YEAR_OF_WEEKDATE,
    };
    use crate::weekday::Weekday;

    fn date(y: i32, m: u8, d: u8) -> PlainDate {
        PlainDate::of(y, m, d).unwrap()
    }

    #[test]
    fn all_week_models_are_registered() {
        assert_eq!(DATE_AXIS.elements().count(), 10 + 49 * 3);
        let us = Weekmodel::of(Weekday::Sunday, 1).unwrap();
        assert!(date(2012, 1, 1).contains(us.week_of_year()));
    }

    #[test]
    fn clamping_setters() {
        let leap = date(2012, 2, 29);
        assert_eq!(leap.with(YEAR, 2013).unwrap(), date(2013, 2, 28));
        assert_eq!(date(2013, 1, 31).with(MONTH_AS_NUMBER, 4).unwrap(), date(2013, 4, 30));
        assert_eq!(
            date(2013, 5, 31).with(QUARTER_OF_YEAR, Quarter::Q1).unwrap(),
            date(2013, 2, 28)
        );
        assert!(leap.with(DAY_OF_MONTH, 30).is_err());
        assert_eq!(leap.with_lenient(DAY_OF_MONTH, 30).unwrap(), date(2012, 3, 1));
    }

    #[test]
    fn weekday_setters() {
        let leap = date(2012, 2, 29);
        assert_eq!(leap.with(DAY_OF_WEEK, Weekday::Monday).unwrap(), date(2012, 2, 27));
        assert_eq!(leap.get(WEEKDAY_IN_MONTH).unwrap(), 5);
        assert_eq!(leap.get_maximum(WEEKDAY_IN_MONTH).unwrap(), 5);
        assert_eq!(date(2012, 2, 1).get_maximum(WEEKDAY_IN_MONTH).unwrap(), 5);
        assert_eq!(date(2012, 2, 2).get_maximum(WEEKDAY_IN_MONTH).unwrap(), 4);
        let us = Weekmodel::of(Weekday::Sunday, 1).unwrap();
        // the US week of Wednesday 2012-02-29 starts on Sunday 02-26
        assert_eq!(leap.with(us.local_day_of_week(), Weekday::Sunday).unwrap(), date(2012, 2, 26));
        assert_eq!(leap.minimized(us.local_day_of_week()).unwrap(), date(2012, 2, 26));
        assert_eq!(leap.maximized(us.local_day_of_week()).unwrap(), date(2012, 3, 3));
    }

    #[test]
    fn week_elements() {
        let iso = Weekmodel::ISO;
        let d = date(2012, 1, 1);
        assert_eq!(d.get(iso.week_of_year()).unwrap(), 52);
        assert_eq!(d.get(YEAR_OF_WEEKDATE).unwrap(), 2011);
        assert_eq!(date(2015, 6, 1).get_maximum(iso.week_of_year()).unwrap(), 53);
        assert_eq!(
            date(2015, 12, 31).with(YEAR_OF_WEEKDATE, 2016).unwrap(),
            date(2016, 12, 29)
        );
        // March 2013 starts on a Friday: a short week 0
        let march = date(2013, 3, 13);
        assert_eq!(march.get_minimum(iso.week_of_month()).unwrap(), 0);
        assert_eq!(march.with(iso.week_of_month(), 0).unwrap(), date(2013, 3, 1));
        assert_eq!(march.get_maximum(iso.week_of_month()).unwrap(), 4);
    }

    #[test]
    fn floor_and_ceiling() {
        let d = date(2012, 5, 17);
        assert_eq!(d.at_floor(YEAR).unwrap(), date(2012, 1, 1));
        assert_eq!(d.at_ceiling(YEAR).unwrap(), date(2012, 12, 31));
        assert_eq!(d.at_ceiling(QUARTER_OF_YEAR).unwrap(), date(2012, 6, 30));
        assert_eq!(d.at_floor(Weekmodel::ISO.week_of_year()).unwrap(), date(2012, 5, 14));
        assert_eq!(d.at_floor(YEAR_OF_WEEKDATE).unwrap(), date(2012, 1, 2));
        assert_eq!(d.at_floor(DAY_OF_QUARTER).unwrap(), d);
    }

    #[test]
    fn navigation() {
        let leap = date(2012, 2, 29);
        assert_eq!(leap.set_to_next(DAY_OF_WEEK, Weekday::Wednesday).unwrap(), date(2012, 3, 7));
        assert_eq!(leap.set_to_next_or_same(DAY_OF_WEEK, Weekday::Wednesday).unwrap(), leap);
        assert_eq!(leap.set_to_previous(DAY_OF_WEEK, Weekday::Sunday).unwrap(), date(2012, 2, 26));
        assert_eq!(leap.set_to_next(MONTH_AS_NUMBER, 2).unwrap(), date(2013, 2, 28));
        assert!(leap.set_to_next(DAY_OF_MONTH, 1).is_err());
    }
}
