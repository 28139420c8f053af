//! Calendar-date consistency and arithmetic.

use proptest::prelude::*;

use tempora_duration::Duration;
use tempora_units::CalendarUnit;
use tempora_time::{
    ChronoEntity, EpochDays, Month, PlainDate, Weekday, Weekmodel, DAY_OF_MONTH, DAY_OF_WEEK,
    DAY_OF_YEAR, MONTH_OF_YEAR, YEAR,
};

fn date(y: i32, m: u8, d: u8) -> PlainDate {
    PlainDate::of(y, m, d).unwrap()
}

// ─── Consistency ──────────────────────────────────────────────────────────────

#[test]
fn consistency_over_consecutive_days() {
    let start = date(1895, 1, 1);
    let end = date(2105, 12, 31);
    let mut previous = start;
    let mut current = start.plus(1, CalendarUnit::DAYS).unwrap();
    while current <= end {
        let unix = current.epoch_day(EpochDays::Unix).unwrap();
        assert_eq!(unix, previous.epoch_day(EpochDays::Unix).unwrap() + 1);
        assert_eq!(PlainDate::of_epoch_day(unix, EpochDays::Unix).unwrap(), current);
        assert_eq!(current.day_of_week(), previous.day_of_week().next());

        if current.year() == previous.year() {
            assert_eq!(current.day_of_year(), previous.day_of_year() + 1);
        } else {
            assert_eq!(current.day_of_year(), 1, "{current} does not start a year");
            assert_eq!(previous.length_of_year(), previous.day_of_year());
        }
        if current.month() != previous.month() {
            assert_eq!(current.day_of_month(), 1);
            assert_eq!(previous.day_of_month(), previous.length_of_month());
        }
        assert_eq!(
            PlainDate::of_year_day(current.year(), current.day_of_year()).unwrap(),
            current
        );
        previous = current;
        current = current.plus(1, CalendarUnit::DAYS).unwrap();
    }
}

#[test]
fn week_dates_round_trip() {
    let iso = Weekmodel::ISO;
    let mut d = date(2000, 1, 1);
    while d.year() < 2030 {
        let week = d.get(iso.week_of_year()).unwrap();
        let year = d.get(tempora_time::YEAR_OF_WEEKDATE).unwrap();
        assert_eq!(
            PlainDate::of_week_date(year, week as u8, d.day_of_week()).unwrap(),
            d,
            "week date of {d}"
        );
        d = d.plus(3, CalendarUnit::DAYS).unwrap();
    }
}

// ─── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn leap_day_plus_one_year() {
    assert_eq!(date(2012, 2, 29).plus(1, CalendarUnit::YEARS).unwrap(), date(2013, 2, 28));
    let carry = CalendarUnit::YEARS.with_carry_over();
    assert_eq!(date(2012, 2, 29).plus(1, carry).unwrap(), date(2013, 3, 1));
    assert!(date(2012, 2, 29)
        .plus(1, CalendarUnit::YEARS.unless_invalid())
        .is_err());
}

#[test]
fn monday_of_the_leap_day_week() {
    let leap = date(2012, 2, 29);
    assert_eq!(leap.with(DAY_OF_WEEK, Weekday::Monday).unwrap(), date(2012, 2, 27));
    assert_eq!(leap.get(DAY_OF_WEEK).unwrap(), Weekday::Wednesday);
}

#[test]
fn end_of_month_policies() {
    let jan = date(2013, 1, 31);
    assert_eq!(jan.plus(1, CalendarUnit::MONTHS).unwrap(), date(2013, 2, 28));
    assert_eq!(
        date(2013, 2, 28)
            .plus(1, CalendarUnit::MONTHS.keeping_end_of_month())
            .unwrap(),
        date(2013, 3, 31)
    );
    assert_eq!(
        date(2013, 4, 15)
            .plus(1, CalendarUnit::MONTHS.at_end_of_month())
            .unwrap(),
        date(2013, 5, 31)
    );
}

#[test]
fn metric_and_durations() {
    let start = date(2012, 1, 31);
    let end = date(2013, 3, 1);
    assert_eq!(start.until(&end, CalendarUnit::MONTHS).unwrap(), 13);
    assert_eq!(start.until(&end, CalendarUnit::DAYS).unwrap(), 395);
    let d = start
        .until_duration(&end, &[CalendarUnit::YEARS, CalendarUnit::MONTHS, CalendarUnit::DAYS])
        .unwrap();
    assert_eq!(d.to_string(), "P1Y1M1D");
    assert_eq!(start.plus_duration(&d).unwrap(), end);
    let back = Duration::of(-13, CalendarUnit::MONTHS).unwrap();
    assert_eq!(date(2013, 2, 28).plus_duration(&back).unwrap(), date(2012, 1, 28));
}

#[test]
fn element_access() {
    let d = date(2012, 2, 29);
    assert_eq!(d.get(YEAR).unwrap(), 2012);
    assert_eq!(d.get(MONTH_OF_YEAR).unwrap(), Month::February);
    assert_eq!(d.get(DAY_OF_YEAR).unwrap(), 60);
    assert_eq!(d.get_maximum(DAY_OF_MONTH).unwrap(), 29);
    assert_eq!(date(2013, 2, 1).get_maximum(DAY_OF_MONTH).unwrap(), 28);
    assert_eq!(d.with(MONTH_OF_YEAR, Month::April).unwrap(), date(2012, 4, 29));
    assert_eq!(d.maximized(DAY_OF_YEAR).unwrap(), date(2012, 12, 31));
    assert_eq!(d.incremented(DAY_OF_MONTH).unwrap(), date(2012, 3, 1));
}

#[test]
fn bounds_and_text() {
    assert!(PlainDate::of(1_000_000_000, 1, 1).is_err());
    assert!(PlainDate::of(2013, 2, 29).is_err());
    assert_eq!(date(-44, 3, 15).to_string(), "-0044-03-15");
    assert_eq!("+12345-01-02".parse::<PlainDate>().unwrap(), date(12345, 1, 2));
    let err = "2012-13-01".parse::<PlainDate>().unwrap_err();
    assert_eq!(err.error_offset(), Some(5));
}

proptest! {
    #[test]
    fn text_round_trip(days in -1_000_000i64..1_000_000) {
        let d = PlainDate::of_epoch_day(days, EpochDays::Unix).unwrap();
        prop_assert_eq!(d.to_string().parse::<PlainDate>().unwrap(), d);
    }

    #[test]
    fn plus_then_until_days(days in -100_000i64..100_000) {
        let start = date(2000, 1, 1);
        let end = start.plus(days, CalendarUnit::DAYS).unwrap();
        prop_assert_eq!(start.until(&end, CalendarUnit::DAYS).unwrap(), days);
    }
}
