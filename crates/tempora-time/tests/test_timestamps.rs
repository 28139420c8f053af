//! Local timestamps: carrying arithmetic, metrics and instants.

use tempora_core::gregorian::epoch_day;
use tempora_core::{Settings, SECONDS_PER_DAY};
use tempora_duration::{Duration, Normalizer};
use tempora_scale::{LeapSeconds, Moment};
use tempora_units::{CalendarUnit, ClockUnit, IsoUnit};
use tempora_time::{MomentExt, PlainDate, PlainTime, PlainTimestamp};

fn ts(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> PlainTimestamp {
    PlainTimestamp::of_components(y, mo, d, h, mi, s).unwrap()
}

#[test]
fn end_of_day_is_applied_once() {
    let date = PlainDate::of(2012, 2, 29).unwrap();
    let t = PlainTimestamp::of(date, PlainTime::MIDNIGHT_AT_END).unwrap();
    assert_eq!(t, ts(2012, 3, 1, 0, 0, 0));
    assert_eq!("2012-02-29T24:00".parse::<PlainTimestamp>().unwrap(), t);
}

#[test]
fn clock_units_carry_into_the_date() {
    let t = ts(2012, 2, 28, 23, 59, 59);
    let later = PlainTimestamp::of(
        PlainDate::of(2012, 2, 29).unwrap(),
        PlainTime::of(0, 0, 0, 1).unwrap(),
    )
    .unwrap();
    assert_eq!(t.plus(1_000_000_001, IsoUnit::NANOS).unwrap(), later);
    assert_eq!(t.plus(49, IsoUnit::HOURS).unwrap(), ts(2012, 3, 2, 0, 59, 59));
    assert_eq!(t.minus(24, IsoUnit::HOURS).unwrap(), ts(2012, 2, 27, 23, 59, 59));
    assert_eq!(t.plus(0, IsoUnit::NANOS).unwrap(), t);
}

#[test]
fn calendar_units_act_on_the_date() {
    let t = ts(2012, 2, 29, 12, 30, 0);
    assert_eq!(t.plus(1, IsoUnit::YEARS).unwrap(), ts(2013, 2, 28, 12, 30, 0));
    let carry = IsoUnit::from(CalendarUnit::MONTHS.with_carry_over());
    assert_eq!(t.plus(1, carry).unwrap(), ts(2012, 3, 29, 12, 30, 0));
    let d = Duration::of_positive().months(1).hours(12).build().unwrap();
    let later = t.plus_duration(&d).unwrap();
    assert_eq!(later, ts(2012, 3, 30, 0, 30, 0));
    // months go back first, so the round trip lands half a day early
    assert_eq!(later.minus_duration(&d).unwrap(), ts(2012, 2, 28, 12, 30, 0));
}

#[test]
fn metric() {
    let start = ts(2012, 2, 28, 12, 0, 0);
    let end = ts(2012, 3, 1, 11, 59, 59);
    assert_eq!(start.until(&end, IsoUnit::DAYS).unwrap(), 1);
    assert_eq!(start.until(&end, IsoUnit::HOURS).unwrap(), 47);
    assert_eq!(end.until(&start, IsoUnit::MINUTES).unwrap(), -(47 * 60 + 59));
    let units = [IsoUnit::DAYS, IsoUnit::HOURS, IsoUnit::MINUTES, IsoUnit::SECONDS];
    let d = start.until_duration(&end, &units).unwrap();
    assert_eq!(d.to_string(), "P1DT23H59M59S");
    assert_eq!(start.plus_duration(&d).unwrap(), end);
}

#[test]
fn normalized_from_a_start_timestamp() {
    let start = ts(2012, 2, 28, 12, 0, 0);
    let d: Duration<IsoUnit> = "P1DT36H".parse().unwrap();
    assert_eq!(start.normalize(&d).unwrap().to_string(), "P2DT12H");
}

#[test]
fn instants() {
    let t = ts(2012, 2, 29, 12, 30, 0);
    let utc = t.at_utc().unwrap();
    assert_eq!(utc.posix_seconds(), epoch_day(2012, 2, 29) * SECONDS_PER_DAY + 45_000);
    assert_eq!(utc.to_timestamp_utc().unwrap(), t);
    let east = t.at_offset(3_600).unwrap();
    assert_eq!(east.posix_seconds(), utc.posix_seconds() - 3_600);
    assert_eq!(east.to_timestamp_at_offset(3_600).unwrap(), t);
    assert_eq!(Moment::UNIX_EPOCH.to_timestamp_utc().unwrap(), ts(1970, 1, 1, 0, 0, 0));
    let before = Moment::of_posix(-1, 500_000_000).unwrap();
    assert_eq!(
        before.to_timestamp_utc().unwrap().time(),
        PlainTime::of(23, 59, 59, 500_000_000).unwrap()
    );
}

#[test]
fn leap_second_maps_to_the_last_civil_second() {
    let _ = Settings::init(Settings::new(true));
    let table = LeapSeconds::standard();
    let new_year = epoch_day(2017, 1, 1) * SECONDS_PER_DAY;
    let leap = Moment::of_utc(table.enhance(new_year) - 1, 0, table).unwrap();
    assert!(leap.is_leap_second());
    assert_eq!(leap.to_timestamp_utc().unwrap(), ts(2016, 12, 31, 23, 59, 59));
}

#[test]
fn text() {
    let t = PlainTimestamp::of(
        PlainDate::of(2012, 2, 29).unwrap(),
        PlainTime::of(12, 30, 15, 250_000_000).unwrap(),
    )
    .unwrap();
    assert_eq!(t.to_string(), "2012-02-29T12:30:15.250");
    assert_eq!(t.to_string().parse::<PlainTimestamp>().unwrap(), t);
    let err = "2012-02-29 12:30".parse::<PlainTimestamp>().unwrap_err();
    assert_eq!(err.error_offset(), Some(10));
    assert!("2012-02-29T12:30".parse::<PlainTimestamp>().unwrap() < t);
    assert!(t.is_before(&t.plus(1, IsoUnit::from(ClockUnit::Nanos)).unwrap()));
}
