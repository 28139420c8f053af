//! Wall times, with the full element matrix of the 24:00 sentinel.

use tempora_units::ClockUnit;
use tempora_time::{
    ChronoEntity, Element, ElementValue, Meridiem, PlainTime, AM_PM_OF_DAY, CLOCK_HOUR_OF_AMPM,
    CLOCK_HOUR_OF_DAY, DIGITAL_HOUR_OF_AMPM, DIGITAL_HOUR_OF_DAY, ISO_HOUR, MICRO_OF_DAY,
    MICRO_OF_SECOND, MILLI_OF_DAY, MILLI_OF_SECOND, MINUTE_OF_DAY, MINUTE_OF_HOUR, NANO_OF_DAY,
    NANO_OF_SECOND, PRECISION, SECOND_OF_DAY, SECOND_OF_MINUTE,
};

const END: PlainTime = PlainTime::MIDNIGHT_AT_END;

fn time(h: u8, m: u8, s: u8, n: u32) -> PlainTime {
    PlainTime::of(h, m, s, n).unwrap()
}

fn unchanged_at_floor_and_ceiling<V>(element: Element<V>) {
    assert_eq!(END.at_floor(element).unwrap(), END, "{element} floor");
    assert_eq!(END.at_ceiling(element).unwrap(), END, "{element} ceiling");
}

fn assert_value<V: ElementValue>(element: Element<V>, value: V) {
    assert_eq!(END.get(element).unwrap(), value, "{element}");
}

// ─── Hour 24 ──────────────────────────────────────────────────────────────────

#[test]
fn values_at_end_of_day() {
    assert_value(AM_PM_OF_DAY, Meridiem::Am);
    assert_value(CLOCK_HOUR_OF_AMPM, 12);
    assert_value(CLOCK_HOUR_OF_DAY, 24);
    assert_value(DIGITAL_HOUR_OF_AMPM, 0);
    assert_value(DIGITAL_HOUR_OF_DAY, 0);
    assert_value(ISO_HOUR, 24);
    assert_value(MINUTE_OF_HOUR, 0);
    assert_value(SECOND_OF_MINUTE, 0);
    assert_value(MILLI_OF_SECOND, 0);
    assert_value(MICRO_OF_SECOND, 0);
    assert_value(NANO_OF_SECOND, 0);
    assert_value(MINUTE_OF_DAY, 1_440);
    assert_value(SECOND_OF_DAY, 86_400);
    assert_value(MILLI_OF_DAY, 86_400_000);
    assert_value(MICRO_OF_DAY, 86_400_000_000);
    assert_value(NANO_OF_DAY, 86_400_000_000_000);
    assert_value(PRECISION, ClockUnit::Hours);
    for element in [MINUTE_OF_HOUR, SECOND_OF_MINUTE, NANO_OF_SECOND] {
        assert_eq!(END.get_minimum(element).unwrap(), 0);
        assert_eq!(END.get_maximum(element).unwrap(), 0);
    }
}

#[test]
fn minimized_at_end_of_day() {
    let midnight = PlainTime::MIDNIGHT_AT_START;
    assert_eq!(END.minimized(ISO_HOUR).unwrap(), midnight);
    assert_eq!(END.minimized(MINUTE_OF_DAY).unwrap(), midnight);
    assert_eq!(END.minimized(SECOND_OF_DAY).unwrap(), midnight);
    assert_eq!(END.minimized(MILLI_OF_DAY).unwrap(), midnight);
    assert_eq!(END.minimized(MICRO_OF_DAY).unwrap(), midnight);
    assert_eq!(END.minimized(NANO_OF_DAY).unwrap(), midnight);
    assert_eq!(END.minimized(CLOCK_HOUR_OF_DAY).unwrap(), time(1, 0, 0, 0));
    assert_eq!(END.minimized(CLOCK_HOUR_OF_AMPM).unwrap(), time(1, 0, 0, 0));
    assert_eq!(END.minimized(AM_PM_OF_DAY).unwrap(), END);
    assert_eq!(END.minimized(DIGITAL_HOUR_OF_DAY).unwrap(), END);
    assert_eq!(END.minimized(DIGITAL_HOUR_OF_AMPM).unwrap(), END);
    assert_eq!(END.minimized(MINUTE_OF_HOUR).unwrap(), END);
    assert_eq!(END.minimized(NANO_OF_SECOND).unwrap(), END);
    assert_eq!(END.minimized(PRECISION).unwrap(), END);
}

#[test]
fn maximized_at_end_of_day() {
    assert_eq!(END.maximized(DIGITAL_HOUR_OF_DAY).unwrap(), time(23, 0, 0, 0));
    assert_eq!(END.maximized(DIGITAL_HOUR_OF_AMPM).unwrap(), time(11, 0, 0, 0));
    assert_eq!(END.maximized(AM_PM_OF_DAY).unwrap(), PlainTime::NOON);
    assert_eq!(END.maximized(ISO_HOUR).unwrap(), END);
    assert_eq!(END.maximized(CLOCK_HOUR_OF_DAY).unwrap(), END);
    assert_eq!(END.maximized(CLOCK_HOUR_OF_AMPM).unwrap(), END);
    assert_eq!(END.maximized(MINUTE_OF_DAY).unwrap(), END);
    assert_eq!(END.maximized(NANO_OF_DAY).unwrap(), END);
    assert_eq!(END.maximized(SECOND_OF_MINUTE).unwrap(), END);
    assert_eq!(END.maximized(MICRO_OF_SECOND).unwrap(), END);
    assert_eq!(END.maximized(PRECISION).unwrap(), END);
}

#[test]
fn stepping_from_end_of_day() {
    assert_eq!(END.incremented(CLOCK_HOUR_OF_DAY).unwrap(), time(1, 0, 0, 0));
    assert_eq!(END.incremented(MINUTE_OF_HOUR).unwrap(), time(0, 1, 0, 0));
    assert_eq!(END.incremented(AM_PM_OF_DAY).unwrap(), PlainTime::NOON);
    assert_eq!(END.incremented(NANO_OF_DAY).unwrap(), time(0, 0, 0, 1));
    assert_eq!(END.decremented(ISO_HOUR).unwrap(), time(23, 0, 0, 0));
    assert_eq!(END.decremented(SECOND_OF_MINUTE).unwrap(), time(23, 59, 59, 0));
    assert_eq!(END.decremented(MILLI_OF_SECOND).unwrap(), time(23, 59, 59, 999_000_000));
}

#[test]
fn floor_and_ceiling_are_no_ops_at_end_of_day() {
    unchanged_at_floor_and_ceiling(AM_PM_OF_DAY);
    unchanged_at_floor_and_ceiling(ISO_HOUR);
    unchanged_at_floor_and_ceiling(CLOCK_HOUR_OF_DAY);
    unchanged_at_floor_and_ceiling(DIGITAL_HOUR_OF_AMPM);
    unchanged_at_floor_and_ceiling(MINUTE_OF_HOUR);
    unchanged_at_floor_and_ceiling(MINUTE_OF_DAY);
    unchanged_at_floor_and_ceiling(SECOND_OF_DAY);
    unchanged_at_floor_and_ceiling(NANO_OF_DAY);
}

// ─── Arithmetic and text ──────────────────────────────────────────────────────

#[test]
fn arithmetic_wraps_around_the_day() {
    assert_eq!(END.plus(1, ClockUnit::Hours), time(1, 0, 0, 0));
    assert_eq!(END.plus(0, ClockUnit::Hours), END);
    assert_eq!(time(0, 0, 0, 0).minus(1, ClockUnit::Nanos), time(23, 59, 59, 999_999_999));
    let cycles = time(23, 0, 0, 0).roll(-47, ClockUnit::Hours);
    assert_eq!(cycles.day_overflow(), -1);
    assert_eq!(cycles.wall_time(), time(0, 0, 0, 0));
    assert_eq!(time(10, 0, 0, 0).until(&END, ClockUnit::Minutes), 840);
    let units = [ClockUnit::Hours, ClockUnit::Minutes, ClockUnit::Seconds];
    let d = time(10, 15, 0, 0).until_duration(&time(12, 0, 30, 0), &units).unwrap();
    assert_eq!(d.to_string(), "PT1H45M30S");
}

#[test]
fn iso_text() {
    assert_eq!(time(12, 30, 0, 0).to_string(), "T12:30");
    assert_eq!(time(12, 30, 15, 500_000_000).to_string(), "T12:30:15.500");
    assert_eq!(time(1, 2, 3, 4).to_string(), "T01:02:03.000000004");
    assert_eq!(END.to_string(), "T24:00");
    assert_eq!("12:30:15.5".parse::<PlainTime>().unwrap(), time(12, 30, 15, 500_000_000));
    assert_eq!("T24:00".parse::<PlainTime>().unwrap(), END);
    assert!("24:00:01".parse::<PlainTime>().is_err());
    assert!("12:60".parse::<PlainTime>().is_err());
}
