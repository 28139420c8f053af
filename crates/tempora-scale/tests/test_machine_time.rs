//! Machine-time arithmetic and pattern round trips.

use proptest::prelude::*;

use tempora_core::Error;
use tempora_scale::{MachineTime, MachineTimeFormatter, Posix, RoundingMode, TimeScale, Utc};
use tempora_units::ClockUnit;

#[test]
fn si_units_are_floor_normalized() {
    let t = MachineTime::<Utc>::of_si_units(-2, -123_456_789).unwrap();
    assert_eq!(t.seconds(), -3);
    assert_eq!(t.fraction(), 876_543_211);
    assert_eq!(t.scale(), TimeScale::Utc);
}

#[test]
fn division_rounds_the_combined_value() {
    let t = MachineTime::<Posix>::of_posix_units(7, 500_000_001).unwrap();
    let q = t.divided_by(3, RoundingMode::HalfUp).unwrap();
    assert_eq!((q.seconds(), q.fraction()), (2, 500_000_000));
    let q = t.divided_by(3, RoundingMode::Up).unwrap();
    assert_eq!((q.seconds(), q.fraction()), (2, 500_000_001));
    let q = t.divided_by(-2, RoundingMode::HalfEven).unwrap();
    assert_eq!(q.to_decimal_string(), "-3.75");
}

#[test]
fn plus_amount_and_comparison() {
    let t = MachineTime::<Posix>::ZERO
        .plus_amount(90, ClockUnit::Minutes)
        .unwrap()
        .plus_amount(-1, ClockUnit::Nanos)
        .unwrap();
    assert_eq!(t.seconds(), 5_399);
    assert_eq!(t.fraction(), 999_999_999);
    assert!(t < MachineTime::of(90, ClockUnit::Minutes).unwrap());
    assert!(t.is_positive());
}

#[test]
fn rounding_necessary_is_reported() {
    let t = MachineTime::<Posix>::of(1, ClockUnit::Nanos).unwrap();
    assert!(matches!(
        t.divided_by(2, RoundingMode::Unnecessary),
        Err(Error::InvalidValue(_))
    ));
}

#[test]
fn inner_fields_reject_values_beyond_their_radix() {
    let f = MachineTimeFormatter::<Posix>::of_pattern("+D:hh:mm:ss").unwrap();
    let offset = |text: &str| f.parse(text).unwrap_err().error_offset();
    assert_eq!(offset("+0:99:00:00"), Some(3));
    assert_eq!(offset("+0:24:00:00"), Some(3));
    assert_eq!(offset("+0:00:75:00"), Some(6));
    assert_eq!(offset("+0:00:00:60"), Some(9));
    let t = f.parse("+0:23:59:59").unwrap();
    assert_eq!(f.format(&t).unwrap(), "+0:23:59:59");
    // the leading field absorbs the whole magnitude
    let hours = MachineTimeFormatter::<Posix>::of_pattern("hh:mm").unwrap();
    assert_eq!(hours.parse("99:00").unwrap().seconds(), 99 * 3_600);
    assert!(hours.parse("99:60").is_err());
}

proptest! {
    #[test]
    fn clock_pattern_round_trip(seconds in -10_000_000i64..10_000_000, nanos in 0i64..1_000_000_000) {
        let f = MachineTimeFormatter::<Posix>::of_pattern("-D'd 'hh:mm:ss.fffffffff").unwrap();
        let t = MachineTime::of_posix_units(seconds, nanos).unwrap();
        let text = f.format(&t).unwrap();
        prop_assert_eq!(f.parse(&text).unwrap(), t);
    }

    #[test]
    fn seconds_pattern_round_trip(millis in -1_000_000_000i64..1_000_000_000) {
        let f = MachineTimeFormatter::<Utc>::of_pattern("+s,fff").unwrap();
        let t = MachineTime::<Utc>::of(millis, ClockUnit::Millis).unwrap();
        let text = f.format(&t).unwrap();
        prop_assert_eq!(f.parse(&text).unwrap(), t);
    }
}
