//! Element value types and their raw `i64` mapping.
//!
//! Rules work on raw values; typed access goes through [`ElementValue`],
//! whose mapping is lossless in both directions for every valid value.

use tempora_units::ClockUnit;

use crate::meridiem::Meridiem;
use crate::month::Month;
use crate::quarter::Quarter;
use crate::weekday::Weekday;

/// The value type of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// [`Weekday`]
    Weekday,
    /// [`Month`]
    Month,
    /// [`Quarter`]
    Quarter,
    /// [`Meridiem`]
    Meridiem,
    /// [`ClockUnit`]
    ClockUnit,
}

/// A type usable as the value of an element.
pub trait ElementValue: Copy + PartialEq + std::fmt::Debug + 'static {
    /// The matching [`ValueKind`].
    const KIND: ValueKind;

    /// Raw representation.
    fn to_raw(self) -> i64;

    /// Value of a raw representation, `None` if there is none.
    fn from_raw(raw: i64) -> Option<Self>;
}

impl ElementValue for i32 {
    const KIND: ValueKind = ValueKind::I32;

    fn to_raw(self) -> i64 {
        i64::from(self)
    }

    fn from_raw(raw: i64) -> Option<Self> {
        i32::try_from(raw).ok()
    }
}

impl ElementValue for i64 {
    const KIND: ValueKind = ValueKind::I64;

    fn to_raw(self) -> i64 {
        self
    }

    fn from_raw(raw: i64) -> Option<Self> {
        Some(raw)
    }
}

impl ElementValue for Weekday {
    const KIND: ValueKind = ValueKind::Weekday;

    fn to_raw(self) -> i64 {
        i64::from(self.ordinal())
    }

    fn from_raw(raw: i64) -> Option<Self> {
        u8::try_from(raw).ok().and_then(Weekday::from_ordinal)
    }
}

impl ElementValue for Month {
    const KIND: ValueKind = ValueKind::Month;

    fn to_raw(self) -> i64 {
        i64::from(self.number())
    }

    fn from_raw(raw: i64) -> Option<Self> {
        u8::try_from(raw).ok().and_then(Month::from_number)
    }
}

impl ElementValue for Quarter {
    const KIND: ValueKind = ValueKind::Quarter;

    fn to_raw(self) -> i64 {
        i64::from(self.number())
    }

    fn from_raw(raw: i64) -> Option<Self> {
        u8::try_from(raw).ok().and_then(Quarter::from_number)
    }
}

impl ElementValue for Meridiem {
    const KIND: ValueKind = ValueKind::Meridiem;

    fn to_raw(self) -> i64 {
        match self {
            Meridiem::Am => 0,
            Meridiem::Pm => 1,
        }
    }

    fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Meridiem::Am),
            1 => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

impl ElementValue for ClockUnit {
    const KIND: ValueKind = ValueKind::ClockUnit;

    fn to_raw(self) -> i64 {
        self as i64
    }

    fn from_raw(raw: i64) -> Option<Self> {
        usize::try_from(raw)
            .ok()
            .and_then(|i| ClockUnit::ALL.get(i).copied())
    }
}
