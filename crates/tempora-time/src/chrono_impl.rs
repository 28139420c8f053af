//! `chrono` interop for the plain entities.
//!
//! Conversions into tempora are lossless. The way back fails for years
//! beyond chrono's range and for the 24:00 sentinel.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tempora_core::errors::{Error, Result};

use crate::plain_date::PlainDate;
use crate::plain_time::PlainTime;
use crate::plain_timestamp::PlainTimestamp;
use crate::weekday::Weekday;

impl From<NaiveDate> for PlainDate {
    fn from(date: NaiveDate) -> Self {
        // chrono years lie well inside ±999,999,999
        PlainDate::of(date.year(), date.month() as u8, date.day() as u8).unwrap_or(PlainDate::MIN)
    }
}

impl TryFrom<PlainDate> for NaiveDate {
    type Error = Error;

    fn try_from(date: PlainDate) -> Result<Self> {
        NaiveDate::from_ymd_opt(
            date.year(),
            u32::from(date.month_number()),
            u32::from(date.day_of_month()),
        )
        .ok_or_else(|| Error::OutOfRange(format!("{date} exceeds the range of chrono::NaiveDate")))
    }
}

impl From<NaiveTime> for PlainTime {
    fn from(time: NaiveTime) -> Self {
        // a chrono leap second ends at the last nanosecond of its minute
        let nano = time.nanosecond().min(999_999_999);
        PlainTime::of(time.hour() as u8, time.minute() as u8, time.second() as u8, nano)
            .unwrap_or(PlainTime::MIDNIGHT_AT_START)
    }
}

impl TryFrom<PlainTime> for NaiveTime {
    type Error = Error;

    fn try_from(time: PlainTime) -> Result<Self> {
        NaiveTime::from_hms_nano_opt(
            u32::from(time.hour()),
            u32::from(time.minute()),
            u32::from(time.second()),
            time.nanosecond(),
        )
        .ok_or_else(|| Error::OutOfRange(format!("{time} has no chrono::NaiveTime")))
    }
}

impl From<NaiveDateTime> for PlainTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        let date = PlainDate::from(value.date());
        PlainTimestamp::of(date, PlainTime::from(value.time()))
            .unwrap_or_else(|_| date.at_start_of_day())
    }
}

impl TryFrom<PlainTimestamp> for NaiveDateTime {
    type Error = Error;

    fn try_from(value: PlainTimestamp) -> Result<Self> {
        Ok(NaiveDateTime::new(
            NaiveDate::try_from(value.date())?,
            NaiveTime::try_from(value.time())?,
        ))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}
