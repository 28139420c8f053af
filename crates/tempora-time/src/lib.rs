//! # tempora-time
//!
//! Plain calendar dates, wall times and local timestamps on top of a
//! generic element engine.
//!
//! * [`PlainDate`], [`PlainTime`] (including the end-of-day sentinel 24:00)
//!   and [`PlainTimestamp`] with unit arithmetic, metrics and ISO-8601 text.
//! * Every entity exposes its fields as typed [`Element`]s through the
//!   [`ChronoEntity`] protocol: `get`, `with`, `minimized`, `at_floor`,
//!   `set_to_next` and friends work identically on all three kinds.
//! * [`Weekmodel`] defines week-based elements for any first day of week
//!   and minimal first-week length.
//!
//! ```
//! use tempora_time::{ChronoEntity, PlainDate, Weekday, DAY_OF_WEEK};
//!
//! let date = PlainDate::of(2012, 2, 29).unwrap();
//! assert_eq!(date.with(DAY_OF_WEEK, Weekday::Monday).unwrap().to_string(), "2012-02-27");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Element identities, rules, axes and the entity protocol.
pub mod engine;

/// Day counts relative to well-known epochs.
pub mod epoch_days;

/// AM and PM.
pub mod meridiem;

/// Months of the year.
pub mod month;

/// Calendar dates.
pub mod plain_date;

/// Wall times.
pub mod plain_time;

/// Local timestamps.
pub mod plain_timestamp;

/// Quarters of the year.
pub mod quarter;

/// Days of the week.
pub mod weekday;

/// Week definitions.
pub mod weekmodel;

mod rules;
mod text;

#[cfg(feature = "chrono")]
mod chrono_impl;

#[cfg(feature = "serde")]
mod serde_impl;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use engine::element::{
    AM_PM_OF_DAY, CLOCK_HOUR_OF_AMPM, CLOCK_HOUR_OF_DAY, DAY_OF_MONTH, DAY_OF_QUARTER,
    DAY_OF_WEEK, DAY_OF_YEAR, DIGITAL_HOUR_OF_AMPM, DIGITAL_HOUR_OF_DAY, ISO_HOUR,
    MICRO_OF_DAY, MICRO_OF_SECOND, MILLI_OF_DAY, MILLI_OF_SECOND, MINUTE_OF_DAY,
    MINUTE_OF_HOUR, MONTH_AS_NUMBER, MONTH_OF_YEAR, NANO_OF_DAY, NANO_OF_SECOND, PRECISION,
    QUARTER_OF_YEAR, SECOND_OF_DAY, SECOND_OF_MINUTE, WEEKDAY_IN_MONTH, YEAR, YEAR_OF_WEEKDATE,
};
pub use engine::{ChronoEntity, Element, ElementId, ElementValue};
pub use epoch_days::EpochDays;
pub use meridiem::Meridiem;
pub use month::Month;
pub use plain_date::PlainDate;
pub use plain_time::{DayCycles, PlainTime};
pub use plain_timestamp::{MomentExt, PlainTimestamp};
pub use quarter::Quarter;
pub use weekday::Weekday;
pub use weekmodel::Weekmodel;

/// Build the element axes of all entity kinds now instead of on first use.
///
/// Each axis is an immutable process-wide `LazyLock` static, so entities
/// reach their registry directly and factories take no registry argument.
/// The contents are fixed at compile time; calling this only moves the
/// construction cost to a point of the caller's choosing.
pub fn init() {
    let elements = rules::date::DATE_AXIS.elements().count()
        + rules::time::TIME_AXIS.elements().count()
        + rules::timestamp::TIMESTAMP_AXIS.elements().count();
    tracing::debug!(elements, "element axes initialized");
}
