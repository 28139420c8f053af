//! # tempora
//!
//! Exact date, time, duration and machine-time arithmetic.
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates. Application code should depend on this crate rather
//! than the individual `tempora-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use tempora::prelude::*;
//!
//! let leap = PlainDate::of(2012, 2, 29).unwrap();
//! assert_eq!(leap.plus(1, CalendarUnit::YEARS).unwrap().to_string(), "2013-02-28");
//! assert_eq!(leap.with(DAY_OF_WEEK, Weekday::Monday).unwrap().to_string(), "2012-02-27");
//!
//! let d: Duration<IsoUnit> = "P12Y4M3DT150H2M4,758S".parse().unwrap();
//! assert_eq!(d.negate().to_string(), "-P12Y4M3DT150H2M4,758S");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Errors, checked arithmetic, the gregorian kernel and settings.
pub use tempora_core as core;

/// Calendar and clock units.
pub use tempora_units as units;

/// Multi-unit durations and their ISO-8601 text.
pub use tempora_duration as duration;

/// Machine time, leap seconds and instants.
pub use tempora_scale as scale;

/// Plain dates, times and timestamps on the element engine.
pub use tempora_time as time;

pub use tempora_core::{Error, Result};

/// The commonly used types, traits and elements in one import.
pub mod prelude {
    pub use tempora_core::{Error, Result, Settings};
    pub use tempora_duration::{Duration, Normalizer};
    pub use tempora_scale::{
        LeapSeconds, MachineTime, MachineTimeFormatter, Moment, Posix, RoundingMode, Utc,
    };
    pub use tempora_time::engine::element::*;
    pub use tempora_time::{
        ChronoEntity, EpochDays, Meridiem, MomentExt, Month, PlainDate, PlainTime,
        PlainTimestamp, Quarter, Weekday, Weekmodel,
    };
    pub use tempora_units::{CalendarUnit, ClockUnit, IsoUnit, OverflowPolicy};
}

/// Build every lazily initialized registry now: the element axes and the
/// leap-second table selected by the [`Settings`](tempora_core::Settings).
pub fn init() {
    tempora_time::init();
    let leap_seconds = tempora_scale::LeapSeconds::standard().count();
    tracing::debug!(leap_seconds, "tempora initialized");
}
