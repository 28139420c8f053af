//! # tempora-units
//!
//! Units of time: calendar units (years, months, weeks, days, … each paired
//! with an overflow policy), clock units (hours down to nanoseconds), and the
//! union of both used by timestamp arithmetic.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `CalendarUnit`, `CalendarUnitKind` and `OverflowPolicy`.
pub mod calendar_unit;

/// `ClockUnit`: hours, minutes, seconds and sub-second units.
pub mod clock_unit;

/// `IsoUnit`: either a calendar or a clock unit.
pub mod iso_unit;

/// The `ChronoUnit` trait shared by all unit types.
pub mod unit;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar_unit::{CalendarUnit, CalendarUnitKind, OverflowPolicy};
pub use clock_unit::ClockUnit;
pub use iso_unit::IsoUnit;
pub use unit::{by_length_descending, ChronoUnit};
