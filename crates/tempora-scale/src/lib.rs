//! # tempora-scale
//!
//! Machine time: elapsed real time as whole seconds plus a nanosecond
//! fraction, tagged with a time scale.
//!
//! * [`MachineTime<S>`] for `S` = [`Posix`] (civil seconds, every day has
//!   86 400 seconds) or [`Utc`] (continuous SI seconds including leap
//!   seconds).  Mixing scales is rejected at compile time.
//! * [`LeapSeconds`] translates between the two scales.
//! * [`Moment`] is an instant which can also denote an inserted leap second.
//! * [`MachineTimeFormatter`] formats and parses machine times with patterns
//!   such as `+D:hh:mm:ss` or `-##s,ffffff`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Pattern-driven formatter and parser.
pub mod formatter;

/// The leap-second table.
pub mod leap_seconds;

/// `MachineTime<S>` and its arithmetic.
pub mod machine_time;

/// Instants on the time line.
pub mod moment;

/// Rounding modes for integer division.
pub mod rounding;

/// Time-scale markers.
pub mod scale;

#[cfg(feature = "chrono")]
mod chrono_impl;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use formatter::MachineTimeFormatter;
pub use leap_seconds::LeapSeconds;
pub use machine_time::MachineTime;
pub use moment::Moment;
pub use rounding::RoundingMode;
pub use scale::{Posix, Scale, TimeScale, Utc};
