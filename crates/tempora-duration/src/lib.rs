//! # tempora-duration
//!
//! `Duration<U>`: an amount of time expressed as an ordered set of
//! `(amount, unit)` items sharing one sign, together with its builder,
//! normalizers, set union, and the ISO-8601 derived text format
//! (`P12Y4M3DT150H2M4,758S`).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Multi-field builder with duplicate detection.
pub mod builder;

/// The `Duration<U>` type and its arithmetic.
pub mod duration;

/// Mapping between units and the ISO-8601 unit symbols.
pub mod iso;

/// `Item<U>`: one `(amount, unit)` pair.
pub mod item;

/// Standard normalizers.
pub mod normalizer;

/// ISO-8601 duration parser.
pub mod parser;

/// ISO-8601 duration printer.
pub mod printer;

#[cfg(feature = "serde")]
mod serde_impl;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use builder::DurationBuilder;
pub use duration::Duration;
pub use iso::{IsoFormatUnit, IsoSymbol};
pub use item::Item;
pub use normalizer::{Normalizer, StdCalendarPeriod, StdClockPeriod, StdPeriod};
