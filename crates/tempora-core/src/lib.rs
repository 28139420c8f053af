//! # tempora-core
//!
//! Core types, traits, and error definitions for tempora.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – the error hierarchy, overflow-checked
//! integer helpers, the process-wide `Settings`, and the lazily-built
//! singleton helper used by the element registries and the leap-second table.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Proleptic gregorian calendar arithmetic on epoch days.
pub mod gregorian;

/// Overflow-checked integer arithmetic with floor semantics.
pub mod math;

/// Design patterns: singleton.
pub mod patterns;

/// Global library settings (leap-second support).
pub mod settings;

// ── Primitive constants ───────────────────────────────────────────────────────

/// Nanoseconds per second.
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Seconds per (civil) day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Nanoseconds per (civil) day.
pub const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::Settings;
