//! Singleton pattern.
//!
//! Element registries and the leap-second table are built once, on first
//! access, and are read-only afterwards.  The idiomatic container for this is
//! `std::sync::LazyLock<T>`: concurrent first accesses block on a single
//! initialisation, so at most one canonical instance ever exists.
//!
//! This module re-exports `LazyLock` and provides a convenience macro
//! [`define_singleton!`] for declaring such singletons.

/// Re-export `LazyLock` as the canonical singleton container.
pub use std::sync::LazyLock;

/// Define a singleton instance of type `$ty`.
///
/// The instance is lazily initialised on first access via `LazyLock`.
///
/// # Example
/// ```
/// use tempora_core::define_singleton;
///
/// struct Registry { names: Vec<&'static str> }
/// define_singleton!(REGISTRY, Registry, Registry { names: vec!["YEAR"] });
///
/// assert_eq!(REGISTRY.names, ["YEAR"]);
/// ```
#[macro_export]
macro_rules! define_singleton {
    ($(#[$meta:meta])* $vis:vis $name:ident, $ty:ty, $init:expr) => {
        $(#[$meta])*
        $vis static $name: std::sync::LazyLock<$ty> = std::sync::LazyLock::new(|| $init);
    };
}
