//! `ChronoUnit`: behaviour shared by every unit that can appear in a
//! duration.

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A unit of time.
///
/// Units are totally ordered by their estimated length; units of equal
/// length (e.g. months with different overflow policies) fall back to the
/// `Ord` implementation.
pub trait ChronoUnit: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// Estimated length of one unit in seconds.
    fn length(&self) -> f64;

    /// `true` for calendar-based units (days and longer).
    fn is_calendrical(&self) -> bool;

    /// Unit into which amounts of this unit are folded on entry into a
    /// duration, with the conversion factor (`1 ms = 1_000_000 ns`).
    fn collapse(&self) -> Option<(Self, i64)> {
        None
    }

    /// Unit into which this unit is folded when both occur in the same
    /// duration (`1 week = 7 days`).
    fn merge_into(&self) -> Option<(Self, i64)> {
        None
    }
}

/// Comparator ordering units from the longest to the shortest.
pub fn by_length_descending<U: ChronoUnit>(a: &U, b: &U) -> Ordering {
    b.length()
        .partial_cmp(&a.length())
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.cmp(b))
}
