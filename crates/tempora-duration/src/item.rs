//! `Item<U>`: one `(amount, unit)` pair of a duration.

use tempora_units::ChronoUnit;

/// A positive amount of a single unit.
///
/// The sign of a duration is stored once for all items, so item amounts are
/// always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item<U> {
    amount: i64,
    unit: U,
}

impl<U: ChronoUnit> Item<U> {
    pub(crate) fn new(amount: i64, unit: U) -> Self {
        debug_assert!(amount > 0, "item amount must be positive, got {amount}");
        Self { amount, unit }
    }

    /// The (positive) amount.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// The unit.
    pub fn unit(&self) -> U {
        self.unit
    }
}

impl<U: ChronoUnit> std::fmt::Display for Item<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}
