//! `Weekday`: day of the week.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::weekmodel::Weekmodel;

/// Day of the week.
///
/// Variants are numbered 1–7 (Monday = 1, Sunday = 7) as in ISO-8601.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

impl Weekday {
    /// All weekdays from Monday to Sunday.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Construct from the ISO ordinal (1 = Monday … 7 = Sunday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1..=7 => Some(Self::ALL[usize::from(n - 1)]),
            _ => None,
        }
    }

    /// Return the ISO ordinal (1 = Monday … 7 = Sunday).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Ordinal of this day within a week of the given model (1 = first day).
    pub fn value_in(&self, model: Weekmodel) -> u8 {
        (i16::from(self.ordinal()) - i16::from(model.first_day_of_week().ordinal())).rem_euclid(7)
            as u8
            + 1
    }

    /// The weekday `days` days later (negative values go back).
    pub fn roll(&self, days: i64) -> Self {
        let index = (i64::from(self.ordinal()) - 1 + days).rem_euclid(7);
        Self::ALL[index as usize]
    }

    /// The following weekday (Sunday is followed by Monday).
    pub fn next(&self) -> Self {
        self.roll(1)
    }

    /// The preceding weekday.
    pub fn previous(&self) -> Self {
        self.roll(-1)
    }

    /// Return `true` if this is Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}
