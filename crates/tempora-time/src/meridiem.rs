//! `Meridiem`: AM/PM half of the day.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Half of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Meridiem {
    /// Before noon (hours 0–11, and the end of day 24:00).
    Am,
    /// Noon and after (hours 12–23).
    Pm,
}

impl Meridiem {
    /// The half of the day containing `hour` (0–24).
    pub fn of_hour(hour: u8) -> Self {
        if hour % 24 < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::Am => write!(f, "AM"),
            Meridiem::Pm => write!(f, "PM"),
        }
    }
}
