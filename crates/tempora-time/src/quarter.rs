//! `Quarter`: quarter of the year.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::month::Month;

/// Quarter of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Quarter {
    /// January to March.
    Q1 = 1,
    /// April to June.
    Q2 = 2,
    /// July to September.
    Q3 = 3,
    /// October to December.
    Q4 = 4,
}

impl Quarter {
    /// All quarters in calendar order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Construct from a number (1–4).
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=4 => Some(Self::ALL[usize::from(n - 1)]),
            _ => None,
        }
    }

    /// Return the 1-based quarter number.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// First month of this quarter.
    pub fn first_month(&self) -> Month {
        Month::January.roll(i64::from(self.number() - 1) * 3)
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q{}", self.number())
    }
}
