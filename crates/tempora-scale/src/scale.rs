//! Time scales.
//!
//! Both scales share the epoch 1970-01-01T00:00:00Z.  They differ in the
//! inserted leap seconds, which the [`Posix`] scale ignores.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use crate::leap_seconds::LeapSeconds;
use crate::moment::Moment;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Runtime identity of a time scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeScale {
    /// Civil seconds; every day has 86 400 seconds.
    Posix,
    /// Continuous SI seconds including leap seconds.
    Utc,
}

impl Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeScale::Posix => f.write_str("POSIX"),
            TimeScale::Utc => f.write_str("UTC"),
        }
    }
}

/// Compile-time marker of a time scale.
pub trait Scale:
    Copy + Eq + Ord + Hash + Debug + Default + Send + Sync + 'static
{
    /// The runtime identity.
    const SCALE: TimeScale;

    /// Seconds since the epoch of `moment` counted on this scale.
    fn elapsed_seconds(moment: &Moment, table: &LeapSeconds) -> i64;
}

/// The civil POSIX scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Posix;

/// The continuous UTC scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Utc;

impl Scale for Posix {
    const SCALE: TimeScale = TimeScale::Posix;

    fn elapsed_seconds(moment: &Moment, _table: &LeapSeconds) -> i64 {
        moment.posix_seconds()
    }
}

impl Scale for Utc {
    const SCALE: TimeScale = TimeScale::Utc;

    fn elapsed_seconds(moment: &Moment, table: &LeapSeconds) -> i64 {
        moment.utc_seconds(table)
    }
}
