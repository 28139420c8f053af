//! `chrono` interop for POSIX machine time.

use chrono::TimeDelta;
use tempora_core::errors::{Error, Result};

use crate::machine_time::MachineTime;
use crate::scale::Posix;

impl From<TimeDelta> for MachineTime<Posix> {
    fn from(delta: TimeDelta) -> Self {
        // seconds and subsecond nanos share the sign of the delta; every
        // delta fits the machine-time range
        let total = i128::from(delta.num_seconds()) * 1_000_000_000
            + i128::from(delta.subsec_nanos());
        MachineTime::from_total_nanos(total).unwrap_or(MachineTime::ZERO)
    }
}

impl TryFrom<MachineTime<Posix>> for TimeDelta {
    type Error = Error;

    fn try_from(value: MachineTime<Posix>) -> Result<Self> {
        TimeDelta::new(value.seconds(), value.fraction() as u32).ok_or_else(|| {
            Error::OutOfRange(format!("{value} exceeds the range of chrono::TimeDelta"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let delta = TimeDelta::milliseconds(-1500);
        let t = MachineTime::<Posix>::from(delta);
        assert_eq!((t.seconds(), t.fraction()), (-2, 500_000_000));
        assert_eq!(TimeDelta::try_from(t).unwrap(), delta);
    }
}
