//! `LeapSeconds`: the table of inserted leap seconds.
//!
//! Every event is the last day of a month at whose end one second was
//! inserted (`23:59:60`).  Both scales count from 1970-01-01; the continuous
//! UTC count of an instant is its POSIX count plus the number of insertions
//! before it.
//!
//! The standard table is a process-wide singleton built on first access.
//! Whether it contains the historical insertions is decided by
//! [`Settings::leap_seconds_enabled`](tempora_core::Settings).

use tempora_core::errors::{Error, Result};
use tempora_core::gregorian;
use tempora_core::patterns::singleton::LazyLock;
use tempora_core::{Settings, SECONDS_PER_DAY};

/// The positive leap seconds inserted from 1972 to 2016, by event date.
const STANDARD_EVENTS: [(i64, u8, u8); 27] = [
    (1972, 6, 30),
    (1972, 12, 31),
    (1973, 12, 31),
    (1974, 12, 31),
    (1975, 12, 31),
    (1976, 12, 31),
    (1977, 12, 31),
    (1978, 12, 31),
    (1979, 12, 31),
    (1981, 6, 30),
    (1982, 6, 30),
    (1983, 6, 30),
    (1985, 6, 30),
    (1987, 12, 31),
    (1989, 12, 31),
    (1990, 12, 31),
    (1992, 6, 30),
    (1993, 6, 30),
    (1994, 6, 30),
    (1995, 12, 31),
    (1997, 6, 30),
    (1998, 12, 31),
    (2005, 12, 31),
    (2008, 12, 31),
    (2012, 6, 30),
    (2015, 6, 30),
    (2016, 12, 31),
];

static STANDARD: LazyLock<LeapSeconds> = LazyLock::new(|| {
    let events = STANDARD_EVENTS
        .iter()
        .map(|&(y, m, d)| (gregorian::epoch_day(y, m, d) + 1) * SECONDS_PER_DAY)
        .collect::<Vec<_>>();
    tracing::debug!(count = events.len(), "standard leap-second table built");
    LeapSeconds { events }
});

static DISABLED: LeapSeconds = LeapSeconds { events: Vec::new() };

/// A table of positive leap seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapSeconds {
    /// POSIX second at the start of the day following each insertion,
    /// strictly ascending.
    events: Vec<i64>,
}

impl LeapSeconds {
    /// The process-wide table: the historical insertions if leap seconds are
    /// enabled in the [`Settings`], otherwise the empty table.
    pub fn standard() -> &'static LeapSeconds {
        if Settings::instance().leap_seconds_enabled() {
            &STANDARD
        } else {
            &DISABLED
        }
    }

    /// A table without any leap second; both scales coincide.
    pub fn disabled() -> &'static LeapSeconds {
        &DISABLED
    }

    /// A custom table from event dates `(year, month, day)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidValue`] for an impossible date and
    /// [`Error::Precondition`] if the dates are not strictly ascending.
    pub fn from_dates(dates: &[(i64, u8, u8)]) -> Result<Self> {
        let mut events = Vec::with_capacity(dates.len());
        for &(year, month, day) in dates {
            if !(1..=12).contains(&month) || day == 0 || day > gregorian::length_of_month(year, month)
            {
                return Err(Error::InvalidValue(format!(
                    "invalid leap-second date {year}-{month:02}-{day:02}"
                )));
            }
            let start_of_next_day = (gregorian::epoch_day(year, month, day) + 1) * SECONDS_PER_DAY;
            if events.last().is_some_and(|&last| last >= start_of_next_day) {
                return Err(Error::Precondition(format!(
                    "leap-second dates must be strictly ascending at {year}-{month:02}-{day:02}"
                )));
            }
            events.push(start_of_next_day);
        }
        Ok(Self { events })
    }

    /// `true` if the table contains at least one leap second.
    pub fn is_enabled(&self) -> bool {
        !self.events.is_empty()
    }

    /// Number of insertions in the table.
    pub fn count(&self) -> usize {
        self.events.len()
    }

    /// Event dates of the table, oldest first.
    pub fn dates(&self) -> impl Iterator<Item = (i64, u8, u8)> + '_ {
        self.events
            .iter()
            .map(|&p| gregorian::date_of_epoch_day(p / SECONDS_PER_DAY - 1))
    }

    /// Number of leap seconds inserted before the civil second `posix`.
    pub fn shift_at(&self, posix: i64) -> i64 {
        self.events.partition_point(|&e| e <= posix) as i64
    }

    /// Translate a civil second into the continuous count.
    pub fn enhance(&self, posix: i64) -> i64 {
        posix + self.shift_at(posix)
    }

    /// Translate a continuous count into the civil second; an inserted leap
    /// second maps to the preceding civil second (`23:59:59`).
    pub fn strip(&self, utc: i64) -> i64 {
        let passed = self
            .events
            .iter()
            .enumerate()
            .take_while(|&(i, &e)| e + i as i64 <= utc)
            .count();
        utc - passed as i64
    }

    /// `true` if the continuous count `utc` denotes an inserted leap second.
    pub fn is_leap_second(&self, utc: i64) -> bool {
        self.events
            .iter()
            .enumerate()
            .any(|(i, &e)| e + i as i64 == utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_27_events() {
        let table = LeapSeconds::from_dates(&STANDARD_EVENTS).unwrap();
        assert_eq!(table.count(), 27);
        assert_eq!(table.dates().next(), Some((1972, 6, 30)));
        assert_eq!(table.dates().last(), Some((2016, 12, 31)));
    }

    #[test]
    fn shift_and_leap_detection() {
        let table = LeapSeconds::from_dates(&STANDARD_EVENTS).unwrap();
        let july_1972 = (gregorian::epoch_day(1972, 7, 1)) * SECONDS_PER_DAY;
        assert_eq!(table.shift_at(july_1972 - 1), 0);
        assert_eq!(table.shift_at(july_1972), 1);
        assert!(table.is_leap_second(july_1972));
        assert!(!table.is_leap_second(july_1972 + 1));
        assert_eq!(table.strip(july_1972), july_1972 - 1);
        assert_eq!(table.strip(july_1972 + 1), july_1972);
        assert_eq!(table.shift_at(i64::MAX), 27);
    }

    #[test]
    fn custom_tables_are_validated() {
        assert!(matches!(
            LeapSeconds::from_dates(&[(2016, 12, 31), (2015, 6, 30)]),
            Err(Error::Precondition(_))
        ));
        assert!(matches!(
            LeapSeconds::from_dates(&[(2015, 6, 31)]),
            Err(Error::InvalidValue(_))
        ));
        assert!(!LeapSeconds::disabled().is_enabled());
    }
}
