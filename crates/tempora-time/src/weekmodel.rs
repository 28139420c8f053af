//! `Weekmodel`: week definitions (first day of week, minimal days in the
//! first week) and the week arithmetic derived from them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tempora_core::ensure;
use tempora_core::errors::Result;
use tempora_core::gregorian::{date_of_epoch_day, epoch_day, iso_day_of_week};

use crate::engine::element::{Element, ElementId};
use crate::weekday::Weekday;

/// A week definition.
///
/// The first week of a year (or month) is the first week which has at least
/// `minimal_days_in_first_week` days in that year (or month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Weekmodel {
    first_day_of_week: Weekday,
    minimal_days_in_first_week: u8,
}

impl Weekmodel {
    /// The ISO-8601 week definition: weeks start on Monday and the first
    /// week contains January 4th.
    pub const ISO: Weekmodel = Weekmodel {
        first_day_of_week: Weekday::Monday,
        minimal_days_in_first_week: 4,
    };

    /// A week model.
    ///
    /// # Errors
    ///
    /// `InvalidValue` unless `minimal_days_in_first_week` is in `1..=7`.
    pub fn of(first_day_of_week: Weekday, minimal_days_in_first_week: u8) -> Result<Self> {
        ensure!(
            (1..=7).contains(&minimal_days_in_first_week),
            InvalidValue,
            "minimal days in first week must be in [1, 7]: {minimal_days_in_first_week}"
        );
        Ok(Self {
            first_day_of_week,
            minimal_days_in_first_week,
        })
    }

    /// All 49 week models.
    pub fn all() -> impl Iterator<Item = Weekmodel> {
        Weekday::ALL.into_iter().flat_map(|first_day_of_week| {
            (1..=7).map(move |minimal_days_in_first_week| Weekmodel {
                first_day_of_week,
                minimal_days_in_first_week,
            })
        })
    }

    /// The first day of a week.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// The minimal number of days in the first week.
    pub fn minimal_days_in_first_week(&self) -> u8 {
        self.minimal_days_in_first_week
    }

    /// The last day of a week.
    pub fn last_day_of_week(&self) -> Weekday {
        self.first_day_of_week.previous()
    }

    // ── Elements ──────────────────────────────────────────────────────────

    /// Week of the week-based year defined by this model (1–53).
    pub fn week_of_year(&self) -> Element<i32> {
        Element::new(ElementId::WeekOfYear(*self))
    }

    /// Week of month (0–6; week 0 is a short first week).
    pub fn week_of_month(&self) -> Element<i32> {
        Element::new(ElementId::WeekOfMonth(*self))
    }

    /// Day of week counted from the first day of week of this model.
    pub fn local_day_of_week(&self) -> Element<Weekday> {
        Element::new(ElementId::LocalDayOfWeek(*self))
    }

    // ── Week arithmetic on epoch days ─────────────────────────────────────

    /// Local ordinal (1 = first day of week) of an epoch day.
    pub(crate) fn local_ordinal(&self, epoch: i64) -> i64 {
        let iso = i64::from(iso_day_of_week(epoch));
        (iso - i64::from(self.first_day_of_week.ordinal())).rem_euclid(7) + 1
    }

    /// Epoch day on which week 1 of the week-based `year` starts.
    pub(crate) fn first_week_start(&self, year: i64) -> i64 {
        let jan1 = epoch_day(year, 1, 1);
        let ordinal = self.local_ordinal(jan1);
        let start = jan1 - (ordinal - 1);
        if 8 - ordinal >= i64::from(self.minimal_days_in_first_week) {
            start
        } else {
            start + 7
        }
    }

    /// Week-based year and week number of an epoch day.
    pub(crate) fn week_date(&self, epoch: i64) -> (i64, i64) {
        let (year, _, _) = date_of_epoch_day(epoch);
        let start = self.first_week_start(year);
        let (week_year, start) = if epoch < start {
            (year - 1, self.first_week_start(year - 1))
        } else {
            let next = self.first_week_start(year + 1);
            if epoch >= next {
                (year + 1, next)
            } else {
                (year, start)
            }
        };
        (week_year, (epoch - start) / 7 + 1)
    }

    /// Number of weeks (52 or 53) in the week-based year.
    pub(crate) fn weeks_in_year(&self, week_year: i64) -> i64 {
        (self.first_week_start(week_year + 1) - self.first_week_start(week_year)) / 7
    }

    /// Week of month of `day` whose local weekday ordinal is `ordinal`.
    pub(crate) fn week_of_month_of(&self, day: i64, ordinal: i64) -> i64 {
        let week_start = (day - ordinal).rem_euclid(7);
        let offset = if week_start + 1 > i64::from(self.minimal_days_in_first_week) {
            7 - week_start
        } else {
            -week_start
        };
        (7 + offset + (day - 1)) / 7
    }
}

impl Default for Weekmodel {
    fn default() -> Self {
        Self::ISO
    }
}

impl std::fmt::Display for Weekmodel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Weekmodel[{},{}]",
            self.first_day_of_week, self.minimal_days_in_first_week
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_week_dates() {
        let m = Weekmodel::ISO;
        // 2012-01-01 (Sunday) belongs to the last week of 2011
        assert_eq!(m.week_date(epoch_day(2012, 1, 1)), (2011, 52));
        assert_eq!(m.week_date(epoch_day(2012, 1, 2)), (2012, 1));
        // 2008-12-29 (Monday) starts week 1 of 2009
        assert_eq!(m.week_date(epoch_day(2008, 12, 29)), (2009, 1));
        assert_eq!(m.weeks_in_year(2015), 53);
        assert_eq!(m.weeks_in_year(2016), 52);
    }

    #[test]
    fn sunday_based_weeks() {
        let us = Weekmodel::of(Weekday::Sunday, 1).unwrap();
        // the week containing January 1st is always week one
        assert_eq!(us.week_date(epoch_day(2012, 1, 1)), (2012, 1));
        assert_eq!(us.week_date(epoch_day(2011, 12, 31)), (2011, 53));
    }

    #[test]
    fn weeks_of_month() {
        let m = Weekmodel::ISO;
        // 2013-03-01 is a Friday: three days only, hence week 0
        assert_eq!(m.week_of_month_of(1, 5), 0);
        assert_eq!(m.week_of_month_of(4, 1), 1);
        // 2012-03-01 is a Thursday: four days make week 1
        assert_eq!(m.week_of_month_of(1, 4), 1);
        assert_eq!(m.week_of_month_of(5, 1), 2);
    }

    #[test]
    fn all_models() {
        assert_eq!(Weekmodel::all().count(), 49);
        assert!(Weekmodel::of(Weekday::Monday, 0).is_err());
        assert!(Weekmodel::of(Weekday::Monday, 8).is_err());
    }
}
