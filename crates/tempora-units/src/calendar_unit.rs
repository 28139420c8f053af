//! `CalendarUnit`: calendar units of time, each carrying an
//! [`OverflowPolicy`].
//!
//! A calendar unit is a small product of a [`CalendarUnitKind`] and the
//! policy applied when month-based arithmetic lands on a day which does not
//! exist in the target month (adding one month to January 31st, or one year
//! to February 29th).

use crate::unit::ChronoUnit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Average length of a gregorian year in seconds (365.2425 days).
const YEAR_SECONDS: f64 = 31_556_952.0;

/// The kind of a calendar unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalendarUnitKind {
    /// 1000 years.
    Millennia,
    /// 100 years.
    Centuries,
    /// 10 years.
    Decades,
    /// Calendar years (12 months).
    Years,
    /// Years of the ISO week date (52 or 53 weeks).
    WeekBasedYears,
    /// Quarter years (3 months).
    Quarters,
    /// Calendar months.
    Months,
    /// Weeks (7 days).
    Weeks,
    /// Calendar days.
    Days,
}

impl CalendarUnitKind {
    /// Number of months in one unit, for month-based kinds.
    pub fn months_factor(self) -> Option<i64> {
        match self {
            CalendarUnitKind::Millennia => Some(12_000),
            CalendarUnitKind::Centuries => Some(1_200),
            CalendarUnitKind::Decades => Some(120),
            CalendarUnitKind::Years => Some(12),
            CalendarUnitKind::Quarters => Some(3),
            CalendarUnitKind::Months => Some(1),
            CalendarUnitKind::WeekBasedYears | CalendarUnitKind::Weeks | CalendarUnitKind::Days => {
                None
            }
        }
    }

    /// Number of days in one unit, for day-based kinds.
    pub fn days_factor(self) -> Option<i64> {
        match self {
            CalendarUnitKind::Weeks => Some(7),
            CalendarUnitKind::Days => Some(1),
            _ => None,
        }
    }
}

/// How a month-based addition resolves a day which does not exist in the
/// target month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverflowPolicy {
    /// Clamp to the last valid day of the target month
    /// (`2012-02-29 + 1 year = 2013-02-28`).
    #[default]
    PreviousValidDate,
    /// Move to the first day of the following month
    /// (`2012-02-29 + 1 year = 2013-03-01`).
    NextValidDate,
    /// Carry the surplus days over into the following month
    /// (`2013-01-31 + 1 month = 2013-03-03`).
    CarryOver,
    /// Keep the end of month if the start was the end of its month,
    /// otherwise clamp (`2013-02-28 + 1 month = 2013-03-31`).
    KeepingEndOfMonth,
    /// Always move to the end of the target month.
    AtEndOfMonth,
    /// Fail with an invalid-value error.
    UnlessInvalid,
}

impl std::fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OverflowPolicy::PreviousValidDate => "previous valid date",
            OverflowPolicy::NextValidDate => "next valid date",
            OverflowPolicy::CarryOver => "carry over",
            OverflowPolicy::KeepingEndOfMonth => "keeping end of month",
            OverflowPolicy::AtEndOfMonth => "at end of month",
            OverflowPolicy::UnlessInvalid => "unless invalid",
        };
        write!(f, "{s}")
    }
}

/// A calendar unit: kind plus overflow policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarUnit {
    kind: CalendarUnitKind,
    policy: OverflowPolicy,
}

impl CalendarUnit {
    /// Millennia with the default policy.
    pub const MILLENNIA: CalendarUnit = CalendarUnit::of(CalendarUnitKind::Millennia);
    /// Centuries with the default policy.
    pub const CENTURIES: CalendarUnit = CalendarUnit::of(CalendarUnitKind::Centuries);
    /// Decades with the default policy.
    pub const DECADES: CalendarUnit = CalendarUnit::of(CalendarUnitKind::Decades);
    /// Years with the default policy.
    pub const YEARS: CalendarUnit = CalendarUnit::of(CalendarUnitKind::Years);
    /// Week-based years.
    pub const WEEK_BASED_YEARS: CalendarUnit = CalendarUnit::of(CalendarUnitKind::WeekBasedYears);
    /// Quarter years with the default policy.
    pub const QUARTERS: CalendarUnit = CalendarUnit::of(CalendarUnitKind::Quarters);
    /// Months with the default policy.
    pub const MONTHS: CalendarUnit = CalendarUnit::of(CalendarUnitKind::Months);
    /// Weeks.
    pub const WEEKS: CalendarUnit = CalendarUnit::of(CalendarUnitKind::Weeks);
    /// Days.
    pub const DAYS: CalendarUnit = CalendarUnit::of(CalendarUnitKind::Days);

    /// The unit of the given kind with the default policy.
    pub const fn of(kind: CalendarUnitKind) -> Self {
        Self {
            kind,
            policy: OverflowPolicy::PreviousValidDate,
        }
    }

    /// The kind of this unit.
    pub fn kind(&self) -> CalendarUnitKind {
        self.kind
    }

    /// The overflow policy of this unit.
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Variant of this unit with another overflow policy.
    ///
    /// Only month-based units carry a policy; weeks, days and week-based
    /// years are returned unchanged.
    pub fn with_policy(self, policy: OverflowPolicy) -> Self {
        if self.kind.months_factor().is_some() {
            Self { policy, ..self }
        } else {
            self
        }
    }

    /// Variant resolving to the first day of the following month.
    pub fn next_valid_date(self) -> Self {
        self.with_policy(OverflowPolicy::NextValidDate)
    }

    /// Variant clamping to the last valid day (the default).
    pub fn previous_valid_date(self) -> Self {
        self.with_policy(OverflowPolicy::PreviousValidDate)
    }

    /// Variant carrying surplus days over into the next month.
    pub fn with_carry_over(self) -> Self {
        self.with_policy(OverflowPolicy::CarryOver)
    }

    /// Variant keeping the end of month.
    pub fn keeping_end_of_month(self) -> Self {
        self.with_policy(OverflowPolicy::KeepingEndOfMonth)
    }

    /// Variant always landing on the end of month.
    pub fn at_end_of_month(self) -> Self {
        self.with_policy(OverflowPolicy::AtEndOfMonth)
    }

    /// Variant failing on invalid days.
    pub fn unless_invalid(self) -> Self {
        self.with_policy(OverflowPolicy::UnlessInvalid)
    }

    /// `true` if this unit uses the default overflow policy.
    pub fn is_default_policy(&self) -> bool {
        self.policy == OverflowPolicy::PreviousValidDate
    }

    /// Number of months in one unit, for month-based units.
    pub fn months_factor(&self) -> Option<i64> {
        self.kind.months_factor()
    }

    /// Number of days in one unit, for day-based units.
    pub fn days_factor(&self) -> Option<i64> {
        self.kind.days_factor()
    }
}

impl From<CalendarUnitKind> for CalendarUnit {
    fn from(kind: CalendarUnitKind) -> Self {
        CalendarUnit::of(kind)
    }
}

impl ChronoUnit for CalendarUnit {
    fn length(&self) -> f64 {
        match self.kind {
            CalendarUnitKind::Millennia => YEAR_SECONDS * 1000.0,
            CalendarUnitKind::Centuries => YEAR_SECONDS * 100.0,
            CalendarUnitKind::Decades => YEAR_SECONDS * 10.0,
            CalendarUnitKind::Years | CalendarUnitKind::WeekBasedYears => YEAR_SECONDS,
            CalendarUnitKind::Quarters => YEAR_SECONDS / 4.0,
            CalendarUnitKind::Months => YEAR_SECONDS / 12.0,
            CalendarUnitKind::Weeks => 604_800.0,
            CalendarUnitKind::Days => 86_400.0,
        }
    }

    fn is_calendrical(&self) -> bool {
        true
    }

    fn merge_into(&self) -> Option<(Self, i64)> {
        (self.kind == CalendarUnitKind::Weeks).then_some((CalendarUnit::DAYS, 7))
    }
}

impl std::fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.kind {
            CalendarUnitKind::Millennia => "Millennia",
            CalendarUnitKind::Centuries => "Century(ies)",
            CalendarUnitKind::Decades => "Decade(s)",
            CalendarUnitKind::Years => "Year(s)",
            CalendarUnitKind::WeekBasedYears => "Week-based-year(s)",
            CalendarUnitKind::Quarters => "Quarter(s)",
            CalendarUnitKind::Months => "Month(s)",
            CalendarUnitKind::Weeks => "Week(s)",
            CalendarUnitKind::Days => "Day(s)",
        };
        if self.is_default_policy() {
            write!(f, "{name}")
        } else {
            write!(f, "{name} [{}]", self.policy)
        }
    }
}
