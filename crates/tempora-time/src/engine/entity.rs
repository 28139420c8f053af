//! `ChronoEntity`: the uniform field-access protocol of temporal entities.
//!
//! Every method dispatches through the entity's [`Axis`]; the adjusters are
//! derived once here from the rules' get/min/max and the element metadata
//! and are never re-implemented per entity kind.

use tempora_core::errors::{Error, Result};
use tempora_core::fail;
use tempora_units::IsoUnit;

use crate::engine::axis::Axis;
use crate::engine::element::{Element, ElementId};
use crate::engine::rule::ElementRule;
use crate::engine::value::{ElementValue, ValueKind};

fn typed<V: ElementValue>(element: ElementId, raw: i64) -> Result<V> {
    V::from_raw(raw).ok_or_else(|| {
        Error::InvalidValue(format!("{raw} is not a {:?} value of {element}", V::KIND))
    })
}

/// A temporal entity with an element axis.
pub trait ChronoEntity: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// The element registry of this entity kind.
    fn axis() -> &'static Axis<Self>;

    /// Add `amount` of `unit` with the entity's own arithmetic.
    fn plus_in(&self, amount: i64, unit: IsoUnit) -> Result<Self>;

    /// `true` for the end-of-day sentinel 24:00, on which floor and ceiling
    /// are no-ops.
    fn is_end_of_day(&self) -> bool {
        false
    }

    // ── Field access ──────────────────────────────────────────────────────

    /// Whether `element` is registered on this entity kind.
    fn contains<V>(&self, element: Element<V>) -> bool {
        Self::axis().contains(element.id())
    }

    /// Current value of `element`.
    fn get<V: ElementValue>(&self, element: Element<V>) -> Result<V> {
        let rule = Self::axis().rule(element.id())?;
        typed(element.id(), rule.get_value(self))
    }

    /// Context-sensitive minimum of `element`.
    fn get_minimum<V: ElementValue>(&self, element: Element<V>) -> Result<V> {
        let rule = Self::axis().rule(element.id())?;
        typed(element.id(), rule.get_minimum(self))
    }

    /// Context-sensitive maximum of `element`.
    fn get_maximum<V: ElementValue>(&self, element: Element<V>) -> Result<V> {
        let rule = Self::axis().rule(element.id())?;
        typed(element.id(), rule.get_maximum(self))
    }

    /// Whether `value` may be set; `false` for unsupported elements.
    fn is_valid<V: ElementValue>(&self, element: Element<V>, value: V) -> bool {
        Self::axis()
            .rule(element.id())
            .is_ok_and(|rule| rule.is_valid(self, value.to_raw()))
    }

    /// Like [`ChronoEntity::is_valid`]; an absent value is never valid.
    fn is_valid_opt<V: ElementValue>(&self, element: Element<V>, value: Option<V>) -> bool {
        value.is_some_and(|v| self.is_valid(element, v))
    }

    /// Copy with `element` set to `value`.
    ///
    /// # Errors
    ///
    /// `UnsupportedElement` if the axis has no rule for `element`, and
    /// `InvalidValue` if the value fails validation.
    fn with<V: ElementValue>(&self, element: Element<V>, value: V) -> Result<Self> {
        let rule = Self::axis().rule(element.id())?;
        with_raw(self, rule, value.to_raw(), false)
    }

    /// Like [`ChronoEntity::with`]; an absent value is an `InvalidValue`.
    fn with_opt<V: ElementValue>(&self, element: Element<V>, value: Option<V>) -> Result<Self> {
        let rule = Self::axis().rule(element.id())?;
        match value {
            Some(v) => with_raw(self, rule, v.to_raw(), false),
            None => fail!(InvalidValue, "missing value for {}", element.id()),
        }
    }

    /// Like [`ChronoEntity::with`], but lenient elements resolve
    /// out-of-range values by arithmetic (day of month 32 of January is
    /// February 1st).
    fn with_lenient<V: ElementValue>(&self, element: Element<V>, value: V) -> Result<Self> {
        let rule = Self::axis().rule(element.id())?;
        with_raw(self, rule, value.to_raw(), element.is_lenient())
    }

    // ── Adjusters ─────────────────────────────────────────────────────────

    /// Copy with `element` set to its current minimum.
    fn minimized<V>(&self, element: Element<V>) -> Result<Self> {
        let rule = Self::axis().rule(element.id())?;
        with_raw(self, rule, rule.get_minimum(self), false)
    }

    /// Copy with `element` set to its current maximum.
    fn maximized<V>(&self, element: Element<V>) -> Result<Self> {
        let rule = Self::axis().rule(element.id())?;
        with_raw(self, rule, rule.get_maximum(self), false)
    }

    /// Copy moved one step of the element's base unit forward.
    fn incremented<V>(&self, element: Element<V>) -> Result<Self> {
        let unit = step_unit::<Self>(element.id())?;
        self.plus_in(element.id().step(), unit)
    }

    /// Copy moved one step of the element's base unit backward.
    fn decremented<V>(&self, element: Element<V>) -> Result<Self> {
        let unit = step_unit::<Self>(element.id())?;
        self.plus_in(-element.id().step(), unit)
    }

    /// Copy with every element finer than `element` at its minimum.
    fn at_floor<V>(&self, element: Element<V>) -> Result<Self> {
        walk_children(self, element.id(), Bound::Floor)
    }

    /// Copy with every element finer than `element` at its maximum.
    fn at_ceiling<V>(&self, element: Element<V>) -> Result<Self> {
        walk_children(self, element.id(), Bound::Ceiling)
    }

    /// The next entity (strictly later) on which `element` equals `value`.
    ///
    /// # Errors
    ///
    /// `UnsupportedElement` for elements without a navigation cycle.
    fn set_to_next<V: ElementValue>(&self, element: Element<V>, value: V) -> Result<Self> {
        navigate(self, element.id(), value.to_raw(), Direction::Next, false)
    }

    /// The previous entity (strictly earlier) on which `element` equals
    /// `value`.
    fn set_to_previous<V: ElementValue>(&self, element: Element<V>, value: V) -> Result<Self> {
        navigate(self, element.id(), value.to_raw(), Direction::Previous, false)
    }

    /// Like [`ChronoEntity::set_to_next`], staying put if the value already
    /// matches.
    fn set_to_next_or_same<V: ElementValue>(&self, element: Element<V>, value: V) -> Result<Self> {
        navigate(self, element.id(), value.to_raw(), Direction::Next, true)
    }

    /// Like [`ChronoEntity::set_to_previous`], staying put if the value
    /// already matches.
    fn set_to_previous_or_same<V: ElementValue>(
        &self,
        element: Element<V>,
        value: V,
    ) -> Result<Self> {
        navigate(self, element.id(), value.to_raw(), Direction::Previous, true)
    }
}

/// Set a raw value; the entity is returned unchanged if the value is the
/// current one.
fn with_raw<T: ChronoEntity>(
    entity: &T,
    rule: &dyn ElementRule<T>,
    value: i64,
    lenient: bool,
) -> Result<T> {
    if rule.get_value(entity) == value {
        return Ok(*entity);
    }
    rule.with_value(entity, value, lenient)
}

fn step_unit<T: ChronoEntity>(element: ElementId) -> Result<IsoUnit> {
    T::axis().rule(element)?;
    element
        .base_unit()
        .ok_or_else(|| Error::UnsupportedElement(format!("{element} has no base unit")))
}

#[derive(Clone, Copy)]
enum Bound {
    Floor,
    Ceiling,
}

fn walk_children<T: ChronoEntity>(entity: &T, element: ElementId, bound: Bound) -> Result<T> {
    let axis = T::axis();
    let rule = axis.rule(element)?;
    if entity.is_end_of_day() {
        return Ok(*entity);
    }
    let child_of = |rule: &dyn ElementRule<T>, context: &T| match bound {
        Bound::Floor => rule.child_at_floor(context),
        Bound::Ceiling => rule.child_at_ceiling(context),
    };
    let mut current = *entity;
    let mut child = child_of(rule, &current);
    while let Some(id) = child {
        let rule = axis.rule(id)?;
        let target = match bound {
            Bound::Floor => rule.get_minimum(&current),
            Bound::Ceiling => rule.get_maximum(&current),
        };
        current = with_raw(&current, rule, target, false)?;
        child = child_of(rule, &current);
    }
    Ok(current)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

fn navigate<T: ChronoEntity>(
    entity: &T,
    element: ElementId,
    target: i64,
    direction: Direction,
    or_same: bool,
) -> Result<T> {
    let rule = T::axis().rule(element)?;
    let (Some(cycle), Some(unit)) = (element.cycle(), element.base_unit()) else {
        fail!(UnsupportedElement, "{element} is not navigable");
    };
    let in_range = match element.value_kind() {
        ValueKind::Weekday => (1..=7).contains(&target),
        _ => (element.default_minimum()..=element.default_maximum()).contains(&target),
    };
    if !in_range {
        fail!(InvalidValue, "{target} is not a value of {element}");
    }
    let current = rule.get_value(entity);
    let distance = match direction {
        Direction::Next => (target - current).rem_euclid(cycle.length),
        Direction::Previous => (current - target).rem_euclid(cycle.length),
    };
    let distance = match (distance, or_same) {
        (0, true) => return Ok(*entity),
        (0, false) => cycle.length,
        (d, _) => d,
    };
    let amount = distance * cycle.step;
    match direction {
        Direction::Next => entity.plus_in(amount, unit),
        Direction::Previous => entity.plus_in(-amount, unit),
    }
}
