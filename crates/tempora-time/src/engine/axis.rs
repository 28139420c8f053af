//! `Axis<T>`: the immutable element registry of one entity kind.

use std::collections::HashMap;

use tempora_core::errors::{Error, Result};
use tempora_units::IsoUnit;

use crate::engine::element::ElementId;
use crate::engine::rule::ElementRule;

/// Registry mapping elements to the rules of entity kind `T`, plus the
/// bounds of the kind.
///
/// Axes are built once through an [`AxisBuilder`] and are read-only
/// afterwards; each entity kind holds its axis in a lazily initialized
/// static.
pub struct Axis<T: 'static> {
    name: &'static str,
    rules: HashMap<ElementId, Box<dyn ElementRule<T>>>,
    registered: Vec<ElementId>,
    minimum: T,
    maximum: T,
    base_unit: IsoUnit,
}

impl<T: 'static> Axis<T> {
    /// Start building an axis.
    pub fn builder(name: &'static str, minimum: T, maximum: T, base_unit: IsoUnit) -> AxisBuilder<T> {
        AxisBuilder {
            name,
            rules: HashMap::new(),
            registered: Vec::new(),
            minimum,
            maximum,
            base_unit,
        }
    }

    /// Name of the entity kind.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a rule is registered for `element`.
    pub fn contains(&self, element: ElementId) -> bool {
        self.rules.contains_key(&element)
    }

    /// The rule registered for `element`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedElement`] if the axis has no such rule.
    pub fn rule(&self, element: ElementId) -> Result<&dyn ElementRule<T>> {
        self.rules
            .get(&element)
            .map(|rule| rule.as_ref())
            .ok_or_else(|| Error::UnsupportedElement(format!("{element} on {}", self.name)))
    }

    /// Registered elements in registration order.
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.registered.iter().copied()
    }

    /// Smallest entity of this kind.
    pub fn minimum(&self) -> &T {
        &self.minimum
    }

    /// Largest entity of this kind.
    pub fn maximum(&self) -> &T {
        &self.maximum
    }

    /// Finest unit of the entity kind.
    pub fn base_unit(&self) -> IsoUnit {
        self.base_unit
    }
}

impl<T: 'static> std::fmt::Debug for Axis<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Axis")
            .field("name", &self.name)
            .field("elements", &self.registered.len())
            .field("base_unit", &self.base_unit)
            .finish()
    }
}

/// Builder of an [`Axis`].
pub struct AxisBuilder<T: 'static> {
    name: &'static str,
    rules: HashMap<ElementId, Box<dyn ElementRule<T>>>,
    registered: Vec<ElementId>,
    minimum: T,
    maximum: T,
    base_unit: IsoUnit,
}

impl<T: 'static> AxisBuilder<T> {
    /// Register `rule` for `element`.
    pub fn append(mut self, element: ElementId, rule: impl ElementRule<T> + 'static) -> Self {
        debug_assert!(
            !self.rules.contains_key(&element),
            "{element} registered twice on {}",
            self.name
        );
        self.registered.push(element);
        self.rules.insert(element, Box::new(rule));
        self
    }

    /// Register one rule per element produced by `rule_of`.
    pub fn append_all<R: ElementRule<T> + 'static>(
        self,
        elements: impl IntoIterator<Item = ElementId>,
        rule_of: impl Fn(ElementId) -> R,
    ) -> Self {
        elements
            .into_iter()
            .fold(self, |builder, element| builder.append(element, rule_of(element)))
    }

    /// Finish the axis.
    pub fn build(self) -> Axis<T> {
        tracing::debug!(
            axis = self.name,
            elements = self.registered.len(),
            "element axis built"
        );
        Axis {
            name: self.name,
            rules: self.rules,
            registered: self.registered,
            minimum: self.minimum,
            maximum: self.maximum,
            base_unit: self.base_unit,
        }
    }
}
