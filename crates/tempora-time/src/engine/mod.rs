//! The element engine: element identities, value mapping, rules, axes and
//! the `ChronoEntity` protocol.

pub mod axis;
pub mod element;
pub mod entity;
pub mod rule;
pub mod value;

pub use axis::{Axis, AxisBuilder};
pub use element::{Cycle, Element, ElementId};
pub use entity::ChronoEntity;
pub use rule::ElementRule;
pub use value::{ElementValue, ValueKind};
