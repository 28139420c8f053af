//! `ElementRule<T>`: how one element is read and written on entity `T`.

use tempora_core::errors::Result;
use tempora_core::fail;

use crate::engine::element::ElementId;

/// Per-(element, entity kind) behaviour.
///
/// Rules work on raw values (see
/// [`ElementValue`](crate::engine::value::ElementValue)).  Minimum and
/// maximum are context sensitive: the maximum day of month depends on the
/// month of the entity.
pub trait ElementRule<T>: std::fmt::Debug + Send + Sync {
    /// Current raw value.
    fn get_value(&self, context: &T) -> i64;

    /// Smallest valid raw value in `context`.
    fn get_minimum(&self, context: &T) -> i64;

    /// Largest valid raw value in `context`.
    fn get_maximum(&self, context: &T) -> i64;

    /// Whether `value` may be set on `context`.
    fn is_valid(&self, context: &T, value: i64) -> bool {
        (self.get_minimum(context)..=self.get_maximum(context)).contains(&value)
    }

    /// Set a value which passed [`ElementRule::is_valid`].
    fn set(&self, context: &T, value: i64) -> Result<T>;

    /// Resolve an out-of-range value by arithmetic; only called for lenient
    /// elements.
    fn set_lenient(&self, context: &T, value: i64) -> Result<T> {
        let _ = context;
        fail!(InvalidValue, "out of range: {value}")
    }

    /// Validate and set `value`.
    ///
    /// With `lenient` an invalid value is handed to
    /// [`ElementRule::set_lenient`] instead of being rejected.
    fn with_value(&self, context: &T, value: i64, lenient: bool) -> Result<T> {
        if self.is_valid(context, value) {
            self.set(context, value)
        } else if lenient {
            self.set_lenient(context, value)
        } else {
            fail!(
                InvalidValue,
                "{value} is out of range [{}, {}]",
                self.get_minimum(context),
                self.get_maximum(context)
            )
        }
    }

    /// Next finer element set to its minimum by `at_floor`.
    fn child_at_floor(&self, context: &T) -> Option<ElementId> {
        let _ = context;
        None
    }

    /// Next finer element set to its maximum by `at_ceiling`.
    fn child_at_ceiling(&self, context: &T) -> Option<ElementId> {
        self.child_at_floor(context)
    }
}
