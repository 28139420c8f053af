//! Element rules of the plain entities and their axes.

pub(crate) mod date;
pub(crate) mod time;
pub(crate) mod timestamp;
