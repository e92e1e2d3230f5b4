//! Utilities for factorygen.

mod format;
mod locatable;
mod location;

pub use format::Join;
pub use locatable::Locatable;
pub use location::Location;
