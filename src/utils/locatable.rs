use text_size::TextRange;

use super::Location;

/// A type that can be located in source text.
pub trait Locatable {
    fn range(&self) -> TextRange;

    /// Location of the start of the range in `input`.
    fn location(&self, input: &str) -> Location {
        Location::from_offset(input, self.range().start().into())
    }
}

impl Locatable for TextRange {
    fn range(&self) -> TextRange {
        *self
    }
}
