use compact_str::CompactString;
use thiserror::Error;

use crate::schema::ParseError;

/// Enum representing any generation error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("schema has {} parse error(s)", .0.len())]
    Parse(Vec<ParseError>),
    #[error("kind enumeration `{name}` not found")]
    MissingKindEnum { name: String },
    #[error("type `{name}` is defined in terms of itself")]
    CyclicType { name: CompactString },
    #[error("invalid annotation pattern ({0})")]
    AnnotationPattern(String),
}

impl From<regex::Error> for GenerateError {
    fn from(value: regex::Error) -> Self {
        GenerateError::AnnotationPattern(value.to_string())
    }
}
