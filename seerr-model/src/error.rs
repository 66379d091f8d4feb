use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A media kind tag other than `movie` or `tv`.
    UnknownMediaKind(String),
    /// A required field was absent on an upstream record.
    MissingField(&'static str),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownMediaKind(tag) => {
                write!(f, "unknown media kind: {tag}")
            }
            ModelError::MissingField(field) => {
                write!(f, "missing field: {field}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
