use crate::{query::QueryEncodeError, reference::MissingKeyError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Resolution-surface error with a stable internal classification.
/// Every variant aborts the render that raised it; there is no local
/// recovery, since these indicate configuration or construction defects
/// rather than transient conditions.
///

#[derive(Debug, ThisError)]
pub enum Error {
    /// A non-external reference targets a document type with no route binding.
    #[error("no route binding registered for document type '{path}'")]
    UnregisteredRoute { path: &'static str },

    /// A key producer's payload fields do not match the bound template's
    /// placeholders. A binding defect, not a per-request condition.
    #[error(
        "key producer output for '{path}' does not match route placeholders: expected [{expected}], found [{found}]"
    )]
    InvalidKeyProducerOutput {
        path: &'static str,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    MissingKey(#[from] MissingKeyError),

    #[error(transparent)]
    QueryEncode(#[from] QueryEncodeError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnregisteredRoute { .. } | Self::InvalidKeyProducerOutput { .. } => {
                ErrorClass::Configuration
            }
            Self::MissingKey(_) => ErrorClass::Construction,
            Self::QueryEncode(_) => ErrorClass::Encoding,
        }
    }

    /// True when the error indicates a startup wiring defect that a
    /// registry self-check would have caught before first render.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.class(), ErrorClass::Configuration)
    }
}

///
/// ErrorClass
/// Internal error taxonomy for caller-side classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Configuration,
    Construction,
    Encoding,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Construction => "construction",
            Self::Encoding => "encoding",
        };
        write!(f, "{label}")
    }
}
