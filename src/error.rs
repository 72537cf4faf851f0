use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{DestinationMode, Field};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    Missing,
    Invalid { value: String, expected: String },
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::Missing => write!(f, "a value is required"),
            Reason::Invalid { value, expected } => {
                write!(f, "invalid value {:?} (expected {})", value, expected)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{field} ({}): {reason}", field.flag())]
    Validation { field: Field, reason: Reason },

    #[error("{mode} destination: {cause}")]
    Destination { mode: DestinationMode, cause: String },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("aborted before all fields were supplied; nothing was written")]
    Cancelled,

    #[error("this program only supports Linux (running on {0})")]
    UnsupportedPlatform(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn missing(field: Field) -> Self {
        Error::Validation { field, reason: Reason::Missing }
    }

    pub fn invalid(field: Field, value: &str, expected: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: Reason::Invalid {
                value: value.to_string(),
                expected: expected.into(),
            },
        }
    }

    /// The offending field, for validation failures.
    #[cfg(test)]
    pub fn field(&self) -> Option<Field> {
        match self {
            Error::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
