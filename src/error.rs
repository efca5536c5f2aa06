use std::fmt;

use crate::arena::ArenaKind;
use crate::types::Kind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    Parse,
    EmissionOverflow,
    TypeMismatch,
    IndexOutOfRange,
    KeyNotFound,
    InvalidName,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::MalformedInput => "malformed input",
            ErrorKind::Parse => "parse error",
            ErrorKind::EmissionOverflow => "emission overflow",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::IndexOutOfRange => "index out of range",
            ErrorKind::KeyNotFound => "key not found",
            ErrorKind::InvalidName => "invalid name",
            ErrorKind::Io => "i/o error",
        };
        f.write_str(label)
    }
}

/// Position of a parser failure, 1-based as reported by serde_json.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The parsed tree contained something the builder cannot represent.
    #[error("malformed input at {path}: {message}")]
    MalformedInput { path: String, message: String },

    #[error("parse error: {message}")]
    Parse {
        message: String,
        location: Option<Location>,
    },

    #[error("emission overflow: {kind} arena holds {count} entries, limit is {limit}")]
    EmissionOverflow {
        kind: ArenaKind,
        count: usize,
        limit: usize,
    },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    #[error("index out of range: index {index} but array has {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("key not found: {key:?}")]
    KeyNotFound { key: String },

    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedInput {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn type_mismatch(expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch { expected, found }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedInput { .. } => ErrorKind::MalformedInput,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::EmissionOverflow { .. } => ErrorKind::EmissionOverflow,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Error::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Error::InvalidName { .. } => ErrorKind::InvalidName,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Parse { location, .. } => *location,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Error::Io(err.into());
        }
        let location = (err.line() > 0).then(|| Location {
            line: err.line(),
            column: err.column(),
        });
        Error::Parse {
            message: err.to_string(),
            location,
        }
    }
}
