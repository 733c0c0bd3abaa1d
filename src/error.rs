use std::fmt::Display;
use std::{io, str};

use thiserror::Error;

use crate::codec::BoxError;

/// Error type for `urlform`.
#[derive(Error, Debug)]
pub enum Error {
    /// The destination (or source) is not a reference to a struct.
    ///
    /// Carries the offending type's name, or `nil` for an unset pointer.
    #[error("expected a reference to a struct, got {0}")]
    Argument(String),

    /// A raw string could not be coerced into a field's declared kind.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// A `%` in the wire text that is not followed by two hex digits.
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),

    /// Percent-decoded bytes that are not valid UTF-8.
    #[error(transparent)]
    Utf8(#[from] str::Utf8Error),

    /// Failure reported by a field's own text codec, passed through as-is.
    #[error("{0}")]
    Codec(#[source] BoxError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// The destination or source was an unset pointer.
    pub fn nil_argument() -> Self {
        Error::Argument("nil".to_owned())
    }

    /// The destination or source had the wrong shape.
    pub fn argument(type_name: &str) -> Self {
        Error::Argument(type_name.to_owned())
    }

    pub fn custom<T: Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// The value failure, if this is one.
    pub fn as_value_error(&self) -> Option<&ValueError> {
        match self {
            Error::Value(err) => Some(err),
            _ => None,
        }
    }
}

/// A raw string that could not be parsed into a field's kind.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{key:?} value {value:?} could not be parsed into {kind}")]
pub struct ValueError {
    /// The resolved wire key of the field.
    pub key: String,
    /// The offending raw string.
    pub value: String,
    /// Name of the scalar kind the value was coerced into.
    ///
    /// This is the Rust type name (`i8`, `u64`, `f32`, `bool`, `String`),
    /// not a bit-width spelling such as `int8`. Fields behind `Option`,
    /// `Box` or `Vec` report the scalar they end in.
    pub kind: &'static str,
}

impl ValueError {
    pub fn new(key: impl Into<String>, value: impl Into<String>, kind: &'static str) -> Self {
        ValueError {
            key: key.into(),
            value: value.into(),
            kind,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
