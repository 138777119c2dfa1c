//! Error types returned by fallible constructors and generators.

use std::fmt;

use crate::ParseError;

/// Error produced when a UUID or one of its building blocks cannot be constructed.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Error {
    /// A byte sequence to be interpreted as a UUID was not exactly 16 bytes long.
    InvalidLength {
        /// The length of the rejected byte sequence.
        len: usize,
    },

    /// A textual representation could not be parsed.
    Parse(ParseError),

    /// A node identifier did not fit in 48 bits.
    InvalidNode {
        /// The rejected value.
        node: u64,
    },

    /// The secure random source failed to produce bytes.
    EntropyUnavailable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { len } => {
                write!(f, "invalid length: expected 16 bytes, found {}", len)
            }
            Self::Parse(err) => fmt::Display::fmt(err, f),
            Self::InvalidNode { node } => {
                write!(f, "invalid node identifier: {:#x} exceeds 48 bits", node)
            }
            Self::EntropyUnavailable => write!(f, "secure random source unavailable"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(src: ParseError) -> Self {
        Self::Parse(src)
    }
}
