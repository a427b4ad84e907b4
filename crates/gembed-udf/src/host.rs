//! Host-side argument and message types.

use std::fmt;

use thiserror::Error;

/// Size of the host's setup error buffer, including the terminator.
pub const MYSQL_ERRMSG_SIZE: usize = 512;

/// Declared SQL type of an argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgType {
    /// Character or binary string.
    String,
    /// Floating point.
    Real,
    /// Integer.
    Int,
    /// Row constructor.
    Row,
    /// Fixed-point decimal.
    Decimal,
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Real => "real",
            Self::Int => "int",
            Self::Row => "row",
            Self::Decimal => "decimal",
        })
    }
}

/// Argument values for one row, borrowed from the host.
///
/// A `None` value is SQL `NULL`.
#[derive(Clone, Debug, Default)]
pub struct UdfArgs<'a> {
    values: Vec<Option<&'a [u8]>>,
    types: Vec<ArgType>,
}

impl<'a> UdfArgs<'a> {
    /// Empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// All-string arguments.
    pub fn strings(values: &[Option<&'a [u8]>]) -> Self {
        Self {
            values: values.to_vec(),
            types: vec![ArgType::String; values.len()],
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn with(mut self, value: Option<&'a [u8]>, arg_type: ArgType) -> Self {
        self.values.push(value);
        self.types.push(arg_type);
        self
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of argument `i`; `None` when NULL or out of range.
    pub fn value(&self, i: usize) -> Option<&'a [u8]> {
        self.values.get(i).copied().flatten()
    }

    /// Declared argument types.
    pub fn types(&self) -> &[ArgType] {
        &self.types
    }
}

/// Setup failure text, bounded to what the host's buffer can hold.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ErrorMessage(String);

impl ErrorMessage {
    /// Build a message, truncating on a character boundary so it fits in
    /// [`MYSQL_ERRMSG_SIZE`] bytes with its terminator.
    pub fn new(message: impl Into<String>) -> Self {
        let mut message = message.into();
        let max = MYSQL_ERRMSG_SIZE - 1;
        if message.len() > max {
            let mut end = max;
            while !message.is_char_boundary(end) {
                end -= 1;
            }
            message.truncate(end);
        }
        Self(message)
    }

    /// Message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
