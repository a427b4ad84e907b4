//! Three-way call outcome and host signal projection.
//!
//! The host function ABI reports failures through two independent flags:
//! a null flag (nothing to compute) and an error flag (computation failed).
//! [`CallOutcome`] keeps that distinction in the type instead of folding
//! both into a single error channel.

use std::fmt;

/// Classification of a hard failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument count or argument types, caught at setup.
    ArgumentShape,
    /// Unknown method or model.
    Validation,
    /// Payload could not be decoded.
    MalformedPayload,
    /// The embedding engine failed or returned an unusable batch.
    Engine,
    /// Serialized output would exceed the configured ceiling.
    CapacityExceeded,
}

impl ErrorKind {
    /// Stable snake-case label, used for metrics and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ArgumentShape => "argument_shape",
            Self::Validation => "validation",
            Self::MalformedPayload => "malformed_payload",
            Self::Engine => "engine",
            Self::CapacityExceeded => "capacity_exceeded",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair of flags a host inspects after executing a function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostSignals {
    /// Result is SQL `NULL`.
    pub is_null: bool,
    /// Execution failed.
    pub error: bool,
}

/// Outcome of executing one function call.
#[derive(Debug)]
pub enum CallOutcome<T, E> {
    /// Nothing to compute (absent input or empty batch). Not an error.
    Absent,
    /// Hard failure.
    Error(E),
    /// Computed value.
    Value(T),
}

impl<T, E> CallOutcome<T, E> {
    /// Whether this is [`CallOutcome::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Whether this is [`CallOutcome::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Borrow the value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the error, if any.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Project onto the host's null/error flags.
    pub fn signals(&self) -> HostSignals {
        match self {
            Self::Absent => HostSignals {
                is_null: true,
                error: false,
            },
            Self::Error(_) => HostSignals {
                is_null: false,
                error: true,
            },
            Self::Value(_) => HostSignals::default(),
        }
    }

    /// Map the value, leaving absent and error outcomes untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallOutcome<U, E> {
        match self {
            Self::Absent => CallOutcome::Absent,
            Self::Error(e) => CallOutcome::Error(e),
            Self::Value(v) => CallOutcome::Value(f(v)),
        }
    }

    /// Convert into a `Result`, with `None` standing for an absent value.
    pub fn into_result(self) -> Result<Option<T>, E> {
        match self {
            Self::Absent => Ok(None),
            Self::Error(e) => Err(e),
            Self::Value(v) => Ok(Some(v)),
        }
    }
}

impl<T, E> From<Result<T, E>> for CallOutcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Value(v),
            Err(e) => Self::Error(e),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
