//! Function, registration, and setup error types.

use gembed_codec::{CodecError, ParseError};
use gembed_core::ErrorKind;
use gembed_engine::EngineError;
use thiserror::Error;

use crate::host::ErrorMessage;

/// Hard failure while executing one call.
#[derive(Debug, Error)]
pub enum UdfError {
    /// Method name unknown to the engine.
    #[error("Invalid embedding method: {0}")]
    InvalidMethod(String),

    /// Model name unknown under the method, or not a text model.
    #[error("Invalid or unsupported model '{model}' for method '{method}'")]
    InvalidModel {
        /// Method name as given.
        method: String,
        /// Model name as given.
        model: String,
    },

    /// `texts_json` is not a JSON array of strings.
    #[error("Failed to parse JSON array: {0}")]
    MalformedPayload(#[from] ParseError),

    /// The engine reported a failure.
    #[error("Embedding generation failed: {0}")]
    Engine(#[from] EngineError),

    /// A single-text call produced other than one vector.
    #[error("Embedding generation failed: expected 1 vector, got {0}")]
    VectorCount(usize),

    /// Serialized output would cross the configured ceiling.
    #[error("Output too large: {0}")]
    OutputTooLarge(#[source] CodecError),

    /// The engine's batch could not be encoded.
    #[error("Encoding failed: {0}")]
    Encoding(#[source] CodecError),
}

impl UdfError {
    /// Taxonomy bucket for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMethod(_) | Self::InvalidModel { .. } => ErrorKind::Validation,
            Self::MalformedPayload(_) => ErrorKind::MalformedPayload,
            Self::Engine(_) | Self::VectorCount(_) | Self::Encoding(_) => ErrorKind::Engine,
            Self::OutputTooLarge(_) => ErrorKind::CapacityExceeded,
        }
    }
}

impl From<CodecError> for UdfError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Parse(e) => Self::MalformedPayload(e),
            CodecError::UnexpectedVectorCount(n) => Self::VectorCount(n),
            e @ CodecError::OutputTooLarge { .. } => Self::OutputTooLarge(e),
            e => Self::Encoding(e),
        }
    }
}

/// Failure registering a function with the host.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// A function with this name already exists.
    #[error("function {0} is already registered")]
    AlreadyRegistered(String),
    /// The host refused the registration.
    #[error("registration of {name} rejected: {reason}")]
    Rejected {
        /// Function name.
        name: String,
        /// Host-supplied reason.
        reason: String,
    },
}

/// Failure preparing a call.
#[derive(Debug, Error)]
pub enum PrepareError {
    /// No function with this name.
    #[error("FUNCTION {0} does not exist")]
    UnknownFunction(String),
    /// The function's setup rejected the argument shape.
    #[error("{0}")]
    Setup(ErrorMessage),
}

impl PrepareError {
    /// Taxonomy bucket for this failure.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ArgumentShape
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::error::Error;

    #[test]
    fn kinds() {
        let cases = vec![
            (UdfError::InvalidMethod("x".into()), ErrorKind::Validation),
            (
                UdfError::InvalidModel {
                    method: "test".into(),
                    model: "x".into(),
                },
                ErrorKind::Validation,
            ),
            (
                UdfError::MalformedPayload(ParseError::MissingCloseBracket),
                ErrorKind::MalformedPayload,
            ),
            (UdfError::Engine(EngineError::NotReady), ErrorKind::Engine),
            (UdfError::VectorCount(2), ErrorKind::Engine),
            (
                UdfError::OutputTooLarge(CodecError::OutputTooLarge {
                    written: 2,
                    limit: 1,
                    capacity: 3,
                }),
                ErrorKind::CapacityExceeded,
            ),
            (
                UdfError::Encoding(CodecError::DimensionOverflow(0)),
                ErrorKind::Engine,
            ),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn codec_errors_map_onto_variants() {
        assert_matches!(
            UdfError::from(CodecError::Parse(ParseError::MissingCloseBracket)),
            UdfError::MalformedPayload(_)
        );
        assert_matches!(
            UdfError::from(CodecError::UnexpectedVectorCount(0)),
            UdfError::VectorCount(0)
        );
        assert_matches!(
            UdfError::from(CodecError::OutputTooLarge {
                written: 10,
                limit: 5,
                capacity: 8
            }),
            UdfError::OutputTooLarge(_)
        );
        assert_matches!(
            UdfError::from(CodecError::DimensionMismatch {
                len: 1,
                n_vectors: 1,
                dim: 2
            }),
            UdfError::Encoding(_)
        );
    }

    #[test]
    fn engine_source_preserved() {
        let err: UdfError = EngineError::Generation("oom".into()).into();
        let source = err.source().expect("should have source");
        assert_eq!(source.to_string(), "Generation failed: oom");
    }

    #[test]
    fn display() {
        assert_eq!(
            UdfError::VectorCount(0).to_string(),
            "Embedding generation failed: expected 1 vector, got 0"
        );
        assert_eq!(
            RegistrationError::AlreadyRegistered("EMBED_TEXT".into()).to_string(),
            "function EMBED_TEXT is already registered"
        );
        assert_eq!(
            PrepareError::UnknownFunction("NOPE".into()).to_string(),
            "FUNCTION NOPE does not exist"
        );
    }
}
