//! Engine error types.

use thiserror::Error;

use crate::types::InputType;

/// Errors reported by an embedding engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Generation failed inside the engine.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The engine cannot embed this kind of input.
    #[error("Unsupported input type: {0}")]
    UnsupportedInput(InputType),

    /// The engine returned a batch whose buffer does not match its shape.
    #[error("Malformed batch: {len} floats for {n_vectors} x {dim}")]
    BatchShape {
        /// Number of floats in the buffer.
        len: usize,
        /// Declared vector count.
        n_vectors: usize,
        /// Declared dimension.
        dim: usize,
    },

    /// Engine not ready (model not loaded).
    #[error("Embedding engine not ready")]
    NotReady,
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
