//! Codec error types.

use thiserror::Error;

/// Why a JSON string array was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The first non-whitespace byte is not `[`.
    #[error("expected '[' at offset {offset}")]
    MissingOpenBracket {
        /// Offset of the offending byte (or the input length).
        offset: usize,
    },
    /// Input ended before the closing `]`.
    #[error("input ended before closing ']'")]
    MissingCloseBracket,
    /// Input ended inside a string.
    #[error("unterminated string starting at offset {start}")]
    UnterminatedString {
        /// Offset of the opening quote.
        start: usize,
    },
    /// A byte that is neither a string, a separator, nor `]`.
    #[error("unexpected byte 0x{byte:02x} at offset {offset}")]
    UnexpectedByte {
        /// The byte.
        byte: u8,
        /// Its offset.
        offset: usize,
    },
}

/// Errors from encoding or decoding payloads.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed JSON string array.
    #[error("malformed JSON array: {0}")]
    Parse(#[from] ParseError),

    /// Serialized batch crossed `capacity - safety_margin`.
    #[error("output too large: {written} bytes written, limit {limit} (capacity {capacity})")]
    OutputTooLarge {
        /// Bytes written when the check tripped.
        written: usize,
        /// The effective limit.
        limit: usize,
        /// The configured capacity.
        capacity: usize,
    },

    /// A single-vector encoding was asked for a batch of another size.
    #[error("expected exactly one vector, got {0}")]
    UnexpectedVectorCount(usize),

    /// Buffer length disagrees with the declared shape.
    #[error("{len} floats do not form {n_vectors} vectors of dimension {dim}")]
    DimensionMismatch {
        /// Buffer length.
        len: usize,
        /// Declared vector count.
        n_vectors: usize,
        /// Declared dimension.
        dim: usize,
    },

    /// Dimension does not fit the 32-bit header.
    #[error("dimension {0} does not fit a 32-bit header")]
    DimensionOverflow(usize),

    /// Binary vector blob has the wrong length for its header.
    #[error("vector blob is {actual} bytes, expected {expected}")]
    LengthMismatch {
        /// Length implied by the header.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
}

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
