//! Binary vector layout: `[u32 dim][f32; dim]`.
//!
//! Both the header and the floats use the host's native byte order, which
//! is what the database's `VECTOR` column type reads on the same machine.
//! The layout carries no endianness tag; blobs are not portable across
//! architectures with different byte order.

use crate::errors::{CodecError, Result};
use crate::rows::VectorRows;

/// Size of the dimension header.
pub const HEADER_LEN: usize = std::mem::size_of::<u32>();

/// Encoded length for a vector of `dim` floats.
pub const fn encoded_len(dim: usize) -> usize {
    HEADER_LEN + dim * std::mem::size_of::<f32>()
}

/// Encode one vector.
pub fn encode_vector(vector: &[f32]) -> Result<Vec<u8>> {
    let dim = u32::try_from(vector.len()).map_err(|_| CodecError::DimensionOverflow(vector.len()))?;

    let mut out = Vec::with_capacity(encoded_len(vector.len()));
    out.extend_from_slice(&dim.to_ne_bytes());
    out.extend_from_slice(bytemuck::cast_slice(vector));
    Ok(out)
}

/// Encode the only vector of `rows`.
///
/// Fails unless the batch holds exactly one vector.
pub fn encode_single(rows: &VectorRows<'_>) -> Result<Vec<u8>> {
    if rows.n_vectors() != 1 {
        return Err(CodecError::UnexpectedVectorCount(rows.n_vectors()));
    }
    encode_vector(rows.data())
}

/// Decode a blob produced by [`encode_vector`].
pub fn decode_vector(bytes: &[u8]) -> Result<Vec<f32>> {
    let Some(header) = bytes.get(..HEADER_LEN) else {
        return Err(CodecError::LengthMismatch {
            expected: HEADER_LEN,
            actual: bytes.len(),
        });
    };
    let dim = bytemuck::pod_read_unaligned::<u32>(header) as usize;

    let expected = encoded_len(dim);
    if bytes.len() != expected {
        return Err(CodecError::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    Ok(bytes[HEADER_LEN..]
        .chunks_exact(std::mem::size_of::<f32>())
        .map(bytemuck::pod_read_unaligned::<f32>)
        .collect())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
