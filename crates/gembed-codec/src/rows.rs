//! Borrowed view over a flat row-major float buffer.

use crate::errors::{CodecError, Result};

/// `n_vectors` rows of `dim` floats, borrowed from a flat buffer.
#[derive(Clone, Copy, Debug)]
pub struct VectorRows<'a> {
    data: &'a [f32],
    n_vectors: usize,
    dim: usize,
}

impl<'a> VectorRows<'a> {
    /// Wrap `data`, checking `data.len() == n_vectors * dim`.
    pub fn new(data: &'a [f32], n_vectors: usize, dim: usize) -> Result<Self> {
        if n_vectors.checked_mul(dim) != Some(data.len()) {
            return Err(CodecError::DimensionMismatch {
                len: data.len(),
                n_vectors,
                dim,
            });
        }
        Ok(Self {
            data,
            n_vectors,
            dim,
        })
    }

    /// View a single vector.
    pub fn single(vector: &'a [f32]) -> Self {
        Self {
            data: vector,
            n_vectors: 1,
            dim: vector.len(),
        }
    }

    /// Number of rows.
    pub fn n_vectors(&self) -> usize {
        self.n_vectors
    }

    /// Floats per row.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The flat buffer.
    pub fn data(&self) -> &'a [f32] {
        self.data
    }

    /// Iterate rows in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a [f32]> + 'a {
        let (data, dim) = (self.data, self.dim);
        (0..self.n_vectors).map(move |i| &data[i * dim..(i + 1) * dim])
    }
}
