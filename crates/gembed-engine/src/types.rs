//! Identifiers, input tags, and the vector batch.

use std::fmt;

use crate::errors::{EngineError, Result};

/// Validated embedding method identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(u32);

impl MethodId {
    /// Wrap a known-good id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Map a C-style validator return value; negative means "unknown".
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }

    /// The underlying id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Validated model identifier, scoped to a method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u32);

impl ModelId {
    /// Wrap a known-good id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Map a C-style validator return value; negative means "unknown".
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }

    /// The underlying id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Input classification passed to model validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum InputType {
    /// Plain text.
    Text = 0,
    /// Encoded image bytes.
    Image = 1,
    /// Text and image together.
    Multimodal = 2,
}

impl InputType {
    /// Wire tag used by C-style engine bindings.
    pub const fn tag(self) -> i32 {
        self as i32
    }

    /// Inverse of [`InputType::tag`].
    pub fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(Self::Text),
            1 => Some(Self::Image),
            2 => Some(Self::Multimodal),
            _ => None,
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Multimodal => "multimodal",
        })
    }
}

/// Row-major batch of `n_vectors` embeddings of `dim` floats each.
///
/// The constructor enforces `data.len() == n_vectors * dim`; a batch that
/// exists is always fully populated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmbeddingBatch {
    data: Vec<f32>,
    n_vectors: usize,
    dim: usize,
}

impl EmbeddingBatch {
    /// Build a batch from a flat buffer, checking its shape.
    pub fn new(data: Vec<f32>, n_vectors: usize, dim: usize) -> Result<Self> {
        let expected = n_vectors.checked_mul(dim);
        if expected != Some(data.len()) {
            return Err(EngineError::BatchShape {
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

    /// Build a batch from individual rows; all rows must share one length.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let n_vectors = rows.len();
        let dim = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_vectors * dim);
        for row in rows {
            if row.len() != dim {
                return Err(EngineError::BatchShape {
                    len: data.len() + row.len(),
                    n_vectors,
                    dim,
                });
            }
            data.extend(row);
        }
        Self::new(data, n_vectors, dim)
    }

    /// Number of vectors.
    pub fn n_vectors(&self) -> usize {
        self.n_vectors
    }

    /// Floats per vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The flat buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Whether the batch holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.n_vectors == 0
    }

    /// Borrow row `i`.
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        (i < self.n_vectors).then(|| &self.data[i * self.dim..(i + 1) * self.dim])
    }

    /// Iterate rows in order. Works for `dim == 0` as well.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.n_vectors).map(move |i| &self.data[i * self.dim..(i + 1) * self.dim])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn raw_ids_reject_negative() {
        assert_eq!(MethodId::from_raw(0), Some(MethodId::new(0)));
        assert_eq!(MethodId::from_raw(7).map(MethodId::get), Some(7));
        assert_eq!(MethodId::from_raw(-1), None);
        assert_eq!(ModelId::from_raw(-42), None);
        assert_eq!(ModelId::from_raw(3), Some(ModelId::new(3)));
    }

    #[test]
    fn input_type_tags() {
        for t in [InputType::Text, InputType::Image, InputType::Multimodal] {
            assert_eq!(InputType::from_tag(t.tag()), Some(t));
        }
        assert_eq!(InputType::Text.tag(), 0);
        assert_eq!(InputType::from_tag(9), None);
    }

    #[test]
    fn batch_shape_checked() {
        assert!(EmbeddingBatch::new(vec![0.0; 6], 2, 3).is_ok());
        assert_matches!(
            EmbeddingBatch::new(vec![0.0; 5], 2, 3),
            Err(EngineError::BatchShape {
                len: 5,
                n_vectors: 2,
                dim: 3
            })
        );
        assert!(EmbeddingBatch::new(vec![], usize::MAX, 2).is_err());
    }

    #[test]
    fn from_rows_flattens_in_order() {
        let batch = EmbeddingBatch::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(batch.n_vectors(), 2);
        assert_eq!(batch.dim(), 2);
        assert_eq!(batch.data(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(batch.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(batch.row(2), None);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        assert!(EmbeddingBatch::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn rows_with_zero_dim() {
        let batch = EmbeddingBatch::new(vec![], 3, 0).unwrap();
        let rows: Vec<&[f32]> = batch.rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn empty_default() {
        let batch = EmbeddingBatch::default();
        assert!(batch.is_empty());
        assert_eq!(batch.rows().count(), 0);
    }
}
