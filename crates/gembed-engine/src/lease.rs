//! Scope guard tying a batch to the engine that produced it.

use std::ops::Deref;

use crate::engine::EmbeddingEngine;
use crate::errors::Result;
use crate::types::{EmbeddingBatch, MethodId, ModelId};

/// A generated batch that is released back to its engine on drop.
///
/// Early returns, `?`, and panics all go through `Drop`, so every batch
/// obtained through [`BatchLease::generate`] is released exactly once.
pub struct BatchLease<'e> {
    engine: &'e dyn EmbeddingEngine,
    batch: EmbeddingBatch,
}

impl<'e> BatchLease<'e> {
    /// Generate a batch and wrap it in a lease.
    ///
    /// A failed generation produces no lease and no release call.
    pub fn generate(
        engine: &'e dyn EmbeddingEngine,
        method: MethodId,
        model: ModelId,
        inputs: &[&[u8]],
    ) -> Result<Self> {
        let batch = engine.generate(method, model, inputs)?;
        Ok(Self { engine, batch })
    }
}

impl Deref for BatchLease<'_> {
    type Target = EmbeddingBatch;

    fn deref(&self) -> &EmbeddingBatch {
        &self.batch
    }
}

impl Drop for BatchLease<'_> {
    fn drop(&mut self) {
        let batch = std::mem::take(&mut self.batch);
        self.engine.release(batch);
    }
}
