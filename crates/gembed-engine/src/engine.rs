//! Embedding engine trait.

use crate::errors::Result;
use crate::types::{EmbeddingBatch, InputType, MethodId, ModelId};

/// Contract the function component relies on.
///
/// Implementations may wrap a native library or run in-process. The
/// component calls an engine from one thread per call context; engines
/// shared across contexts must be `Send + Sync`.
pub trait EmbeddingEngine: Send + Sync {
    /// Look up a method by name.
    fn validate_method(&self, method: &str) -> Option<MethodId>;

    /// Look up a model under `method` that accepts `input_type`.
    fn validate_model(&self, method: MethodId, model: &str, input_type: InputType)
    -> Option<ModelId>;

    /// Embed `inputs`, one vector per input on success.
    ///
    /// On error no batch exists and nothing needs releasing.
    fn generate(&self, method: MethodId, model: ModelId, inputs: &[&[u8]])
    -> Result<EmbeddingBatch>;

    /// Hand a batch back to the engine.
    ///
    /// Engines that pool buffers override this; the default just drops.
    /// Prefer [`crate::BatchLease`], which calls this exactly once.
    fn release(&self, batch: EmbeddingBatch) {
        drop(batch);
    }
}
