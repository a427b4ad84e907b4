//! Deterministic in-process engine.
//!
//! Vectors are derived from a SHA-256 of each input, mapped to `[-1, 1]`
//! and L2-normalized, so equal inputs always embed identically. The stub
//! also counts generations and releases so tests can assert that every
//! produced batch was handed back.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::engine::EmbeddingEngine;
use crate::errors::{EngineError, Result};
use crate::types::{EmbeddingBatch, InputType, MethodId, ModelId};

/// A method and the text models it offers, in id order.
#[derive(Clone, Debug)]
struct MethodEntry {
    name: String,
    models: Vec<String>,
}

/// Where generated vectors come from.
#[derive(Clone, Debug)]
enum VectorSource {
    /// Hash each input.
    Hashed,
    /// Return these rows regardless of input.
    Fixed(Vec<Vec<f32>>),
}

/// Stub engine with a configurable catalogue and failure injection.
pub struct StubEngine {
    dims: usize,
    methods: Vec<MethodEntry>,
    source: VectorSource,
    forced_count: Option<usize>,
    failure: Option<String>,
    generate_calls: AtomicUsize,
    produced: AtomicUsize,
    released: AtomicUsize,
    last_inputs: Mutex<Vec<Vec<u8>>>,
}

impl StubEngine {
    /// Create a stub producing `dims`-dimensional vectors.
    ///
    /// The catalogue starts with method `"test"` (id 0) offering model
    /// `"m"` (id 0).
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            methods: vec![MethodEntry {
                name: "test".into(),
                models: vec!["m".into()],
            }],
            source: VectorSource::Hashed,
            forced_count: None,
            failure: None,
            generate_calls: AtomicUsize::new(0),
            produced: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
            last_inputs: Mutex::new(Vec::new()),
        }
    }

    /// Add a method with its models. Ids follow insertion order.
    #[must_use]
    pub fn with_method(mut self, name: &str, models: &[&str]) -> Self {
        self.methods.push(MethodEntry {
            name: name.to_owned(),
            models: models.iter().map(|m| (*m).to_owned()).collect(),
        });
        self
    }

    /// Return exactly these rows from every generation.
    #[must_use]
    pub fn with_vectors(mut self, rows: Vec<Vec<f32>>) -> Self {
        if let Some(first) = rows.first() {
            self.dims = first.len();
        }
        self.source = VectorSource::Fixed(rows);
        self
    }

    /// Produce `n` vectors per generation regardless of input count.
    #[must_use]
    pub fn with_vector_count(mut self, n: usize) -> Self {
        self.forced_count = Some(n);
        self
    }

    /// Fail every generation with `message`.
    #[must_use]
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_owned());
        self
    }

    /// Number of `generate` calls, successful or not.
    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    /// Number of batches handed back through `release`.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Batches produced but not yet released.
    pub fn outstanding(&self) -> usize {
        self.produced
            .load(Ordering::SeqCst)
            .saturating_sub(self.released())
    }

    /// Inputs seen by the most recent `generate` call.
    pub fn last_inputs(&self) -> Vec<Vec<u8>> {
        self.last_inputs.lock().clone()
    }

    /// Output dimensions.
    pub fn dimensions(&self) -> usize {
        self.dims
    }

    fn hash_to_vector(&self, input: &[u8]) -> Vec<f32> {
        let hash = Sha256::digest(input);

        let mut v: Vec<f32> = (0..self.dims)
            .map(|i| (f32::from(hash[i % hash.len()]) / 127.5) - 1.0)
            .collect();

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }

    fn rows_for(&self, inputs: &[&[u8]]) -> Vec<Vec<f32>> {
        let count = self.forced_count.unwrap_or(inputs.len());
        match &self.source {
            VectorSource::Fixed(rows) => rows.iter().cycle().take(count).cloned().collect(),
            VectorSource::Hashed => (0..count)
                .map(|i| {
                    let input = if inputs.is_empty() {
                        &[][..]
                    } else {
                        inputs[i % inputs.len()]
                    };
                    self.hash_to_vector(input)
                })
                .collect(),
        }
    }
}

impl EmbeddingEngine for StubEngine {
    fn validate_method(&self, method: &str) -> Option<MethodId> {
        let idx = self.methods.iter().position(|m| m.name == method)?;
        Some(MethodId::new(u32::try_from(idx).ok()?))
    }

    fn validate_model(
        &self,
        method: MethodId,
        model: &str,
        input_type: InputType,
    ) -> Option<ModelId> {
        if input_type != InputType::Text {
            return None;
        }
        let entry = self.methods.get(method.get() as usize)?;
        let idx = entry.models.iter().position(|m| m == model)?;
        Some(ModelId::new(u32::try_from(idx).ok()?))
    }

    fn generate(
        &self,
        method: MethodId,
        model: ModelId,
        inputs: &[&[u8]],
    ) -> Result<EmbeddingBatch> {
        let _ = self.generate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_inputs.lock() = inputs.iter().map(|i| i.to_vec()).collect();

        if let Some(message) = &self.failure {
            return Err(EngineError::Generation(message.clone()));
        }
        if self.methods.get(method.get() as usize).is_none() {
            return Err(EngineError::Generation(format!(
                "unknown method id {}",
                method.get()
            )));
        }

        let batch = EmbeddingBatch::from_rows(self.rows_for(inputs))?;
        let _ = self.produced.fetch_add(1, Ordering::SeqCst);
        debug!(
            method = method.get(),
            model = model.get(),
            n_vectors = batch.n_vectors(),
            dim = batch.dim(),
            "stub batch generated"
        );
        Ok(batch)
    }

    fn release(&self, batch: EmbeddingBatch) {
        let _ = self.released.fetch_add(1, Ordering::SeqCst);
        drop(batch);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
