use std::sync::Arc;

use gembed_codec::{OutputLimits, VectorRows, decode_string_array, encode_batch};
use gembed_core::CallOutcome;
use gembed_engine::{BatchLease, EmbeddingEngine};
use gembed_settings::UdfSettings;
use tracing::debug_span;

use super::common::{Request, check_arg_shape, report};
use crate::component::EMBED_TEXTS;
use crate::context::CallContext;
use crate::errors::UdfError;
use crate::function::{ScalarFunction, UdfOutcome};
use crate::host::{ArgType, ErrorMessage, UdfArgs};

/// `EMBED_TEXTS(method, model, texts_json)`: a JSON array of texts to a
/// JSON array of vectors.
pub struct EmbedTexts {
    engine: Arc<dyn EmbeddingEngine>,
    max_length: u64,
    limits: OutputLimits,
}

impl EmbedTexts {
    /// Bind the function to an engine.
    pub fn new(engine: Arc<dyn EmbeddingEngine>, settings: &UdfSettings) -> Self {
        Self {
            engine,
            max_length: settings.batch_max_length,
            limits: OutputLimits {
                capacity: settings.batch_output_capacity as usize,
                safety_margin: settings.batch_safety_margin as usize,
            },
        }
    }

    /// `Ok(None)` when the array is empty.
    fn embed(&self, request: &Request<'_>) -> Result<Option<String>, UdfError> {
        let engine = self.engine.as_ref();
        let (method, model) = request.resolve(engine)?;

        let texts = decode_string_array(request.payload)?;
        if texts.is_empty() {
            return Ok(None);
        }

        let batch = BatchLease::generate(engine, method, model, &texts.as_slices())?;
        let rows = VectorRows::new(batch.data(), batch.n_vectors(), batch.dim())?;
        Ok(Some(encode_batch(&rows, &self.limits)?))
    }
}

impl ScalarFunction for EmbedTexts {
    fn name(&self) -> &'static str {
        EMBED_TEXTS
    }

    fn init(&self, arg_types: &[ArgType], ctx: &mut CallContext) -> Result<(), ErrorMessage> {
        check_arg_shape(EMBED_TEXTS, "texts_json", arg_types)?;
        ctx.result_mut().clear();
        ctx.set_maybe_null(true);
        ctx.set_max_length(self.max_length);
        Ok(())
    }

    fn execute<'c>(&self, args: &UdfArgs<'_>, ctx: &'c mut CallContext) -> UdfOutcome<'c> {
        let _span = debug_span!("embed_texts").entered();

        let outcome = match Request::from_args(args) {
            None => CallOutcome::Absent,
            Some(request) => match self.embed(&request) {
                Ok(Some(json)) => CallOutcome::Value(ctx.result_mut().install(json.into_bytes())),
                Ok(None) => CallOutcome::Absent,
                Err(e) => CallOutcome::Error(e),
            },
        };
        report(EMBED_TEXTS, &outcome);
        outcome
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
