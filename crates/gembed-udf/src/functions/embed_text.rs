use std::sync::Arc;

use gembed_codec::{VectorRows, encode_single};
use gembed_core::CallOutcome;
use gembed_engine::{BatchLease, EmbeddingEngine};
use gembed_settings::UdfSettings;
use tracing::debug_span;

use super::common::{Request, check_arg_shape, report};
use crate::component::EMBED_TEXT;
use crate::context::CallContext;
use crate::errors::UdfError;
use crate::function::{ScalarFunction, UdfOutcome};
use crate::host::{ArgType, ErrorMessage, UdfArgs};

/// `EMBED_TEXT(method, model, text)`: one text to one binary vector.
pub struct EmbedText {
    engine: Arc<dyn EmbeddingEngine>,
    max_length: u64,
}

impl EmbedText {
    /// Bind the function to an engine.
    pub fn new(engine: Arc<dyn EmbeddingEngine>, settings: &UdfSettings) -> Self {
        Self {
            engine,
            max_length: settings.text_max_length,
        }
    }

    fn embed(&self, request: &Request<'_>) -> Result<Vec<u8>, UdfError> {
        let engine = self.engine.as_ref();
        let (method, model) = request.resolve(engine)?;

        let batch = BatchLease::generate(engine, method, model, &[request.payload])?;
        let rows = VectorRows::new(batch.data(), batch.n_vectors(), batch.dim())?;
        Ok(encode_single(&rows)?)
    }
}

impl ScalarFunction for EmbedText {
    fn name(&self) -> &'static str {
        EMBED_TEXT
    }

    fn init(&self, arg_types: &[ArgType], ctx: &mut CallContext) -> Result<(), ErrorMessage> {
        check_arg_shape(EMBED_TEXT, "text", arg_types)?;
        ctx.result_mut().clear();
        ctx.set_maybe_null(true);
        ctx.set_max_length(self.max_length);
        Ok(())
    }

    fn execute<'c>(&self, args: &UdfArgs<'_>, ctx: &'c mut CallContext) -> UdfOutcome<'c> {
        let _span = debug_span!("embed_text").entered();

        let outcome = match Request::from_args(args) {
            None => CallOutcome::Absent,
            Some(request) => match self.embed(&request) {
                Ok(blob) => CallOutcome::Value(ctx.result_mut().install(blob)),
                Err(e) => CallOutcome::Error(e),
            },
        };
        report(EMBED_TEXT, &outcome);
        outcome
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
