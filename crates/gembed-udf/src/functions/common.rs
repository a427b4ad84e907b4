use gembed_core::CallOutcome;
use gembed_core::logging::LOG_TARGET;
use gembed_engine::{EmbeddingEngine, InputType, MethodId, ModelId};
use metrics::counter;
use tracing::{debug, error};

use crate::errors::UdfError;
use crate::function::UdfOutcome;
use crate::host::{ArgType, ErrorMessage, UdfArgs};

/// Arguments every function takes, in order.
pub(crate) const ARG_COUNT: usize = 3;

pub(crate) const CALLS_TOTAL: &str = "gembed_udf_calls_total";
pub(crate) const ERRORS_TOTAL: &str = "gembed_udf_errors_total";
pub(crate) const NULL_RESULTS_TOTAL: &str = "gembed_udf_null_results_total";

/// Setup check shared by both functions: three string arguments.
pub(crate) fn check_arg_shape(
    function: &str,
    payload_name: &str,
    arg_types: &[ArgType],
) -> Result<(), ErrorMessage> {
    if arg_types.len() != ARG_COUNT {
        return Err(ErrorMessage::new(format!(
            "{function} requires {ARG_COUNT} arguments: method, model, {payload_name}"
        )));
    }
    if arg_types.iter().any(|t| *t != ArgType::String) {
        return Err(ErrorMessage::new("All arguments must be strings"));
    }
    Ok(())
}

/// The three argument values of one row.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Request<'a> {
    pub method: &'a [u8],
    pub model: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> Request<'a> {
    /// `None` when any argument is NULL.
    pub fn from_args(args: &UdfArgs<'a>) -> Option<Self> {
        Some(Self {
            method: args.value(0)?,
            model: args.value(1)?,
            payload: args.value(2)?,
        })
    }

    /// Resolve method then model against `engine`.
    pub fn resolve(&self, engine: &dyn EmbeddingEngine) -> Result<(MethodId, ModelId), UdfError> {
        let method_name = lossy(self.method);
        let method = std::str::from_utf8(self.method)
            .ok()
            .and_then(|name| engine.validate_method(name))
            .ok_or_else(|| UdfError::InvalidMethod(method_name.clone()))?;

        let model = std::str::from_utf8(self.model)
            .ok()
            .and_then(|name| engine.validate_model(method, name, InputType::Text))
            .ok_or_else(|| UdfError::InvalidModel {
                method: method_name,
                model: lossy(self.model),
            })?;

        Ok((method, model))
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Count and log one finished call. Absent results are counted but not logged.
pub(crate) fn report(function: &'static str, outcome: &UdfOutcome<'_>) {
    counter!(CALLS_TOTAL, "function" => function).increment(1);
    match outcome {
        CallOutcome::Absent => {
            counter!(NULL_RESULTS_TOTAL, "function" => function).increment(1);
        }
        CallOutcome::Error(err) => {
            let kind = err.kind();
            counter!(ERRORS_TOTAL, "function" => function, "kind" => kind.as_str()).increment(1);
            error!(target: LOG_TARGET, function, kind = %kind, error = %err, "{err}");
        }
        CallOutcome::Value(bytes) => {
            debug!(target: LOG_TARGET, function, bytes = bytes.len(), "call completed");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
