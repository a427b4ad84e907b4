//! Function registration and the in-process call life cycle.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use metrics::histogram;
use tracing::debug;

use gembed_core::logging::LOG_TARGET;

use crate::context::CallContext;
use crate::errors::{PrepareError, RegistrationError};
use crate::function::{ScalarFunction, UdfOutcome};
use crate::host::{ArgType, UdfArgs};

/// Where a component registers its functions.
pub trait UdfRegistrar {
    /// Register `function` under its own name.
    fn register(&mut self, function: Arc<dyn ScalarFunction>) -> Result<(), RegistrationError>;

    /// Remove a function. Returns whether it was registered.
    fn unregister(&mut self, name: &str) -> bool;
}

/// In-memory registrar that can also prepare and run calls.
///
/// Names are matched case-insensitively, as SQL function names are.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn ScalarFunction>>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run setup for `name` and return a call ready to execute.
    pub fn prepare(&self, name: &str, arg_types: &[ArgType]) -> Result<PreparedCall, PrepareError> {
        let function = self
            .functions
            .get(&name.to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| PrepareError::UnknownFunction(name.to_owned()))?;

        let mut ctx = CallContext::new();
        function
            .init(arg_types, &mut ctx)
            .map_err(PrepareError::Setup)?;
        debug!(target: LOG_TARGET, function = function.name(), "call prepared");
        Ok(PreparedCall { function, ctx })
    }

    /// All registered names (sorted).
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check whether a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_ascii_uppercase())
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no functions are registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl UdfRegistrar for FunctionRegistry {
    fn register(&mut self, function: Arc<dyn ScalarFunction>) -> Result<(), RegistrationError> {
        let key = function.name().to_ascii_uppercase();
        if self.functions.contains_key(&key) {
            return Err(RegistrationError::AlreadyRegistered(key));
        }
        let _ = self.functions.insert(key, function);
        Ok(())
    }

    fn unregister(&mut self, name: &str) -> bool {
        self.functions.remove(&name.to_ascii_uppercase()).is_some()
    }
}

/// A function with its own call context, between setup and teardown.
///
/// Dropping the call runs the function's teardown, which frees the result
/// buffer. Each prepared call is independent of every other.
pub struct PreparedCall {
    function: Arc<dyn ScalarFunction>,
    ctx: CallContext,
}

impl PreparedCall {
    /// Execute one row.
    pub fn execute(&mut self, args: &UdfArgs<'_>) -> UdfOutcome<'_> {
        let start = Instant::now();
        let outcome = self.function.execute(args, &mut self.ctx);
        histogram!("gembed_udf_call_duration_seconds", "function" => self.function.name())
            .record(start.elapsed().as_secs_f64());
        outcome
    }

    /// Name of the prepared function.
    pub fn name(&self) -> &'static str {
        self.function.name()
    }

    /// The call context, as setup left it or as the last row left it.
    pub fn context(&self) -> &CallContext {
        &self.ctx
    }
}

impl fmt::Debug for PreparedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedCall")
            .field("function", &self.function.name())
            .field("ctx", &self.ctx)
            .finish()
    }
}

impl Drop for PreparedCall {
    fn drop(&mut self) {
        self.function.deinit(&mut self.ctx);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
