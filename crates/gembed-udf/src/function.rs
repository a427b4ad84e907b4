//! The scalar function contract.

use gembed_core::CallOutcome;

use crate::context::CallContext;
use crate::errors::UdfError;
use crate::host::{ArgType, ErrorMessage, UdfArgs};

/// Outcome of one execution, borrowing its value from the call context.
pub type UdfOutcome<'c> = CallOutcome<&'c [u8], UdfError>;

/// A scalar function with a setup / execute / teardown life cycle.
///
/// The host calls [`init`](Self::init) once per prepared call, then
/// [`execute`](Self::execute) once per row on the same context, then
/// [`deinit`](Self::deinit). Distinct contexts may run concurrently.
pub trait ScalarFunction: Send + Sync {
    /// SQL name.
    fn name(&self) -> &'static str;

    /// Check the argument shape and declare the result properties.
    fn init(&self, arg_types: &[ArgType], ctx: &mut CallContext) -> Result<(), ErrorMessage>;

    /// Compute one row.
    fn execute<'c>(&self, args: &UdfArgs<'_>, ctx: &'c mut CallContext) -> UdfOutcome<'c>;

    /// Release everything the context holds.
    fn deinit(&self, ctx: &mut CallContext) {
        ctx.result_mut().clear();
    }
}
