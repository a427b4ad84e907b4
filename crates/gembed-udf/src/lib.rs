//! # gembed-udf
//!
//! Database functions that turn text into embedding vectors:
//!
//! | Function | Arguments | Result |
//! |----------|-----------|--------|
//! | `EMBED_TEXT` | `method, model, text` | `[u32 dim][f32 x dim]` blob |
//! | `EMBED_TEXTS` | `method, model, texts_json` | `[[f,...],...]` JSON text |
//!
//! The host contract is modelled in [`host`] and [`context`]: setup checks
//! the argument shape, execution runs one row against a per-call
//! [`CallContext`] whose [`ResultSlot`] owns the returned buffer, teardown
//! releases it. [`FunctionRegistry`] drives that life cycle in-process and
//! [`GembedComponent`] registers both functions with any [`UdfRegistrar`].
//!
//! ## Crate Position
//!
//! Depends on: gembed-core, gembed-settings, gembed-engine, gembed-codec.
//! Depended on by: gembed-cli.

#![deny(unsafe_code)]

pub mod component;
pub mod context;
pub mod errors;
pub mod function;
pub mod functions;
pub mod host;
pub mod registry;

pub use component::{EMBED_TEXT, EMBED_TEXTS, GembedComponent};
pub use context::{CallContext, ResultSlot};
pub use errors::{PrepareError, RegistrationError, UdfError};
pub use function::{ScalarFunction, UdfOutcome};
pub use functions::{EmbedText, EmbedTexts};
pub use host::{ArgType, ErrorMessage, MYSQL_ERRMSG_SIZE, UdfArgs};
pub use registry::{FunctionRegistry, PreparedCall, UdfRegistrar};
