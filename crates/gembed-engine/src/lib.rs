//! # gembed-engine
//!
//! The boundary between the function component and the embedding engine.
//!
//! The engine itself (model loading, inference) lives outside this
//! workspace. This crate fixes the contract the component relies on:
//! - [`EmbeddingEngine`]: method/model validation, generation, release
//! - [`EmbeddingBatch`]: a flat row-major batch whose shape is checked on
//!   construction
//! - [`BatchLease`]: scope guard that hands a batch back to its engine
//!   exactly once, on every exit path
//! - [`StubEngine`]: deterministic in-process engine for tests and the CLI
//!
//! ## Crate Position
//!
//! Standalone (no gembed crate dependencies).
//! Depended on by: gembed-udf, gembed-cli.

#![deny(unsafe_code)]

pub mod engine;
pub mod errors;
pub mod lease;
pub mod stub;
pub mod types;

pub use engine::EmbeddingEngine;
pub use errors::{EngineError, Result};
pub use lease::BatchLease;
pub use stub::StubEngine;
pub use types::{EmbeddingBatch, InputType, MethodId, ModelId};
