//! # gembed-core
//!
//! Foundation types shared by every gembed crate:
//! - [`CallOutcome`]: the three-way result of one function execution
//!   (absent, hard error, value) and its projection onto host signals
//! - [`ErrorKind`]: the taxonomy hard failures are reported under
//! - [`logging`]: `tracing` subscriber setup and test capture helpers
//!
//! ## Crate Position
//!
//! Standalone (no gembed crate dependencies).
//! Depended on by: gembed-udf, gembed-cli.

#![deny(unsafe_code)]

pub mod logging;
pub mod outcome;

pub use outcome::{CallOutcome, ErrorKind, HostSignals};
