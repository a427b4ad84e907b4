//! # gembed-codec
//!
//! The three payload formats the embedding functions speak:
//! - [`json_array`]: decode a JSON array of strings into raw byte strings
//! - [`vector`]: the `[u32 dim][f32 x dim]` binary vector layout
//! - [`json_batch`]: a batch of vectors as a JSON array of arrays, bounded
//!   by an output ceiling
//!
//! No dependency on the engine: encoders take a [`VectorRows`] view over a
//! flat float buffer.
//!
//! ## Crate Position
//!
//! Standalone (no gembed crate dependencies).
//! Depended on by: gembed-udf, gembed-cli.

#![deny(unsafe_code)]

pub mod errors;
pub mod json_array;
pub mod json_batch;
pub mod rows;
pub mod vector;

pub use errors::{CodecError, ParseError, Result};
pub use json_array::{DecodedTextList, decode_string_array};
pub use json_batch::{OutputLimits, encode_batch};
pub use rows::VectorRows;
pub use vector::{decode_vector, encode_single, encode_vector};
