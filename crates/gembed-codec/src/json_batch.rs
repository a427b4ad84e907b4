//! JSON encoding of a vector batch with an output ceiling.
//!
//! Output shape: `[[f,f,...],[f,f,...],...]` with every number printed
//! with exactly six fractional digits and no whitespace. An empty batch
//! is `[]`.
//!
//! The writer checks its length against `capacity - safety_margin` after
//! every number and after every closed row; crossing that line aborts the
//! encoding and the partial output is dropped.

use std::fmt::Write as _;

use crate::errors::{CodecError, Result};
use crate::rows::VectorRows;

/// Default output ceiling (1 MiB).
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Default headroom below the ceiling.
pub const DEFAULT_SAFETY_MARGIN: usize = 1000;

/// Fractional digits per number.
pub const DECIMALS: usize = 6;

/// Output ceiling for [`encode_batch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputLimits {
    /// Maximum output size in bytes.
    pub capacity: usize,
    /// Bytes kept free below `capacity`.
    pub safety_margin: usize,
}

impl Default for OutputLimits {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            safety_margin: DEFAULT_SAFETY_MARGIN,
        }
    }
}

impl OutputLimits {
    /// Length past which encoding aborts.
    pub fn limit(&self) -> usize {
        self.capacity.saturating_sub(self.safety_margin)
    }
}

/// Serialize `rows` as a JSON array of arrays.
pub fn encode_batch(rows: &VectorRows<'_>, limits: &OutputLimits) -> Result<String> {
    let limit = limits.limit();
    let check = |out: &String| -> Result<()> {
        if out.len() > limit {
            return Err(CodecError::OutputTooLarge {
                written: out.len(),
                limit,
                capacity: limits.capacity,
            });
        }
        Ok(())
    };

    let mut out = String::with_capacity(estimated_len(rows).min(limits.capacity));
    out.push('[');
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('[');
        for (j, value) in row.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            write_number(&mut out, *value);
            check(&out)?;
        }
        out.push(']');
        check(&out)?;
    }
    out.push(']');
    Ok(out)
}

/// Rough size guess used to pre-size the output buffer.
fn estimated_len(rows: &VectorRows<'_>) -> usize {
    // "-0.123456," is the common case
    rows.n_vectors()
        .saturating_mul(rows.dim().saturating_mul(DECIMALS + 4).saturating_add(3))
        .saturating_add(2)
}

/// Write one number the way C's `%.6f` would.
fn write_number(out: &mut String, value: f32) {
    if value.is_nan() {
        out.push_str("nan");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "inf" } else { "-inf" });
    } else {
        let _ = write!(out, "{value:.prec$}", prec = DECIMALS);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
