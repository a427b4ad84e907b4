//! Per-call state owned by one prepared statement.

/// Result buffer for one call context.
///
/// Holds at most one buffer. Installing a new result drops the previous
/// one first, so a context never retains more than one row's output.
#[derive(Debug, Default)]
pub struct ResultSlot {
    buffer: Option<Box<[u8]>>,
    installs: u64,
}

impl ResultSlot {
    /// Replace the held buffer with `bytes` and borrow it back.
    pub fn install(&mut self, bytes: Vec<u8>) -> &[u8] {
        drop(self.buffer.take());
        self.installs += 1;
        self.buffer.insert(bytes.into_boxed_slice())
    }

    /// Currently held buffer.
    pub fn get(&self) -> Option<&[u8]> {
        self.buffer.as_deref()
    }

    /// Drop the held buffer.
    pub fn clear(&mut self) {
        self.buffer = None;
    }

    /// Whether a buffer is held.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_none()
    }

    /// Number of buffers installed over the slot's lifetime.
    pub fn installs(&self) -> u64 {
        self.installs
    }
}

/// State the host keeps between setup, execution and teardown.
#[derive(Debug, Default)]
pub struct CallContext {
    maybe_null: bool,
    max_length: u64,
    result: ResultSlot,
}

impl CallContext {
    /// Fresh context, as the host hands it to setup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the function may return NULL.
    pub fn maybe_null(&self) -> bool {
        self.maybe_null
    }

    /// Declare whether the function may return NULL.
    pub fn set_maybe_null(&mut self, maybe_null: bool) {
        self.maybe_null = maybe_null;
    }

    /// Result length hint.
    pub fn max_length(&self) -> u64 {
        self.max_length
    }

    /// Declare the result length hint.
    pub fn set_max_length(&mut self, max_length: u64) {
        self.max_length = max_length;
    }

    /// Result slot.
    pub fn result(&self) -> &ResultSlot {
        &self.result
    }

    /// Mutable result slot.
    pub fn result_mut(&mut self) -> &mut ResultSlot {
        &mut self.result
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
