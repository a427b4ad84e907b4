//! Structured logging with `tracing`.
//!
//! Library code only emits events; installing a subscriber is the job of
//! whoever embeds the component (the host loader or the `gembed` CLI).
//! Events carry a `function` field naming the SQL function they belong to.

pub mod test_utils;

pub use test_utils::{CapturedEvent, CapturedLogs, capture_logs};

/// Target used by every event the component emits.
pub const LOG_TARGET: &str = "gembed";

/// Initialize the global tracing subscriber with human-readable stderr output.
///
/// `RUST_LOG` takes precedence over `level` when set. Subsequent calls are
/// no-ops.
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // try_init fails if a global default is already installed
    let _ = subscriber.try_init();
}

/// Initialize the global tracing subscriber with one JSON object per line.
///
/// Intended for hosts that forward stderr into a structured log pipeline.
pub fn init_json_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json();

    let _ = subscriber.try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_subscriber_is_idempotent() {
        init_subscriber("warn");
        init_subscriber("debug");
        init_json_subscriber("info");
    }

    #[test]
    fn events_on_component_target_are_captured() {
        let (logs, _guard) = capture_logs();
        tracing::error!(target: LOG_TARGET, function = "EMBED_TEXT", "invalid embedding method");
        let events = logs.events_for_target(LOG_TARGET);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].field("function"), Some("EMBED_TEXT"));
    }
}
