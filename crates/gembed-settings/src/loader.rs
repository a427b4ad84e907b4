//! Settings loading with deep merge and environment variable overrides.
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::GembedSettings;

/// Env var naming an explicit settings file.
pub const SETTINGS_PATH_ENV: &str = "GEMBED_SETTINGS_PATH";

/// Resolve the settings file path.
///
/// `$GEMBED_SETTINGS_PATH` wins; otherwise `~/.gembed/settings.json`.
pub fn settings_path() -> PathBuf {
    if let Some(explicit) = read_env_string(SETTINGS_PATH_ENV) {
        return PathBuf::from(explicit);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".gembed").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<GembedSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from `path`, apply env overrides, and validate.
///
/// A missing file yields the defaults; a malformed file is an error.
pub fn load_settings_from_path(path: &Path) -> Result<GembedSettings> {
    load_with_env(path, |name| std::env::var(name).ok())
}

/// Same as [`load_settings_from_path`] with an injectable env lookup.
pub fn load_with_env(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<GembedSettings> {
    let defaults = serde_json::to_value(GembedSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: GembedSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings, env);
    settings.validate()?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = match target_map.remove(&key) {
                    Some(target_val) => deep_merge(target_val, source_val),
                    None => source_val,
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `GEMBED_*` overrides read through `env`.
///
/// Invalid values are logged and ignored.
pub fn apply_env_overrides(settings: &mut GembedSettings, env: impl Fn(&str) -> Option<String>) {
    let read_u64 = |name: &str, min: u64, max: u64| -> Option<u64> {
        let raw = env(name)?;
        let parsed = parse_u64_range(&raw, min, max);
        if parsed.is_none() {
            warn!(key = name, value = %raw, "invalid integer env var, ignoring");
        }
        parsed
    };

    if let Some(v) = read_u64("GEMBED_TEXT_MAX_LENGTH", 1, u64::from(u32::MAX)) {
        settings.udf.text_max_length = v;
    }
    if let Some(v) = read_u64("GEMBED_BATCH_MAX_LENGTH", 1, u64::from(u32::MAX)) {
        settings.udf.batch_max_length = v;
    }
    if let Some(v) = read_u64("GEMBED_BATCH_OUTPUT_CAPACITY", 1, u64::from(u32::MAX)) {
        settings.udf.batch_output_capacity = v;
    }
    if let Some(v) = read_u64("GEMBED_BATCH_SAFETY_MARGIN", 0, u64::from(u32::MAX)) {
        settings.udf.batch_safety_margin = v;
    }
    if let Some(v) = env("GEMBED_LOG_LEVEL").filter(|v| !v.is_empty()) {
        settings.logging.level = v;
    }
}

/// Parse a string as a `u64` within an inclusive range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
