//! Settings types with compiled defaults.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Max-length hint for a single binary vector result.
pub const DEFAULT_TEXT_MAX_LENGTH: u64 = 65_535;

/// Max-length hint and output ceiling for batch JSON results (1 MiB).
pub const DEFAULT_BATCH_CAPACITY: u64 = 1024 * 1024;

/// Headroom kept below the batch output ceiling.
pub const DEFAULT_BATCH_SAFETY_MARGIN: u64 = 1000;

/// Root settings object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GembedSettings {
    /// Function-level limits.
    pub udf: UdfSettings,
    /// Logging defaults.
    pub logging: LoggingSettings,
}

impl GembedSettings {
    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        self.udf.validate()
    }
}

/// Limits applied by the two embedding functions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UdfSettings {
    /// Max-length hint reported by `EMBED_TEXT` setup.
    pub text_max_length: u64,
    /// Max-length hint reported by `EMBED_TEXTS` setup.
    pub batch_max_length: u64,
    /// Ceiling for serialized batch output, in bytes.
    pub batch_output_capacity: u64,
    /// Bytes kept free below the ceiling; exceeding `capacity - margin` aborts.
    pub batch_safety_margin: u64,
}

impl Default for UdfSettings {
    fn default() -> Self {
        Self {
            text_max_length: DEFAULT_TEXT_MAX_LENGTH,
            batch_max_length: DEFAULT_BATCH_CAPACITY,
            batch_output_capacity: DEFAULT_BATCH_CAPACITY,
            batch_safety_margin: DEFAULT_BATCH_SAFETY_MARGIN,
        }
    }
}

impl UdfSettings {
    /// Check that the limits are usable.
    pub fn validate(&self) -> Result<()> {
        if self.text_max_length == 0 {
            return Err(SettingsError::InvalidValue(
                "udf.textMaxLength must be positive".into(),
            ));
        }
        if self.batch_max_length == 0 {
            return Err(SettingsError::InvalidValue(
                "udf.batchMaxLength must be positive".into(),
            ));
        }
        if self.batch_safety_margin >= self.batch_output_capacity {
            return Err(SettingsError::InvalidValue(format!(
                "udf.batchSafetyMargin ({}) must be smaller than udf.batchOutputCapacity ({})",
                self.batch_safety_margin, self.batch_output_capacity
            )));
        }
        Ok(())
    }
}

/// Logging defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_component_limits() {
        let s = GembedSettings::default();
        assert_eq!(s.udf.text_max_length, 65_535);
        assert_eq!(s.udf.batch_max_length, 1_048_576);
        assert_eq!(s.udf.batch_output_capacity, 1_048_576);
        assert_eq!(s.udf.batch_safety_margin, 1000);
        assert_eq!(s.logging.level, "info");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn serde_camel_case() {
        let value = serde_json::to_value(GembedSettings::default()).unwrap();
        assert!(value["udf"].get("batchOutputCapacity").is_some());
        assert!(value["udf"].get("batch_output_capacity").is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: GembedSettings =
            serde_json::from_str(r#"{"udf": {"batchSafetyMargin": 10}}"#).unwrap();
        assert_eq!(s.udf.batch_safety_margin, 10);
        assert_eq!(s.udf.batch_output_capacity, 1_048_576);
        assert_eq!(s.logging.level, "info");
    }

    #[test]
    fn margin_must_be_below_capacity() {
        let s = UdfSettings {
            batch_output_capacity: 100,
            batch_safety_margin: 100,
            ..UdfSettings::default()
        };
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("batchSafetyMargin"));
    }

    #[test]
    fn zero_lengths_rejected() {
        let s = UdfSettings {
            text_max_length: 0,
            ..UdfSettings::default()
        };
        assert!(s.validate().is_err());

        let s = UdfSettings {
            batch_max_length: 0,
            ..UdfSettings::default()
        };
        assert!(s.validate().is_err());
    }
}
