//! # gembed-settings
//!
//! Configuration for the gembed function component.
//!
//! Settings are resolved from three layers (in priority order):
//! 1. **Compiled defaults** — [`GembedSettings::default()`]
//! 2. **Settings file** — `$GEMBED_SETTINGS_PATH` or `~/.gembed/settings.json`,
//!    deep-merged over the defaults
//! 3. **Environment variables** — `GEMBED_*` overrides (highest priority)
//!
//! The resolved value is validated before it is handed out, so consumers can
//! rely on e.g. the safety margin being smaller than the output capacity.
//!
//! There is no global instance: the component loads settings once at init
//! and passes them to each function explicitly.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{GembedSettings, LoggingSettings, UdfSettings};
