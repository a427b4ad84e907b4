//! `gembed`: run `EMBED_TEXT` and `EMBED_TEXTS` outside the database.
//!
//! Loads the component into an in-process registry backed by the stub
//! engine, prepares one call, executes one row, and prints the result.
//! A NULL result prints `NULL`; a failed call exits non-zero.

#![deny(unsafe_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use gembed_codec::decode_vector;
use gembed_core::logging::{LOG_TARGET, init_json_subscriber, init_subscriber};
use gembed_engine::StubEngine;
use gembed_settings::{GembedSettings, load_settings, load_settings_from_path};
use gembed_udf::{ArgType, EMBED_TEXT, EMBED_TEXTS, FunctionRegistry, GembedComponent, UdfArgs};

/// Printed for a NULL result.
const NULL: &str = "NULL";

#[derive(Debug, Parser)]
#[command(
    name = "gembed",
    about = "Run the EMBED_TEXT / EMBED_TEXTS functions from the command line"
)]
struct Args {
    /// Settings file. Defaults to `$GEMBED_SETTINGS_PATH`, then `~/.gembed/settings.json`.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Output dimensions of the stub engine.
    #[arg(long, global = true, default_value_t = 8)]
    dims: usize,

    /// Log as JSON lines instead of compact text.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Embed one text and print the vector.
    EmbedText {
        /// Embedding method.
        #[arg(long, default_value = "test")]
        method: String,
        /// Model under the method.
        #[arg(long, default_value = "m")]
        model: String,
        /// Print the raw blob as hex instead of decoded floats.
        #[arg(long, default_value_t = false)]
        hex: bool,
        /// Text to embed. Omit to pass NULL.
        text: Option<String>,
    },
    /// Embed a JSON array of texts and print the JSON result.
    EmbedTexts {
        /// Embedding method.
        #[arg(long, default_value = "test")]
        method: String,
        /// Model under the method.
        #[arg(long, default_value = "m")]
        model: String,
        /// JSON array of strings. Omit to pass NULL.
        texts_json: Option<String>,
    },
    /// List the registered functions.
    Functions,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load(args.settings.as_deref())?;

    if args.json_logs {
        init_json_subscriber(&settings.logging.level);
    } else {
        init_subscriber(&settings.logging.level);
    }
    debug!(target: LOG_TARGET, dims = args.dims, "settings loaded");

    let component = GembedComponent::new(Arc::new(StubEngine::new(args.dims)), settings.udf);
    let mut registry = FunctionRegistry::new();
    component
        .init(&mut registry)
        .context("failed to register functions")?;

    let result = run(&registry, &args.command);
    component.deinit(&mut registry);

    println!("{}", result?);
    Ok(())
}

fn load(path: Option<&Path>) -> Result<GembedSettings> {
    match path {
        Some(path) => load_settings_from_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => load_settings().context("failed to load settings"),
    }
}

/// Execute `command` against `registry` and render its output.
fn run(registry: &FunctionRegistry, command: &Command) -> Result<String> {
    const STRINGS: [ArgType; 3] = [ArgType::String; 3];

    match command {
        Command::EmbedText {
            method,
            model,
            hex,
            text,
        } => {
            let mut call = registry.prepare(EMBED_TEXT, &STRINGS)?;
            let args = UdfArgs::strings(&[
                Some(method.as_bytes()),
                Some(model.as_bytes()),
                text.as_deref().map(str::as_bytes),
            ]);
            let Some(blob) = call.execute(&args).into_result()? else {
                return Ok(NULL.to_owned());
            };
            if *hex {
                Ok(to_hex(blob))
            } else {
                Ok(serde_json::to_string(&decode_vector(blob)?)?)
            }
        }
        Command::EmbedTexts {
            method,
            model,
            texts_json,
        } => {
            let mut call = registry.prepare(EMBED_TEXTS, &STRINGS)?;
            let args = UdfArgs::strings(&[
                Some(method.as_bytes()),
                Some(model.as_bytes()),
                texts_json.as_deref().map(str::as_bytes),
            ]);
            match call.execute(&args).into_result()? {
                None => Ok(NULL.to_owned()),
                Some(json) => Ok(String::from_utf8_lossy(json).into_owned()),
            }
        }
        Command::Functions => Ok(registry.names().join("\n")),
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
