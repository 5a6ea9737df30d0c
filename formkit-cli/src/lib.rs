//! Command-line driver for the formkit schema engine.
//!
//! Stands in for the editor UI: it owns the current document, feeds user
//! intents to the engine one by one and prints the resulting document.

pub mod config;
pub mod session;

pub use config::{
    ApplyConfig, CliConfig, ConfigSource, DEFAULT_CONFIG_FILE, LoadedConfig, OutputConfig,
};
pub use session::{ApplyReport, apply_intents, render};
