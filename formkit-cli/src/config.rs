//! CLI configuration, read from `formkit.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{Level, info};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "formkit.toml";

/// How a batch of intents is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
    /// Abort the batch at the first rejected intent. When false, rejected
    /// intents are logged and skipped.
    pub stop_on_error: bool,
    /// Mark every newly created field as required.
    pub required_by_default: bool,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            stop_on_error: true,
            required_by_default: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub log_level: String,
    pub apply: ApplyConfig,
    pub output: OutputConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            apply: ApplyConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Where a loaded config came from.
///
/// Loading happens before the log subscriber exists, so the outcome is
/// returned and logged by the caller once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file at this path; defaults are in effect.
    Defaults(PathBuf),
    /// Parsed from this file.
    File(PathBuf),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            Self::Defaults(path) => info!("No config file at {:?}, using defaults", path),
            Self::File(path) => info!("Loaded config from {:?}", path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: CliConfig,
    pub source: ConfigSource,
}

impl CliConfig {
    /// Loads the config at `path`. A missing file yields the defaults; an
    /// unreadable or unparsable one is an error.
    pub fn load_from(path: &Path) -> Result<LoadedConfig> {
        if !path.exists() {
            return Ok(LoadedConfig {
                config: Self::default(),
                source: ConfigSource::Defaults(path.to_path_buf()),
            });
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(LoadedConfig {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    /// The configured log level, falling back to INFO for unknown names.
    #[must_use]
    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = CliConfig::load_from(&path).unwrap();
        assert_eq!(loaded.source, ConfigSource::Defaults(path));
        let config = loaded.config;
        assert_eq!(config, CliConfig::default());
        assert!(config.apply.stop_on_error);
        assert!(config.output.pretty);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"\n[apply]\nrequired_by_default = true").unwrap();

        let loaded = CliConfig::load_from(file.path()).unwrap();
        assert_eq!(loaded.source, ConfigSource::File(file.path().to_path_buf()));
        let config = loaded.config;
        assert_eq!(config.level(), Level::DEBUG);
        assert!(config.apply.required_by_default);
        assert!(config.apply.stop_on_error);
        assert!(config.output.pretty);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[apply\nstop_on_error = ").unwrap();
        assert!(CliConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let config = CliConfig {
            log_level: "chatty".to_string(),
            ..CliConfig::default()
        };
        assert_eq!(config.level(), Level::INFO);
    }
}
