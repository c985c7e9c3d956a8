//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Structured-data formats a configuration file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML document
    Yaml,
    /// TOML document
    Toml,
    /// JSON document
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    ///
    /// Returns `Ok(None)` for files without an extension, whose format is
    /// sniffed from the content instead.
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Ok(None);
        };
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Some(Self::Yaml)),
            "toml" => Ok(Some(Self::Toml)),
            "json" => Ok(Some(Self::Json)),
            other => Err(ConfigError::UnsupportedFormat(other.to_string()).into()),
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }
}

/// Parse configuration text in a known format
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config> {
    let config = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(ConfigError::YamlError)?,
        ConfigFormat::Toml => toml::from_str(content).map_err(ConfigError::TomlError)?,
        ConfigFormat::Json => serde_json::from_str(content).map_err(ConfigError::JsonError)?,
    };
    Ok(config)
}

/// Parse configuration text of unknown format: JSON first, then YAML
fn parse_sniffed(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(json_err) => {
            debug!(error = %json_err, "not JSON, trying YAML");
            parse_config(content, ConfigFormat::Yaml)
        }
    }
}

/// Serialize configuration in the given format
pub fn serialize_config(config: &Config, format: ConfigFormat) -> Result<String> {
    let text = match format {
        ConfigFormat::Yaml => serde_yaml::to_string(config).map_err(ConfigError::YamlError)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        ConfigFormat::Json => {
            serde_json::to_string_pretty(config).map_err(ConfigError::JsonError)?
        }
    };
    Ok(text)
}

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = ConfigFormat::from_path(path)?;
    info!(
        path = %path.display(),
        format = format.map(|f| f.name()).unwrap_or("auto"),
        "loading config"
    );

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config = match format {
        Some(format) => parse_config(&content, format)?,
        None => parse_sniffed(&content)?,
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// The first conventional name found wins; parents are walked until the
/// filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.is_file() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration or use defaults.
///
/// Only a missing file falls back to defaults; a file that exists but does
/// not load is still an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}
