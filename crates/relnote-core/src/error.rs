//! Error types for relnote

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RelnoteError
pub type Result<T> = std::result::Result<T, RelnoteError>;

/// Main error type for relnote operations
#[derive(Debug, Error)]
pub enum RelnoteError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),
}

/// Malformed configuration: syntax or structural-shape violations found at load time
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// The same group heading appears twice in `groupBy`
    #[error("Duplicate group heading in groupBy: {0}")]
    DuplicateGroup(String),

    /// File extension does not map to a known format
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Snapshot file not found
    #[error("Snapshot file not found at {0}")]
    SnapshotNotFound(PathBuf),

    /// Failed to parse the snapshot
    #[error("Failed to parse snapshot: {0}")]
    ParseFailed(String),

    /// Failed to render the changelog document
    #[error("Failed to render changelog: {0}")]
    RenderFailed(String),

    /// Failed to write changelog
    #[error("Failed to write changelog: {0}")]
    WriteFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelnoteError {
    /// Whether this error is a malformed-configuration failure
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
