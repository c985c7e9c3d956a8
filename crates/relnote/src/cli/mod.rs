//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use relnote_core::config::{load_config, load_config_from_dir, load_config_or_default};
use relnote_core::Config;

use commands::{
    ChangelogCommand, CompletionsCommand, InitCommand, ShowCommand, ValidateCommand,
};

/// relnote - label-driven release notes
#[derive(Debug, Parser)]
#[command(name = "relnote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: search for .relnoterc.* upwards)
    #[arg(short, long, global = true, env = "RELNOTE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a starter configuration
    Init(InitCommand),

    /// Check the configuration for errors and warnings
    Validate(ValidateCommand),

    /// Print the loaded configuration
    Show(ShowCommand),

    /// Render release notes from a snapshot
    Changelog(ChangelogCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub fn execute(&self) -> anyhow::Result<i32> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match &self.command {
            Commands::Init(cmd) => cmd.execute(self),
            Commands::Validate(cmd) => cmd.execute(self),
            Commands::Show(cmd) => cmd.execute(self),
            Commands::Changelog(cmd) => cmd.execute(self),
            Commands::Completions(cmd) => cmd.execute(self),
        }
    }

    /// Status-line printer honoring `--quiet`
    pub fn printer(&self) -> output::Printer {
        output::Printer::new(self.quiet)
    }

    /// Load the configuration named by `--config`, or the one found from `dir`
    pub fn require_config(&self, dir: &Path) -> relnote_core::Result<(Config, PathBuf)> {
        match &self.config {
            Some(path) => Ok((load_config(path)?, path.clone())),
            None => load_config_from_dir(dir),
        }
    }

    /// Like [`Cli::require_config`], but falls back to defaults when no file exists
    pub fn config_or_default(&self, dir: &Path) -> relnote_core::Result<(Config, Option<PathBuf>)> {
        if self.config.is_some() {
            let (config, path) = self.require_config(dir)?;
            return Ok((config, Some(path)));
        }
        let (config, path) = load_config_or_default(dir)?;
        debug!(path = ?path, "configuration resolved");
        Ok((config, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "relnote",
            "--format",
            "json",
            "-C",
            "/tmp",
            "validate",
            "--strict",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.directory, Some(PathBuf::from("/tmp")));
        assert!(matches!(cli.command, Commands::Validate(ref cmd) if cmd.strict));
    }

    #[test]
    fn test_changelog_requires_input() {
        assert!(Cli::try_parse_from(["relnote", "changelog"]).is_err());
    }

    #[test]
    fn test_explicit_config_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.json");
        std::fs::write(&path, r#"{"prefix": "v", "dataSource": "commits"}"#).unwrap();

        let cli = Cli::try_parse_from([
            "relnote",
            "--config",
            path.to_str().unwrap(),
            "show",
        ])
        .unwrap();

        let (config, found) = cli.config_or_default(temp.path()).unwrap();
        assert_eq!(config.prefix, "v");
        assert_eq!(found, Some(path));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "relnote",
            "--config",
            temp.path().join("absent.yaml").to_str().unwrap(),
            "show",
        ])
        .unwrap();

        let err = cli.config_or_default(temp.path()).unwrap_err();
        assert!(err.is_config());
    }
}
