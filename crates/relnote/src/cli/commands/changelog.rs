//! Changelog command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use relnote_changelog::{ChangelogGenerator, FormatterRegistry, Snapshot};

use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Render release notes from a release snapshot
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Snapshot of releases, issues and commits (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Output file (defaults to the configured changelogFilename)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(input = %self.input.display(), write = self.write, "executing changelog command");
        let cwd = std::env::current_dir()?;
        let (config, _) = cli.config_or_default(&cwd)?;

        let snapshot = Snapshot::load(&self.input)?;

        let output_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(&config.changelog_filename));

        let mut generator = ChangelogGenerator::new(config);
        if let Some(formatter) = FormatterRegistry::new().for_path(&output_path) {
            generator = generator.with_shared_formatter(formatter);
        }

        let changelog = generator.generate(&snapshot);
        if changelog.is_empty() {
            cli.printer()
                .warning("No releases with notable changes found in the snapshot.");
        }

        if self.write {
            generator.write(&changelog, &output_path)?;

            cli.printer().success(&format!(
                "Release notes written to {}",
                output::path_style().apply_to(output_path.display())
            ));
        } else {
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&changelog)?);
                }
                OutputFormat::Text => {
                    print!("{}", generator.format(&changelog)?);
                }
            }
        }

        Ok(exit_codes::SUCCESS)
    }
}
