//! Show command

use clap::Args;
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Print the effective configuration with defaults filled in
#[derive(Debug, Args)]
pub struct ShowCommand {}

impl ShowCommand {
    /// Execute the show command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!("executing show command");
        let cwd = std::env::current_dir()?;
        let (config, path) = cli.config_or_default(&cwd)?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    let source = path
                        .map(|p| output::path_style().apply_to(p.display()).to_string())
                        .unwrap_or_else(|| "built-in defaults".to_string());
                    println!("{}", output::header("Configuration"));
                    println!("{}", output::key_value("Source", &source));
                    println!();
                }
                print!("{}", serde_yaml::to_string(&config)?);
            }
        }

        Ok(exit_codes::SUCCESS)
    }
}
