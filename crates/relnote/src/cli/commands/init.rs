//! Init command

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use relnote_core::config::{parse_config, serialize_config, ConfigFormat, DEFAULT_CONFIG_TEMPLATE};

use crate::cli::{output, Cli};
use crate::exit_codes;

/// Write a starter `.relnoterc` configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Configuration syntax (prompted for when omitted)
    #[arg(long, value_enum)]
    pub syntax: Option<Syntax>,

    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Syntax of the generated file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Syntax {
    #[default]
    Yaml,
    Toml,
    Json,
}

impl Syntax {
    const ALL: [Syntax; 3] = [Syntax::Yaml, Syntax::Toml, Syntax::Json];

    fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    /// Render the starter configuration in this syntax
    fn render(self) -> anyhow::Result<String> {
        match self {
            // Keep the commented YAML starter as-is
            Self::Yaml => Ok(DEFAULT_CONFIG_TEMPLATE.to_string()),
            Self::Toml | Self::Json => {
                let config = parse_config(DEFAULT_CONFIG_TEMPLATE, ConfigFormat::Yaml)?;
                let format = if self == Self::Toml {
                    ConfigFormat::Toml
                } else {
                    ConfigFormat::Json
                };
                Ok(serialize_config(&config, format)?)
            }
        }
    }
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(force = self.force, yes = self.yes, syntax = ?self.syntax, "executing init command");
        let cwd = std::env::current_dir()?;

        // Choose syntax if not specified
        let syntax = match self.syntax {
            Some(syntax) => syntax,
            None if self.yes => Syntax::default(),
            None => {
                let names: Vec<&str> = Syntax::ALL.iter().map(|s| s.extension()).collect();
                let selection = Select::new()
                    .with_prompt("Configuration format")
                    .items(&names)
                    .default(0)
                    .interact()?;
                Syntax::ALL[selection]
            }
        };

        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(format!(".relnoterc.{}", syntax.extension())));

        // Check if config already exists
        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(exit_codes::SUCCESS);
            }
        }

        let content = syntax.render()?;
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&config_path, &content)?;

        cli.printer().success(&format!(
            "Created configuration at {}",
            output::path_style().apply_to(config_path.display())
        ));
        if !cli.quiet {
            println!();
            println!("Next steps:");
            println!("  1. Set username, repo and groupBy in {}", config_path.display());
            println!("  2. Run {} to check it", style("relnote validate").cyan());
            println!(
                "  3. Run {} to render release notes",
                style("relnote changelog --input releases.json").cyan()
            );
        }

        Ok(exit_codes::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_syntax_renders_a_loadable_config() {
        let reference = parse_config(DEFAULT_CONFIG_TEMPLATE, ConfigFormat::Yaml).unwrap();
        for (syntax, format) in [
            (Syntax::Yaml, ConfigFormat::Yaml),
            (Syntax::Toml, ConfigFormat::Toml),
            (Syntax::Json, ConfigFormat::Json),
        ] {
            let content = syntax.render().unwrap();
            let parsed = parse_config(&content, format).unwrap();
            assert_eq!(parsed, reference, "{:?}", syntax);
        }
    }
}
