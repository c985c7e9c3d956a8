//! Changelog formatters

mod json;
mod registry;
mod template;

pub use json::JsonFormatter;
pub use registry::FormatterRegistry;
pub use template::TemplateFormatter;

use relnote_core::{Config, Result};

use crate::types::Changelog;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a generated changelog to a document
    fn format(&self, changelog: &Changelog, config: &Config) -> Result<String>;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
