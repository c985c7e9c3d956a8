//! JSON changelog formatter

use relnote_core::{ChangelogError, Config, Result};

use super::ChangelogFormatter;
use crate::types::Changelog;

/// Structured JSON output of the grouped changelog
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl ChangelogFormatter for JsonFormatter {
    fn format(&self, changelog: &Changelog, _config: &Config) -> Result<String> {
        let json = serde_json::to_string_pretty(changelog)
            .map_err(|e| ChangelogError::RenderFailed(e.to_string()))?;
        Ok(json + "\n")
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
