//! Configuration validation

use std::collections::HashMap;

use chrono::format::{Item, StrftimeItems};
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{Config, GroupBy};

/// Validate configuration.
///
/// Only structural problems fail; see [`config_warnings`] for the rest.
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_output(config)?;
    validate_groups(config)?;
    validate_templates(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_output(config: &Config) -> Result<()> {
    if config.changelog_filename.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelogFilename".to_string(),
            message: "output path cannot be empty".to_string(),
        }
        .into());
    }

    if StrftimeItems::new(&config.date_format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidValue {
            field: "dateFormat".to_string(),
            message: format!("'{}' is not a valid strftime pattern", config.date_format),
        }
        .into());
    }

    Ok(())
}

fn validate_groups(config: &Config) -> Result<()> {
    let GroupBy::Groups(groups) = &config.group_by else {
        return Ok(());
    };

    for (i, group) in groups.iter().enumerate() {
        if group.heading.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("groupBy[{}]", i),
                message: "group heading cannot be empty".to_string(),
            }
            .into());
        }

        if groups[..i].iter().any(|g| g.heading == group.heading) {
            return Err(ConfigError::DuplicateGroup(group.heading.clone()).into());
        }
    }

    Ok(())
}

fn validate_templates(config: &Config) -> Result<()> {
    if config.template.no_label.as_text().is_some_and(|t| t.trim().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: "template.noLabel".to_string(),
            message: "fallback heading cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Non-fatal findings about a configuration, as readable messages
pub fn config_warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.username.as_deref().map_or(true, str::is_empty) {
        warnings.push("username is not set".to_string());
    }
    if config.repo.as_deref().map_or(true, str::is_empty) {
        warnings.push("repo is not set".to_string());
    }

    let mut owner: HashMap<&str, &str> = HashMap::new();
    for group in config.group_by.groups() {
        if group.labels.is_empty() {
            warnings.push(format!(
                "group '{}' has no labels and will never match",
                group.heading
            ));
        }

        for label in &group.labels {
            if let Some(first) = owner.get(label.as_str()) {
                warnings.push(format!(
                    "label '{}' is in both '{}' and '{}'; '{}' wins",
                    label, first, group.heading, first
                ));
            } else {
                owner.insert(label.as_str(), group.heading.as_str());
            }

            if config.is_ignored_label(label) {
                warnings.push(format!(
                    "label '{}' in group '{}' is also ignored; matching items are dropped",
                    label, group.heading
                ));
            }
        }
    }

    for (slot, template, known) in config.template.slots() {
        for name in template.unknown_variables(known) {
            warnings.push(format!(
                "template.{} uses unknown placeholder '{{{{{}}}}}'",
                slot, name
            ));
        }
    }

    debug!(count = warnings.len(), "configuration warnings collected");
    warnings
}
