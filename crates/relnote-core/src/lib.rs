//! relnote core - configuration descriptor for label-driven release notes
//!
//! This crate provides the configuration types, loading and validation,
//! the template engine behind every rendering slot, and the error taxonomy
//! shared by the relnote crates.

pub mod config;
pub mod error;
pub mod template;

pub use config::{Config, DataSource, Group, GroupBy, IncludeMessages, TemplateConfig};
pub use error::{ChangelogError, ConfigError, RelnoteError, Result};
pub use template::{Template, TemplateVariables};
