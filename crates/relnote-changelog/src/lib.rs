//! relnote changelog - label-grouped release notes
//!
//! This crate places issues, pull requests and commits into the groups a
//! [`relnote_core::Config`] declares and renders them through its template
//! slots.

pub mod formatter;
pub mod generator;
pub mod grouping;
pub mod snapshot;
pub mod types;

pub use formatter::{ChangelogFormatter, FormatterRegistry, JsonFormatter, TemplateFormatter};
pub use generator::ChangelogGenerator;
pub use grouping::{classify, Placement};
pub use snapshot::Snapshot;
pub use types::{Changelog, CommitItem, IssueItem, ReleaseEntry, ReleaseInput, Section};
