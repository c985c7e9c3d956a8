//! Locally stored release data.
//!
//! A snapshot is what a fetcher pulled from the hosting service: releases,
//! newest first, each with the issues, pull requests and commits it closed.

use std::path::Path;

use relnote_core::{ChangelogError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::types::ReleaseInput;

/// Releases available for rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Releases, newest first
    #[serde(default)]
    pub releases: Vec<ReleaseInput>,
}

impl Snapshot {
    /// Create a snapshot from releases
    pub fn new(releases: Vec<ReleaseInput>) -> Self {
        Self { releases }
    }

    /// Parse a JSON snapshot
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| ChangelogError::ParseFailed(e.to_string()).into())
    }

    /// Parse a YAML snapshot
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| ChangelogError::ParseFailed(e.to_string()).into())
    }

    /// Load a snapshot file; `.yaml`/`.yml` files are YAML, anything else JSON
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ChangelogError::SnapshotNotFound(path.to_path_buf()).into());
        }

        let content = std::fs::read_to_string(path).map_err(ChangelogError::Io)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e, "yaml" | "yml"));

        let snapshot = if is_yaml {
            Self::from_yaml(&content)?
        } else {
            Self::from_json(&content)?
        };

        info!(releases = snapshot.releases.len(), "snapshot loaded");
        debug!(
            issues = snapshot.releases.iter().map(|r| r.issues.len()).sum::<usize>(),
            commits = snapshot.releases.iter().map(|r| r.commits.len()).sum::<usize>(),
            "snapshot contents"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SNAPSHOT_JSON: &str = r#"{
        "releases": [
            {
                "tag": "v0.10.0",
                "date": "2021-06-03T12:00:00Z",
                "issues": [
                    {"number": 812, "title": "Add portmap support", "url": "https://x/812",
                     "labels": ["kind/feature"], "pull_request": true}
                ],
                "commits": [
                    {"message": "fix crash", "url": "https://x/1", "author": "alice", "name": "Alice B"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let snapshot = Snapshot::from_json(SNAPSHOT_JSON).unwrap();
        assert_eq!(snapshot.releases.len(), 1);
        assert_eq!(snapshot.releases[0].issues[0].labels, vec!["kind/feature"]);
        assert_eq!(snapshot.releases[0].commits[0].author.as_deref(), Some("alice"));
    }

    #[test]
    fn test_load_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("releases.yaml");
        std::fs::write(
            &path,
            "releases:\n  - tag: v1.0.0\n    date: 2021-01-01T00:00:00Z\n    issues:\n      - number: 1\n        title: t\n        url: u\n",
        )
        .unwrap();

        let snapshot = Snapshot::load(&path).unwrap();
        assert_eq!(snapshot.releases[0].tag, "v1.0.0");
        assert!(snapshot.releases[0].commits.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Snapshot::load(&temp.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_malformed_snapshot() {
        assert!(Snapshot::from_json("{\"releases\": [{\"tag\": 1}]}").is_err());
    }
}
