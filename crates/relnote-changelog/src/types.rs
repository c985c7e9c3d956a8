//! Changelog types

use chrono::{DateTime, Utc};
use relnote_core::TemplateVariables;
use serde::{Deserialize, Serialize};

/// A commit as fetched from the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitItem {
    /// Full commit message
    pub message: String,
    /// Link to the commit
    pub url: String,
    /// Hosting-service login of the author, when known
    #[serde(default)]
    pub author: Option<String>,
    /// Author display name from the commit
    #[serde(default)]
    pub name: String,
    /// Whether this is a merge commit
    #[serde(default)]
    pub merge: bool,
}

impl CommitItem {
    /// Create a commit without an author login
    pub fn new(
        message: impl Into<String>,
        url: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            url: url.into(),
            author: None,
            name: name.into(),
            merge: false,
        }
    }

    /// Set the author login
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Mark as a merge commit
    pub fn as_merge(mut self) -> Self {
        self.merge = true;
        self
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default().trim()
    }

    /// Variables for the `commit` slot
    pub fn variables(&self) -> TemplateVariables {
        TemplateVariables::new()
            .set("message", self.summary())
            .set("url", self.url.as_str())
            .set_opt("author", self.author.as_deref())
            .set("name", self.name.as_str())
    }
}

/// An issue or pull request as fetched from the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueItem {
    /// Issue number
    pub number: u64,
    /// Title
    pub title: String,
    /// Link to the issue
    pub url: String,
    /// Login of the user who opened it
    #[serde(default)]
    pub user_login: String,
    /// Profile link of that user
    #[serde(default)]
    pub user_url: String,
    /// Attached labels
    #[serde(default)]
    pub labels: Vec<String>,
    /// Milestone title, if any
    #[serde(default)]
    pub milestone: Option<String>,
    /// Whether this is a pull request rather than an issue
    #[serde(default)]
    pub pull_request: bool,
}

impl IssueItem {
    /// Create an issue with no labels
    pub fn new(number: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            url: url.into(),
            user_login: String::new(),
            user_url: String::new(),
            labels: Vec::new(),
            milestone: None,
            pull_request: false,
        }
    }

    /// Set the opening user
    pub fn with_user(mut self, login: impl Into<String>, url: impl Into<String>) -> Self {
        self.user_login = login.into();
        self.user_url = url.into();
        self
    }

    /// Add a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Set the milestone
    pub fn with_milestone(mut self, milestone: impl Into<String>) -> Self {
        self.milestone = Some(milestone.into());
        self
    }

    /// Mark as a pull request
    pub fn as_pull_request(mut self) -> Self {
        self.pull_request = true;
        self
    }

    /// Variables for the `issue` slot; `labels` is the pre-rendered label list
    pub fn variables(&self, labels: &str) -> TemplateVariables {
        TemplateVariables::new()
            .set("name", self.title.as_str())
            .set("text", format!("#{}", self.number))
            .set("url", self.url.as_str())
            .set("user_login", self.user_login.as_str())
            .set("user_url", self.user_url.as_str())
            .set("labels", labels)
    }
}

/// One release in a snapshot: a tag plus the items closed in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseInput {
    /// Tag name
    pub tag: String,
    /// Release date
    pub date: DateTime<Utc>,
    /// Issues and pull requests
    #[serde(default)]
    pub issues: Vec<IssueItem>,
    /// Commits since the previous release
    #[serde(default)]
    pub commits: Vec<CommitItem>,
}

impl ReleaseInput {
    /// Create an empty release
    pub fn new(tag: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            tag: tag.into(),
            date,
            issues: Vec::new(),
            commits: Vec::new(),
        }
    }
}

/// A section in a release: one group heading and its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Group heading
    pub heading: String,
    /// Items in this section
    pub items: Vec<IssueItem>,
}

impl Section {
    /// Create a new section
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            items: Vec::new(),
        }
    }

    /// Add an item to the section
    pub fn add_item(&mut self, item: IssueItem) {
        self.items.push(item);
    }

    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A release as it will appear in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    /// Display name (prefix + tag)
    pub name: String,
    /// Source tag or milestone
    pub tag: String,
    /// Release date
    pub date: DateTime<Utc>,
    /// Grouped issues, in output order
    pub sections: Vec<Section>,
    /// Ungrouped commits for the `commits` source
    pub commits: Vec<CommitItem>,
}

impl ReleaseEntry {
    /// Create an empty entry
    pub fn new(name: impl Into<String>, tag: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            date,
            sections: Vec::new(),
            commits: Vec::new(),
        }
    }

    /// Check if entry has any content
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Section::is_empty) && self.commits.is_empty()
    }

    /// Find a section by heading
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }
}

/// A generated changelog, newest release first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Changelog {
    /// Releases in output order
    pub releases: Vec<ReleaseEntry>,
}

impl Changelog {
    /// Check if there is anything to write
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_variables_with_author() {
        let commit = CommitItem::new("fix crash\n\nlong body", "https://x/1", "Alice B")
            .with_author("alice");
        let vars = commit.variables();
        assert_eq!(vars.get("message"), Some("fix crash"));
        assert_eq!(vars.get("author"), Some("alice"));
        assert_eq!(vars.get("name"), Some("Alice B"));
    }

    #[test]
    fn test_commit_variables_without_author() {
        let commit = CommitItem::new("fix crash", "https://x/1", "Alice B");
        assert!(!commit.variables().has("author"));
    }

    #[test]
    fn test_issue_variables() {
        let issue = IssueItem::new(42, "Add snapshot flag", "https://x/pull/42")
            .with_user("bob", "https://x/bob");
        let vars = issue.variables("");
        assert_eq!(vars.get("text"), Some("#42"));
        assert_eq!(vars.get("user_login"), Some("bob"));
    }

    #[test]
    fn test_section() {
        let mut section = Section::new("Bug Fixes");
        assert!(section.is_empty());

        section.add_item(IssueItem::new(1, "fix", "https://x/1").with_label("kind/bug"));

        assert!(!section.is_empty());
    }

    #[test]
    fn test_issue_defaults_from_json() {
        let json = r#"{"number": 7, "title": "t", "url": "u"}"#;
        let issue: IssueItem = serde_json::from_str(json).unwrap();
        assert!(issue.labels.is_empty());
        assert!(!issue.pull_request);
        assert!(issue.milestone.is_none());
    }
}
