//! Configuration types

use std::fmt;
use std::path::PathBuf;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::template::{Template, TemplateVariables};

use super::defaults;

/// The configuration descriptor read once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Where change data comes from
    pub data_source: DataSource,

    /// Prepended to release names
    pub prefix: String,

    /// Only include items attached to a milestone
    pub only_milestones: bool,

    /// Owner of the remote project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Name of the remote project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Label groups, in output order
    pub group_by: GroupBy,

    /// Output file path
    pub changelog_filename: PathBuf,

    /// Items carrying any of these labels are dropped
    #[serde(alias = "ignore-labels")]
    pub ignore_labels: Vec<String>,

    /// Commits whose message contains any of these are dropped
    pub ignore_commits_with: Vec<String>,

    /// Releases whose tag contains any of these are skipped
    pub ignore_tags_with: Vec<String>,

    /// Which commits the `commits` source keeps
    pub include_messages: IncludeMessages,

    /// strftime pattern for release dates
    pub date_format: String,

    /// Rendering templates
    pub template: TemplateConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: DataSource::default(),
            prefix: String::new(),
            only_milestones: false,
            username: None,
            repo: None,
            group_by: GroupBy::default(),
            changelog_filename: PathBuf::from(defaults::DEFAULT_CHANGELOG_FILENAME),
            ignore_labels: Vec::new(),
            ignore_commits_with: Vec::new(),
            ignore_tags_with: Vec::new(),
            include_messages: IncludeMessages::default(),
            date_format: defaults::DEFAULT_DATE_FORMAT.to_string(),
            template: TemplateConfig::default(),
        }
    }
}

impl Config {
    /// Check whether a label excludes an item
    pub fn is_ignored_label(&self, label: &str) -> bool {
        self.ignore_labels.iter().any(|l| l == label)
    }

    /// Heading used for items that match no group
    pub fn no_label_heading(&self) -> String {
        self.template.no_label.render(&TemplateVariables::new())
    }
}

/// Source of change data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Closed issues
    #[default]
    Issues,
    /// Merged pull requests
    Prs,
    /// Commits between tags
    Commits,
    /// Issues grouped by milestone
    Milestones,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Issues => "issues",
            Self::Prs => "prs",
            Self::Commits => "commits",
            Self::Milestones => "milestones",
        };
        f.write_str(name)
    }
}

/// Commit filter for the `commits` source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeMessages {
    /// Non-merge commits only
    #[default]
    Commits,
    /// Merge commits only
    Merges,
    /// Every commit
    All,
}

impl IncludeMessages {
    /// Whether a commit with the given merge flag is kept
    pub fn accepts(&self, merge: bool) -> bool {
        match self {
            Self::Commits => !merge,
            Self::Merges => merge,
            Self::All => true,
        }
    }
}

/// A named bucket of labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Heading shown above the group's entries
    pub heading: String,
    /// Labels that place an item in this group
    pub labels: Vec<String>,
}

impl Group {
    /// Create a new group
    pub fn new<I, S>(heading: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            heading: heading.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any of `labels` belongs to this group
    pub fn matches<S: AsRef<str>>(&self, labels: &[S]) -> bool {
        labels
            .iter()
            .any(|label| self.labels.iter().any(|l| l == label.as_ref()))
    }
}

/// How items are grouped.
///
/// Serialized either as an ordered mapping of heading to labels, or as the
/// string `"label"` for one group per label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupBy {
    /// Configured groups, in priority and output order
    Groups(Vec<Group>),
    /// One group per label, named after the label
    Label,
}

impl Default for GroupBy {
    fn default() -> Self {
        Self::Groups(Vec::new())
    }
}

impl GroupBy {
    /// The configured groups (empty for [`GroupBy::Label`])
    pub fn groups(&self) -> &[Group] {
        match self {
            Self::Groups(groups) => groups,
            Self::Label => &[],
        }
    }

    /// Whether each label forms its own group
    pub fn is_by_label(&self) -> bool {
        matches!(self, Self::Label)
    }

    /// First group whose label set intersects `labels`
    pub fn first_match<S: AsRef<str>>(&self, labels: &[S]) -> Option<&Group> {
        self.groups().iter().find(|group| group.matches(labels))
    }
}

impl Serialize for GroupBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Label => serializer.serialize_str("label"),
            Self::Groups(groups) => {
                let mut map = serializer.serialize_map(Some(groups.len()))?;
                for group in groups {
                    map.serialize_entry(&group.heading, &group.labels)?;
                }
                map.end()
            }
        }
    }
}

struct GroupByVisitor;

impl<'de> Visitor<'de> for GroupByVisitor {
    type Value = GroupBy;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of group heading to labels, or the string \"label\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<GroupBy, E> {
        if value == "label" {
            Ok(GroupBy::Label)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<GroupBy, A::Error> {
        let mut groups: Vec<Group> = Vec::new();
        while let Some((heading, labels)) = map.next_entry::<String, Vec<String>>()? {
            if groups.iter().any(|g| g.heading == heading) {
                return Err(de::Error::custom(format!(
                    "duplicate group heading in groupBy: {}",
                    heading
                )));
            }
            groups.push(Group { heading, labels });
        }
        Ok(GroupBy::Groups(groups))
    }
}

impl<'de> Deserialize<'de> for GroupBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(GroupByVisitor)
    }
}

/// Named rendering slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateConfig {
    /// One commit (`message`, `url`, `author`, `name`)
    pub commit: Template,
    /// One issue or pull request
    pub issue: Template,
    /// One label inside `{{labels}}`
    pub label: Template,
    /// Heading for items matching no group
    pub no_label: Template,
    /// Group heading (`heading`)
    pub group: Template,
    /// Document title
    pub changelog_title: Template,
    /// One release (`release`, `date`, `body`)
    pub release: Template,
    /// Between releases
    pub release_separator: Template,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            commit: Template::text(defaults::DEFAULT_COMMIT_TEMPLATE),
            issue: Template::text(defaults::DEFAULT_ISSUE_TEMPLATE),
            label: Template::text(""),
            no_label: Template::text(defaults::DEFAULT_NO_LABEL),
            group: Template::text(defaults::DEFAULT_GROUP_TEMPLATE),
            changelog_title: Template::text(""),
            release: Template::text(defaults::DEFAULT_RELEASE_TEMPLATE),
            release_separator: Template::text(defaults::DEFAULT_RELEASE_SEPARATOR),
        }
    }
}

impl TemplateConfig {
    /// Every slot with its wire name and the variables it understands
    pub fn slots(&self) -> [(&'static str, &Template, &'static [&'static str]); 8] {
        [
            ("commit", &self.commit, &["message", "url", "author", "name"]),
            (
                "issue",
                &self.issue,
                &["name", "text", "url", "user_login", "user_url", "labels"],
            ),
            ("label", &self.label, &["label"]),
            ("noLabel", &self.no_label, &[]),
            ("group", &self.group, &["heading"]),
            ("changelogTitle", &self.changelog_title, &[]),
            ("release", &self.release, &["release", "date", "body"]),
            ("releaseSeparator", &self.release_separator, &[]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_source, DataSource::Issues);
        assert_eq!(config.changelog_filename, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.no_label_heading(), "closed");
        assert!(config.group_by.groups().is_empty());
    }

    #[test]
    fn test_group_order_preserved() {
        let yaml = "groupBy:\n  Zeta: [z]\n  Alpha: [a]\n  Mid: [m]\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let headings: Vec<_> = config
            .group_by
            .groups()
            .iter()
            .map(|g| g.heading.as_str())
            .collect();
        assert_eq!(headings, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_group_by_label_string() {
        let config: Config = serde_json::from_str(r#"{"groupBy": "label"}"#).unwrap();
        assert!(config.group_by.is_by_label());
        assert!(serde_json::from_str::<Config>(r#"{"groupBy": "milestone"}"#).is_err());
    }

    #[test]
    fn test_duplicate_heading_rejected() {
        let json = r#"{"groupBy": {"Bugs": ["kind/bug"], "Bugs": ["bug"]}}"#;
        let err = serde_json::from_str::<Config>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate group heading"));
    }

    #[test]
    fn test_group_labels_must_be_strings() {
        let json = r#"{"groupBy": {"Bugs": [1, 2]}}"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn test_ignore_labels_alias() {
        let json = r#"{"ignore-labels": ["kind/cleanup"]}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.is_ignored_label("kind/cleanup"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let json = r#"{"repo": "ignite", "somethingElse": true}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.repo.as_deref(), Some("ignite"));
    }

    #[test]
    fn test_unknown_data_source_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"dataSource": "tickets"}"#).is_err());
    }

    #[test]
    fn test_include_messages_accepts() {
        assert!(IncludeMessages::Commits.accepts(false));
        assert!(!IncludeMessages::Commits.accepts(true));
        assert!(IncludeMessages::Merges.accepts(true));
        assert!(IncludeMessages::All.accepts(true));
    }

    #[test]
    fn test_first_match_uses_group_order() {
        let group_by = GroupBy::Groups(vec![
            Group::new("Enhancements", ["kind/enhancement", "area/ux"]),
            Group::new("Bug Fixes", ["kind/bug"]),
        ]);
        let found = group_by.first_match(&["kind/bug", "area/ux"]).unwrap();
        assert_eq!(found.heading, "Enhancements");
        assert!(group_by.first_match(&["kind/other"]).is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = Config::default();
        config.username = Some("weaveworks".to_string());
        config.group_by = GroupBy::Groups(vec![
            Group::new("New Features", ["kind/feature"]),
            Group::new("Bug Fixes", ["kind/bug"]),
        ]);
        config.ignore_labels = vec!["kind/cleanup".to_string()];

        let json = serde_json::to_string(&config).unwrap();
        let reloaded: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, config);
    }
}
