//! Default configuration values

/// Primary configuration file name
pub const DEFAULT_CONFIG_YAML: &str = ".relnoterc.yaml";

/// Default output file
pub const DEFAULT_CHANGELOG_FILENAME: &str = "CHANGELOG.md";

/// Default strftime pattern for `{{date}}`
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Default `commit` slot: link to the commit, credited to the author login or name
pub const DEFAULT_COMMIT_TEMPLATE: &str =
    "- [{{message}}]({{url}}) - {{#author}}@{{author}}{{/author}}{{^author}}{{name}}{{/author}}";

/// Default `issue` slot
pub const DEFAULT_ISSUE_TEMPLATE: &str =
    "- {{name}} ([{{text}}]({{url}}), [@{{user_login}}]({{user_url}}))";

/// Default `noLabel` heading
pub const DEFAULT_NO_LABEL: &str = "closed";

/// Default `group` slot
pub const DEFAULT_GROUP_TEMPLATE: &str = "\n### {{heading}}\n";

/// Default `release` slot
pub const DEFAULT_RELEASE_TEMPLATE: &str = "## {{release}}\n\n**Released:** {{date}}\n\n{{body}}";

/// Default `releaseSeparator` slot
pub const DEFAULT_RELEASE_SEPARATOR: &str = "\n\n---\n\n";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        ".relnoterc.yml",
        ".relnoterc.toml",
        ".relnoterc.json",
        ".relnoterc",
    ]
}

/// Starter configuration written by `relnote init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r###"# relnote configuration
# Items are placed under the first group whose labels match.

dataSource: prs
prefix: ""
onlyMilestones: false
username: your-org
repo: your-repo
groupBy:
  New Features: ["kind/feature"]
  API Changes: ["kind/api-change"]
  Enhancements: ["kind/enhancement", "area/ux"]
  Bug Fixes: ["kind/bug"]
  Documentation: ["kind/documentation"]
  Testing: ["area/testing"]
  Releasing: ["area/releasing"]
  No category: ["closed"]
changelogFilename: docs/releases/next.md
ignoreLabels: ["kind/cleanup"]
template:
  commit: "- [{{message}}]({{url}}) - {{#author}}@{{author}}{{/author}}{{^author}}{{name}}{{/author}}"
  issue: "- {{name}} ([{{text}}]({{url}}), [@{{user_login}}]({{user_url}}))"
  label: ""
  noLabel: closed
  group: "\n### {{heading}}\n"
  changelogTitle: ""
  release: "## {{release}}\n\n**Released:** {{date}}\n\n{{body}}"
  releaseSeparator: "\n\n---\n\n"
"###;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DataSource, TemplateConfig};

    #[test]
    fn test_template_parses() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.data_source, DataSource::Prs);
        assert_eq!(config.group_by.groups().len(), 8);
        assert_eq!(config.group_by.groups()[0].heading, "New Features");
        assert_eq!(config.ignore_labels, vec!["kind/cleanup"]);
        assert_eq!(config.template, TemplateConfig::default());
    }

    #[test]
    fn test_template_keeps_markdown_headings() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.template.release.as_text(), Some(DEFAULT_RELEASE_TEMPLATE));
        assert_eq!(config.template.group.as_text(), Some(DEFAULT_GROUP_TEMPLATE));
        assert!(DEFAULT_CONFIG_TEMPLATE.ends_with("releaseSeparator: \"\\n\\n---\\n\\n\"\n"));
    }
}
