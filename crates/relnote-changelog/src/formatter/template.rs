//! Formatter driven by the configured template slots

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use relnote_core::config::DEFAULT_DATE_FORMAT;
use relnote_core::{Config, Result, TemplateVariables};
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{Changelog, CommitItem, IssueItem, ReleaseEntry};

/// Renders a changelog through `template.*` from the configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFormatter;

impl TemplateFormatter {
    /// Create a new template formatter
    pub fn new() -> Self {
        Self
    }

    /// Render one commit with the `commit` slot
    pub fn render_commit(&self, commit: &CommitItem, config: &Config) -> String {
        config.template.commit.render(&commit.variables())
    }

    /// Render one issue with the `issue` slot
    pub fn render_issue(&self, issue: &IssueItem, config: &Config) -> String {
        let labels = self.render_labels(issue, config);
        config.template.issue.render(&issue.variables(&labels))
    }

    fn render_labels(&self, issue: &IssueItem, config: &Config) -> String {
        issue
            .labels
            .iter()
            .filter(|label| !config.is_ignored_label(label))
            .map(|label| {
                config
                    .template
                    .label
                    .render(&TemplateVariables::new().set("label", label.as_str()))
            })
            .collect()
    }

    fn render_body(&self, entry: &ReleaseEntry, config: &Config) -> String {
        let mut blocks: Vec<String> = entry
            .sections
            .iter()
            .filter(|section| !section.is_empty())
            .map(|section| {
                let heading = config
                    .template
                    .group
                    .render(&TemplateVariables::new().set("heading", section.heading.as_str()));
                let items: Vec<String> = section
                    .items
                    .iter()
                    .map(|item| self.render_issue(item, config))
                    .collect();
                format!("{}{}", heading, items.join("\n"))
            })
            .collect();

        if !entry.commits.is_empty() {
            let commits: Vec<String> = entry
                .commits
                .iter()
                .map(|commit| self.render_commit(commit, config))
                .collect();
            blocks.push(commits.join("\n"));
        }

        blocks.join("\n")
    }

    /// Render one release with the `release` slot
    pub fn render_release(&self, entry: &ReleaseEntry, config: &Config) -> String {
        let vars = TemplateVariables::new()
            .set("release", entry.name.as_str())
            .set("date", format_date(&entry.date, &config.date_format))
            .set("body", self.render_body(entry, config));
        config.template.release.render(&vars)
    }
}

impl ChangelogFormatter for TemplateFormatter {
    #[instrument(skip(self, changelog, config), fields(release_count = changelog.releases.len()))]
    fn format(&self, changelog: &Changelog, config: &Config) -> Result<String> {
        let mut output = config.template.changelog_title.render(&TemplateVariables::new());

        let separator = config.template.release_separator.render(&TemplateVariables::new());
        let releases: Vec<String> = changelog
            .releases
            .iter()
            .map(|entry| self.render_release(entry, config))
            .collect();
        output.push_str(&releases.join(&separator));

        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }

        debug!(output_len = output.len(), "release notes formatted");
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

/// Format a date, falling back to the default pattern if `pattern` is invalid
fn format_date(date: &DateTime<Utc>, pattern: &str) -> String {
    let valid = !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    let pattern = if valid { pattern } else { DEFAULT_DATE_FORMAT };
    date.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;
    use chrono::TimeZone;
    use relnote_core::config::DEFAULT_CONFIG_TEMPLATE;
    use relnote_core::Template;

    fn example_config() -> Config {
        serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap()
    }

    fn release_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 6, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_commit_with_author() {
        let commit = CommitItem::new("fix crash", "https://x/1", "Alice B").with_author("alice");
        assert_eq!(
            TemplateFormatter::new().render_commit(&commit, &example_config()),
            "- [fix crash](https://x/1) - @alice"
        );
    }

    #[test]
    fn test_commit_without_author() {
        let commit = CommitItem::new("fix crash", "https://x/1", "Alice B");
        assert_eq!(
            TemplateFormatter::new().render_commit(&commit, &example_config()),
            "- [fix crash](https://x/1) - Alice B"
        );
    }

    #[test]
    fn test_commit_with_function_template() {
        let mut config = example_config();
        config.template.commit = Template::function(|vars| {
            let who = match vars.get("author") {
                Some(author) => format!("@{}", author),
                None => vars.get("name").unwrap_or_default().to_string(),
            };
            format!("* {} by {}", vars.get("message").unwrap_or_default(), who)
        });

        let commit = CommitItem::new("fix crash", "https://x/1", "Alice B");
        assert_eq!(
            TemplateFormatter::new().render_commit(&commit, &config),
            "* fix crash by Alice B"
        );
    }

    #[test]
    fn test_issue() {
        let issue = IssueItem::new(812, "Add portmap support", "https://x/812")
            .with_user("bob", "https://x/bob");
        assert_eq!(
            TemplateFormatter::new().render_issue(&issue, &example_config()),
            "- Add portmap support ([#812](https://x/812), [@bob](https://x/bob))"
        );
    }

    #[test]
    fn test_issue_labels_skip_ignored() {
        let mut config = example_config();
        config.template.issue = Template::text("{{labels}}{{name}}");
        config.template.label = Template::text("[{{label}}] ");

        let issue = IssueItem::new(1, "Tidy", "u")
            .with_label("area/ux")
            .with_label("kind/cleanup");
        assert_eq!(
            TemplateFormatter::new().render_issue(&issue, &config),
            "[area/ux] Tidy"
        );
    }

    #[test]
    fn test_format_release() {
        let config = example_config();
        let mut entry = ReleaseEntry::new("v0.10.0", "v0.10.0", release_date());
        let mut section = Section::new("Bug Fixes");
        section.add_item(
            IssueItem::new(7, "Fix DHCP leak", "https://x/7").with_user("carol", "https://x/carol"),
        );
        entry.sections.push(section);

        let output = TemplateFormatter::new().format(
            &Changelog {
                releases: vec![entry],
            },
            &config,
        )
        .unwrap();

        assert_eq!(
            output,
            "## v0.10.0\n\n**Released:** 03/06/2021\n\n\n### Bug Fixes\n- Fix DHCP leak ([#7](https://x/7), [@carol](https://x/carol))\n"
        );
    }

    #[test]
    fn test_format_separates_releases() {
        let mut config = example_config();
        config.template.changelog_title = Template::text("# Changelog\n\n");
        config.template.release = Template::text("## {{release}}\n{{body}}");

        let mut first = ReleaseEntry::new("v2", "v2", release_date());
        first.commits.push(CommitItem::new("b", "u2", "B"));
        let mut second = ReleaseEntry::new("v1", "v1", release_date());
        second.commits.push(CommitItem::new("a", "u1", "A"));

        let output = TemplateFormatter::new().format(
            &Changelog {
                releases: vec![first, second],
            },
            &config,
        )
        .unwrap();

        assert!(output.starts_with("# Changelog\n\n## v2\n- [b](u2) - B"));
        assert!(output.contains("\n\n---\n\n## v1\n- [a](u1) - A"));
    }

    #[test]
    fn test_format_date_fallback() {
        assert_eq!(format_date(&release_date(), "%Y-%m-%d"), "2021-06-03");
        assert_eq!(format_date(&release_date(), "%Q"), "03/06/2021");
    }
}
