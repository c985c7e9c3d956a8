//! Release-notes generation

use std::path::Path;
use std::sync::Arc;

use relnote_core::{ChangelogError, Config, DataSource, Result};
use tracing::{debug, info, instrument};

use crate::formatter::{ChangelogFormatter, TemplateFormatter};
use crate::grouping::{classify, Placement};
use crate::snapshot::Snapshot;
use crate::types::{Changelog, CommitItem, IssueItem, ReleaseEntry, ReleaseInput, Section};

/// Changelog generator
pub struct ChangelogGenerator {
    formatter: Arc<dyn ChangelogFormatter>,
    config: Config,
}

impl ChangelogGenerator {
    /// Create a new generator with the template formatter
    pub fn new(config: Config) -> Self {
        Self {
            formatter: Arc::new(TemplateFormatter::new()),
            config,
        }
    }

    /// Use a formatter shared with a registry
    pub fn with_shared_formatter(mut self, formatter: Arc<dyn ChangelogFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Build the grouped changelog from a snapshot
    #[instrument(skip(self, snapshot), fields(release_count = snapshot.releases.len(), data_source = %self.config.data_source))]
    pub fn generate(&self, snapshot: &Snapshot) -> Changelog {
        info!(release_count = snapshot.releases.len(), "generating release notes");

        let releases = match self.config.data_source {
            DataSource::Milestones => self.milestone_releases(snapshot),
            _ => snapshot.releases.clone(),
        };

        let mut changelog = Changelog::default();
        for release in &releases {
            if self.is_ignored_tag(&release.tag) {
                debug!(tag = %release.tag, "skipping ignored tag");
                continue;
            }

            let entry = self.build_entry(release);
            if entry.is_empty() {
                debug!(tag = %release.tag, "release has no entries");
                continue;
            }
            changelog.releases.push(entry);
        }

        debug!(
            release_count = changelog.releases.len(),
            "release notes built"
        );
        changelog
    }

    fn is_ignored_tag(&self, tag: &str) -> bool {
        self.config
            .ignore_tags_with
            .iter()
            .any(|pattern| !pattern.is_empty() && tag.contains(pattern.as_str()))
    }

    fn build_entry(&self, release: &ReleaseInput) -> ReleaseEntry {
        let name = format!("{}{}", self.config.prefix, release.tag);
        let mut entry = ReleaseEntry::new(name, release.tag.as_str(), release.date);

        match self.config.data_source {
            DataSource::Commits => entry.commits = self.select_commits(&release.commits),
            _ => {
                entry.sections =
                    self.group_issues(release.issues.iter().filter(|i| self.accepts_issue(i)))
            }
        }

        entry
    }

    fn accepts_issue(&self, issue: &IssueItem) -> bool {
        let kind_matches = match self.config.data_source {
            DataSource::Issues => !issue.pull_request,
            DataSource::Prs => issue.pull_request,
            DataSource::Milestones => true,
            DataSource::Commits => false,
        };
        kind_matches && (!self.config.only_milestones || issue.milestone.is_some())
    }

    fn select_commits(&self, commits: &[CommitItem]) -> Vec<CommitItem> {
        commits
            .iter()
            .filter(|c| self.config.include_messages.accepts(c.merge))
            .filter(|c| {
                !self
                    .config
                    .ignore_commits_with
                    .iter()
                    .any(|pattern| !pattern.is_empty() && c.message.contains(pattern.as_str()))
            })
            .cloned()
            .collect()
    }

    /// Group issues into sections: configured groups first, in order, then
    /// the `noLabel` section. Empty sections are dropped.
    pub fn group_issues<'a, I>(&self, issues: I) -> Vec<Section>
    where
        I: IntoIterator<Item = &'a IssueItem>,
    {
        let mut sections: Vec<Section> = self
            .config
            .group_by
            .groups()
            .iter()
            .map(|group| Section::new(group.heading.as_str()))
            .collect();
        let mut unlabelled = Vec::new();

        for issue in issues {
            match classify(issue.labels.as_slice(), &self.config) {
                Placement::Excluded => {
                    debug!(number = issue.number, "issue excluded by ignored label");
                }
                Placement::Group(heading) => {
                    section_mut(&mut sections, &heading).add_item(issue.clone());
                }
                Placement::NoLabel => unlabelled.push(issue.clone()),
            }
        }

        if !unlabelled.is_empty() {
            let heading = self.config.no_label_heading();
            section_mut(&mut sections, &heading).items.extend(unlabelled);
        }

        sections.retain(|section| !section.is_empty());
        sections
    }

    /// One release per milestone title, in first-seen order. A milestone
    /// spread over several snapshot releases takes the latest of their dates.
    fn milestone_releases(&self, snapshot: &Snapshot) -> Vec<ReleaseInput> {
        let mut releases: Vec<ReleaseInput> = Vec::new();

        for release in &snapshot.releases {
            for issue in &release.issues {
                let Some(milestone) = &issue.milestone else {
                    continue;
                };

                match releases.iter().position(|r| &r.tag == milestone) {
                    Some(index) => {
                        let grouped = &mut releases[index];
                        grouped.date = grouped.date.max(release.date);
                        grouped.issues.push(issue.clone());
                    }
                    None => {
                        let mut grouped = ReleaseInput::new(milestone.as_str(), release.date);
                        grouped.issues.push(issue.clone());
                        releases.push(grouped);
                    }
                }
            }
        }

        debug!(milestones = releases.len(), "issues regrouped by milestone");
        releases
    }

    /// Format a changelog to a document
    pub fn format(&self, changelog: &Changelog) -> Result<String> {
        self.formatter.format(changelog, &self.config)
    }

    /// Generate and format in one step
    #[instrument(skip(self, snapshot), fields(release_count = snapshot.releases.len()))]
    pub fn generate_formatted(&self, snapshot: &Snapshot) -> Result<String> {
        let changelog = self.generate(snapshot);
        let output = self.format(&changelog)?;
        debug!(output_len = output.len(), "release notes formatted");
        Ok(output)
    }

    /// Write a formatted document, creating parent directories as needed.
    ///
    /// Nothing is written when formatting fails.
    pub fn write(&self, changelog: &Changelog, path: &Path) -> Result<()> {
        let output = self.format(changelog)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(ChangelogError::Io)?;
        }

        std::fs::write(path, output).map_err(|e| {
            ChangelogError::WriteFailed(format!("{}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), "release notes written");
        Ok(())
    }
}

fn section_mut<'s>(sections: &'s mut Vec<Section>, heading: &str) -> &'s mut Section {
    let index = match sections.iter().position(|s| s.heading == heading) {
        Some(index) => index,
        None => {
            sections.push(Section::new(heading));
            sections.len() - 1
        }
    };
    &mut sections[index]
}
