//! Label-based group assignment

use relnote_core::{Config, GroupBy};

/// Where an item ends up in the release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Carries an ignored label; never rendered
    Excluded,
    /// Belongs under this group heading
    Group(String),
    /// Matches no group; goes under the `noLabel` heading
    NoLabel,
}

/// Assign an item with the given labels to a group.
///
/// An ignored label excludes the item whatever else it carries. Otherwise
/// the first group in configuration order whose labels intersect wins.
pub fn classify<S: AsRef<str>>(labels: &[S], config: &Config) -> Placement {
    if labels
        .iter()
        .any(|label| config.is_ignored_label(label.as_ref()))
    {
        return Placement::Excluded;
    }

    match &config.group_by {
        GroupBy::Label => labels
            .first()
            .map(|label| Placement::Group(label.as_ref().to_string()))
            .unwrap_or(Placement::NoLabel),
        group_by => group_by
            .first_match(labels)
            .map(|group| Placement::Group(group.heading.clone()))
            .unwrap_or(Placement::NoLabel),
    }
}
