//! Keep a Changelog formatter
//!
//! https://keepachangelog.com/en/1.0.0/

use tracing::{debug, instrument};

use super::{ChangelogFormatter, ReleaseContext};
use crate::aggregate::GroupedEntries;
use tagline_core::types::ChangelogFormat;

/// Keep a Changelog formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAChangelogFormatter;

impl KeepAChangelogFormatter {
    /// Create a new formatter
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogFormatter for KeepAChangelogFormatter {
    #[instrument(skip_all, fields(version = %release.version, entries = entries.len()))]
    fn format(&self, release: &ReleaseContext, entries: &GroupedEntries) -> String {
        let mut output = String::new();

        output.push_str(&format!("## [{}] - {}\n\n", release.version, release.date));

        for (category, items) in entries.iter() {
            output.push_str(&format!("### {}\n\n", category.title()));
            for entry in items {
                output.push_str(&format!("- {}\n", entry.description));
            }
            output.push('\n');
        }

        // No compare target exists before the version is tagged
        if let Some(repo_url) = release.repo_url.as_ref().filter(|_| !release.is_unreleased()) {
            output.push_str(&format!(
                "[{version}]: {}/compare/v{version}...HEAD\n",
                repo_url.trim_end_matches('/'),
                version = release.version
            ));
        }

        debug!(output_len = output.len(), "keep-a-changelog section formatted");
        output
    }

    fn changelog_format(&self) -> ChangelogFormat {
        ChangelogFormat::KeepAChangelog
    }
}
