//! Structured output accumulator
//!
//! [`JsonOutput`] collects what a run did (changelogs rendered, versions
//! updated, tags and commit messages produced) so that it can be printed as a
//! single JSON document at the end of the invocation. The accumulator is an
//! explicit context object: create it, [`record`](JsonOutput::record) events
//! into it from any number of package pipelines, then
//! [`drain`](JsonOutput::drain) it once.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ChangelogEntry;

/// A manifest version update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionUpdate {
    /// Package name
    pub package_name: String,
    /// Version written to the manifest
    pub new_version: String,
    /// Manifest that was (or would be) written
    pub file_path: String,
}

/// Changelog data for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogData {
    /// Package name
    pub package_name: String,
    /// Version the changelog was rendered for
    pub version: String,
    /// Version of the previous release, if any
    pub previous_version: Option<String>,
    /// Revision range the commits were read from (e.g. `v1.0.0..HEAD`)
    pub revision_range: String,
    /// Repository URL used for links
    pub repo_url: Option<String>,
    /// Classified entries, in history order
    pub entries: Vec<ChangelogEntry>,
}

/// Final structured report of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputReport {
    /// Whether the run made no changes
    pub dry_run: bool,
    /// Manifest updates
    pub updates: Vec<VersionUpdate>,
    /// Rendered changelogs
    pub changelogs: Vec<ChangelogData>,
    /// Tags created
    pub tags: Vec<String>,
    /// Release commit message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
}

/// Something a pipeline wants reported
#[derive(Debug, Clone)]
pub enum OutputEvent {
    /// A manifest version update
    Update(VersionUpdate),
    /// A rendered changelog
    Changelog(ChangelogData),
    /// A created tag
    Tag(String),
    /// The release commit message
    CommitMessage(String),
}

/// Accumulator for JSON output mode.
///
/// While disabled every call is a no-op, so the report is never partially
/// populated.
#[derive(Debug, Default)]
pub struct JsonOutput {
    state: Mutex<Option<OutputReport>>,
}

impl JsonOutput {
    /// Create a disabled accumulator
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Create an enabled, empty accumulator
    pub fn enabled(dry_run: bool) -> Self {
        let output = Self::default();
        output.enable(dry_run);
        output
    }

    /// Enable output mode, discarding anything recorded before
    pub fn enable(&self, dry_run: bool) {
        *self.lock() = Some(OutputReport {
            dry_run,
            ..OutputReport::default()
        });
    }

    /// Whether output mode is active
    pub fn is_enabled(&self) -> bool {
        self.lock().is_some()
    }

    /// Record an event
    pub fn record(&self, event: OutputEvent) {
        let mut state = self.lock();
        let Some(report) = state.as_mut() else {
            return;
        };

        match event {
            OutputEvent::Update(update) => report.updates.push(update),
            OutputEvent::Changelog(data) => {
                debug!(package = %data.package_name, entries = data.entries.len(), "recorded changelog data");
                report.changelogs.push(data);
            }
            OutputEvent::Tag(tag) => report.tags.push(tag),
            OutputEvent::CommitMessage(message) => report.commit_message = Some(message),
        }
    }

    /// Record changelog data for a package
    pub fn add_changelog_data(&self, data: ChangelogData) {
        self.record(OutputEvent::Changelog(data));
    }

    /// Take the report, leaving the accumulator disabled.
    ///
    /// Returns `None` when output mode was not enabled.
    pub fn drain(&self) -> Option<OutputReport> {
        self.lock().take()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<OutputReport>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
