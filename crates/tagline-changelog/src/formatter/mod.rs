//! Changelog formatters

mod angular;
mod keep_a_changelog;
mod registry;

pub use angular::AngularFormatter;
pub use keep_a_changelog::KeepAChangelogFormatter;
pub use registry::FormatterRegistry;

use tagline_core::types::ChangelogFormat;

use crate::aggregate::GroupedEntries;

/// Release metadata a changelog section is rendered for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    /// Version being released
    pub version: String,
    /// Release date, already formatted (e.g. `2023-01-15`)
    pub date: String,
    /// Package name, for monorepo packages
    pub package_name: Option<String>,
    /// Repository URL for links
    pub repo_url: Option<String>,
}

impl ReleaseContext {
    /// Version heading for changes not yet tagged
    pub const UNRELEASED: &'static str = "Unreleased";

    /// Create a context for a version and date
    pub fn new(version: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: date.into(),
            package_name: None,
            repo_url: None,
        }
    }

    /// Set the package name
    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    /// Whether this section collects untagged changes
    pub fn is_unreleased(&self) -> bool {
        self.version == Self::UNRELEASED
    }

    /// Set repository URL for links
    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }
}

/// Trait for changelog formatters.
///
/// Implementations must be pure: the same context and entries always render
/// to the same text.
pub trait ChangelogFormatter: Send + Sync {
    /// Format a release section
    fn format(&self, release: &ReleaseContext, entries: &GroupedEntries) -> String;

    /// Format this formatter renders
    fn changelog_format(&self) -> ChangelogFormat;
}
