//! Core types for tagline

use serde::{Deserialize, Serialize};

use crate::error::ChangelogError;

/// Changelog category a commit is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    /// New functionality
    Added,
    /// Changes to existing functionality
    Changed,
    /// Soon-to-be removed functionality
    Deprecated,
    /// Removed functionality
    Removed,
    /// Bug fixes
    Fixed,
    /// Vulnerability fixes
    Security,
}

impl ChangeCategory {
    /// All categories in changelog display order
    pub const ALL: [ChangeCategory; 6] = [
        Self::Added,
        Self::Changed,
        Self::Deprecated,
        Self::Removed,
        Self::Fixed,
        Self::Security,
    ];

    /// Map a conventional commit type token onto a category.
    ///
    /// Unknown tokens fall back to [`ChangeCategory::Changed`].
    pub fn from_commit_type(commit_type: &str) -> Self {
        match commit_type {
            "feat" | "feature" => Self::Added,
            "fix" => Self::Fixed,
            "revert" => Self::Removed,
            "deprecate" => Self::Deprecated,
            "security" => Self::Security,
            _ => Self::Changed,
        }
    }

    /// Returns the string representation of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::Deprecated => "deprecated",
            Self::Removed => "removed",
            Self::Fixed => "fixed",
            Self::Security => "security",
        }
    }

    /// Section title used by Keep a Changelog
    pub fn title(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deprecated => "Deprecated",
            Self::Removed => "Removed",
            Self::Fixed => "Fixed",
            Self::Security => "Security",
        }
    }
}

impl std::fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output layout of a rendered changelog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangelogFormat {
    /// https://keepachangelog.com layout
    #[default]
    KeepAChangelog,
    /// conventional-changelog Angular preset layout
    Angular,
}

impl ChangelogFormat {
    /// Every supported format, default first
    pub const ALL: [ChangelogFormat; 2] = [Self::KeepAChangelog, Self::Angular];

    /// Returns the configuration name of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeepAChangelog => "keep-a-changelog",
            Self::Angular => "angular",
        }
    }

    /// Names of all supported formats
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.as_str()).collect()
    }
}

impl std::fmt::Display for ChangelogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChangelogFormat {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ChangelogError::UnsupportedFormat {
                format: s.to_string(),
                supported: Self::names(),
            })
    }
}

/// A classified changelog entry derived from one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogEntry {
    /// Changelog category
    #[serde(rename = "type")]
    pub category: ChangeCategory,
    /// Rendered description, including scope and breaking prefixes
    pub description: String,
    /// Scope from the commit header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Commit type token as written in the header
    pub original_type: String,
    /// Issues closed by the commit; never an empty list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_ids: Option<Vec<String>>,
    /// Set by `BREAKING CHANGE:` footers or the `!` header shorthand
    #[serde(skip)]
    pub breaking: bool,
}

impl ChangelogEntry {
    /// Marker prepended to breaking-change descriptions
    pub const BREAKING_MARKER: &'static str = "**BREAKING** ";

    /// Whether the commit was marked as a breaking change
    pub fn is_breaking(&self) -> bool {
        self.breaking
    }
}
