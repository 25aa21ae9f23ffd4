//! Git types

use serde::{Deserialize, Serialize};

/// The full message (subject and body) of one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawCommitBlock(String);

impl RawCommitBlock {
    /// Wrap a commit message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The message text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First line of the message
    pub fn subject(&self) -> &str {
        self.0.lines().next().unwrap_or_default()
    }
}

impl From<&str> for RawCommitBlock {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for RawCommitBlock {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// Revisions a history query covers: everything reachable from `to` and not
/// from `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRange {
    /// Exclusive lower bound (usually the previous release tag)
    pub from: Option<String>,
    /// Inclusive upper bound
    pub to: String,
}

impl RevisionRange {
    /// Revision used when no upper bound is given
    pub const DEFAULT_TO: &'static str = "HEAD";

    /// Create a range, defaulting `to` to `HEAD`
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: from.map(str::to_string),
            to: to.unwrap_or(Self::DEFAULT_TO).to_string(),
        }
    }

    /// Revision argument understood by `git log`
    pub fn to_rev_arg(&self) -> String {
        match &self.from {
            Some(from) => format!("{}..{}", from, self.to),
            None => self.to.clone(),
        }
    }
}

impl std::fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rev_arg())
    }
}

/// Information about a git tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Extracted version from tag name
    pub version: Option<String>,
}

impl TagInfo {
    /// Create a new TagInfo, parsing the version from the name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let version = extract_version(&name);
        Self { name, version }
    }
}

/// Extract version from a tag name
pub(crate) fn extract_version(tag: &str) -> Option<String> {
    // v1.0.0, 1.0.0, package@1.0.0, package-v1.0.0
    let tag = tag.strip_prefix('v').unwrap_or(tag);

    if let Some(pos) = tag.rfind('@') {
        let version_part = &tag[pos + 1..];
        let version = version_part.strip_prefix('v').unwrap_or(version_part);
        if looks_like_version(version) {
            return Some(version.to_string());
        }
    }

    if let Some(pos) = tag.rfind("-v") {
        let version = &tag[pos + 2..];
        if looks_like_version(version) {
            return Some(version.to_string());
        }
    }

    if looks_like_version(tag) {
        return Some(tag.to_string());
    }

    None
}

/// Check if a string looks like a semantic version
fn looks_like_version(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() < 2 {
        return false;
    }

    parts[0].parse::<u64>().is_ok()
}
