//! Conventional Commits classification
//!
//! Turns a commit message into a [`ChangelogEntry`]: the header is tokenized
//! by [`tokenize_header`], the type token is mapped onto a
//! [`ChangeCategory`], and the description is decorated with the scope and
//! breaking-change markers.

use tracing::trace;

use super::grammar::{tokenize_header, HeaderMatch};
use super::issues::extract_issue_ids;
use super::CommitParser;
use tagline_core::types::{ChangeCategory, ChangelogEntry};
use tagline_git::RawCommitBlock;

/// Footer marking a breaking change anywhere in the message
const BREAKING_FOOTER: &str = "BREAKING CHANGE:";

/// Header shorthand for a breaking change
const BREAKING_SHORTHAND: &str = "!:";

/// Parser for Conventional Commits format
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalParser;

impl ConventionalParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &RawCommitBlock) -> Option<ChangelogEntry> {
        classify(commit.as_str())
    }
}

/// Classify one commit message.
///
/// Returns `None` for messages whose first line is not a conventional commit
/// header and for release commits (`chore: release ...`).
pub fn classify(message: &str) -> Option<ChangelogEntry> {
    let header = message.lines().next()?.trim_end();

    let HeaderMatch::Matched {
        commit_type,
        scope,
        description,
        ..
    } = tokenize_header(header)
    else {
        return None;
    };

    if is_release_commit(commit_type, description) {
        trace!(header, "skipping release commit");
        return None;
    }

    let mut text = description.to_string();
    if let Some(scope) = scope {
        text = format!("**{}**: {}", scope, text);
    }
    let breaking = message.contains(BREAKING_FOOTER) || header.contains(BREAKING_SHORTHAND);
    if breaking {
        text = format!("{}{}", ChangelogEntry::BREAKING_MARKER, text);
    }

    let issue_ids = extract_issue_ids(message);

    Some(ChangelogEntry {
        category: ChangeCategory::from_commit_type(commit_type),
        description: text,
        scope: scope.map(str::to_string),
        original_type: commit_type.to_string(),
        issue_ids: (!issue_ids.is_empty()).then_some(issue_ids),
        breaking,
    })
}

/// `chore` commits whose description starts with the word "release"
fn is_release_commit(commit_type: &str, description: &str) -> bool {
    if commit_type != "chore" {
        return false;
    }

    description
        .strip_prefix("release")
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
}
