//! Commit parsing

mod conventional;
mod grammar;
mod issues;

pub use conventional::{classify, ConventionalParser};
pub use grammar::{tokenize_header, HeaderMatch};
pub use issues::extract_issue_ids;

use tagline_core::types::ChangelogEntry;
use tagline_git::RawCommitBlock;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Classify one commit message, or discard it with `None`
    fn parse(&self, commit: &RawCommitBlock) -> Option<ChangelogEntry>;
}
