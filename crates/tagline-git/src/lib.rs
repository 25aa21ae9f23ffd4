//! Tagline Git - Git operations for release management
//!
//! This crate reads commit history through the `git` binary and inspects
//! tags and remotes through libgit2.

mod history;
mod remote;
mod repository;
mod tags;
pub mod types;

pub use history::{
    split_commit_blocks, HistoryProvider, RevisionSource, SystemGitHistory, COMMIT_DELIMITER,
};
pub use remote::repo_url_from_remote;
pub use repository::{GitRepo, Result};
pub use types::{RawCommitBlock, RevisionRange, TagInfo};
