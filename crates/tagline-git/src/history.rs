//! Commit history retrieval
//!
//! History is read by running `git log` and splitting its output on a
//! sentinel line. [`RevisionSource`] wraps any [`HistoryProvider`] and turns
//! retrieval failures into an empty history.

use std::path::PathBuf;
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::repository::Result;
use crate::types::{RawCommitBlock, RevisionRange};
use tagline_core::error::GitError;

/// Line written by `git log` after every commit message
pub const COMMIT_DELIMITER: &str = "==tagline-commit-end-7f3a9c1e==";

/// Supplies raw `git log` style text for a path and revision range
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Commit messages touching `pathspec` in `range`, newest first, each
    /// followed by a [`COMMIT_DELIMITER`] line
    async fn log(&self, pathspec: &str, range: &RevisionRange) -> Result<String>;
}

/// History provider backed by the `git` binary
#[derive(Debug, Clone)]
pub struct SystemGitHistory {
    repo_path: PathBuf,
}

impl SystemGitHistory {
    /// Read history of the repository at `repo_path`
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

}

#[async_trait]
impl HistoryProvider for SystemGitHistory {
    #[instrument(skip(self, range), fields(repo = %self.repo_path.display(), range = %range))]
    async fn log(&self, pathspec: &str, range: &RevisionRange) -> Result<String> {
        let start = Instant::now();
        let format = format!("--format=%B%n{}", COMMIT_DELIMITER);
        let rev = range.to_rev_arg();

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_path)
            .args(["-c", "core.quotePath=false", "log", &format, &rev, "--", pathspec])
            .output()
            .await
            .map_err(GitError::Spawn)?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("log {} -- {}", rev, pathspec),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!(
            duration_ms = start.elapsed().as_millis(),
            bytes = output.stdout.len(),
            "git log finished"
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Split delimited `git log` output into commit blocks.
///
/// Blocks are trimmed; empty blocks are dropped.
pub fn split_commit_blocks(raw: &str) -> Vec<RawCommitBlock> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in raw.lines() {
        if line.trim_end() == COMMIT_DELIMITER {
            push_block(&mut blocks, &current);
            current.clear();
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    push_block(&mut blocks, &current);

    blocks
}

fn push_block(blocks: &mut Vec<RawCommitBlock>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        blocks.push(RawCommitBlock::new(text));
    }
}

/// Fail-open source of commit messages for a package
pub struct RevisionSource<H> {
    provider: H,
}

impl<H: HistoryProvider> RevisionSource<H> {
    /// Create a source over a history provider
    pub fn new(provider: H) -> Self {
        Self { provider }
    }

    /// Commit messages for `pathspec` in `(from, to]`, newest first.
    ///
    /// Errors are returned to the caller.
    pub async fn try_get_commits(
        &self,
        pathspec: &str,
        range: &RevisionRange,
    ) -> Result<Vec<RawCommitBlock>> {
        let raw = self.provider.log(pathspec, range).await?;
        Ok(split_commit_blocks(&raw))
    }

    /// Commit messages for `pathspec` in `(from, to]`, newest first.
    ///
    /// Without `from` the whole history of the path up to `to` is returned;
    /// `to` defaults to `HEAD`. Any failure is logged and yields an empty
    /// history.
    #[instrument(skip(self))]
    pub async fn get_commits(
        &self,
        pathspec: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Vec<RawCommitBlock> {
        let range = RevisionRange::new(from, to);
        match self.try_get_commits(pathspec, &range).await {
            Ok(commits) => {
                info!(pathspec, range = %range, commit_count = commits.len(), "read commit history");
                commits
            }
            Err(e) => {
                warn!(pathspec, range = %range, error = %e, "failed to read commit history, continuing without commits");
                Vec::new()
            }
        }
    }
}
