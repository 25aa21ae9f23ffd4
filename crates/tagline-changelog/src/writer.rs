//! Changelog file updates

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::templates::header_for;
use tagline_core::error::ChangelogError;
use tagline_core::types::ChangelogFormat;

const RELEASE_HEADING: &str = "## ";

/// Result of a changelog update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogUpdate {
    /// Changelog file
    pub path: PathBuf,
    /// Whether the file did not exist before
    pub created: bool,
    /// Whether the file was written (false on dry runs)
    pub written: bool,
    /// Full file contents after the update
    #[serde(skip)]
    pub contents: String,
}

/// Writes rendered release sections into changelog files
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangelogWriter {
    dry_run: bool,
}

impl ChangelogWriter {
    /// Create a writer that touches the filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer that only computes the new contents
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Add a rendered release section to the changelog at `path`.
    ///
    /// A new file gets the format's header followed by the section. An
    /// existing file gets the section inserted above its newest release, or
    /// appended when it has none.
    #[instrument(skip(self, rendered), fields(dry_run = self.dry_run))]
    pub fn update(
        &self,
        path: &Path,
        format: ChangelogFormat,
        rendered: &str,
    ) -> Result<ChangelogUpdate, ChangelogError> {
        let write_failed = |source| ChangelogError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let (created, contents) = if path.exists() {
            let existing = std::fs::read_to_string(path).map_err(write_failed)?;
            (false, insert_release(&existing, rendered))
        } else {
            (true, format!("{}{}", header_for(format), rendered))
        };

        if self.dry_run {
            debug!(path = %path.display(), created, "dry run, changelog not written");
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(write_failed)?;
            }
            std::fs::write(path, &contents).map_err(write_failed)?;
            info!(path = %path.display(), created, "changelog updated");
        }

        Ok(ChangelogUpdate {
            path: path.to_path_buf(),
            created,
            written: !self.dry_run,
            contents,
        })
    }
}

/// Insert `rendered` before the first release heading of `existing`
pub fn insert_release(existing: &str, rendered: &str) -> String {
    let section = as_block(rendered);

    let mut offset = 0;
    for line in existing.split_inclusive('\n') {
        if line.starts_with(RELEASE_HEADING) {
            return format!("{}{}{}", &existing[..offset], section, &existing[offset..]);
        }
        offset += line.len();
    }

    let mut contents = as_block(existing);
    if existing.trim().is_empty() {
        contents.clear();
    }
    contents.push_str(rendered);
    contents
}

/// Text terminated by a blank line
fn as_block(text: &str) -> String {
    let mut block = text.trim_end_matches('\n').to_string();
    block.push_str("\n\n");
    block
}
