//! Tag operations

use semver::Version;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Get all tags
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|_, name| {
            let name = String::from_utf8_lossy(name);
            tags.push(TagInfo::new(name.trim_start_matches("refs/tags/")));
            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Find the latest tag by semantic version.
    ///
    /// With a `prefix` only tags starting with it are considered and the
    /// version is whatever follows the prefix (an optional leading `v` is
    /// ignored).
    #[instrument(skip(self))]
    pub fn find_latest_tag(&self, prefix: Option<&str>) -> Result<Option<TagInfo>> {
        let mut versioned_tags: Vec<_> = self
            .tags()?
            .into_iter()
            .filter_map(|mut t| {
                let version = match prefix {
                    Some(prefix) => {
                        let rest = t.name.strip_prefix(prefix)?;
                        rest.strip_prefix('v').unwrap_or(rest).to_string()
                    }
                    None => t.version.clone()?,
                };
                let parsed = Version::parse(&version).ok()?;
                t.version = Some(version);
                Some((t, parsed))
            })
            .collect();

        versioned_tags.sort_by(|a, b| b.1.cmp(&a.1));

        let result = versioned_tags.into_iter().next().map(|(t, _)| t);
        debug!(latest = ?result.as_ref().map(|t| &t.name), "found latest tag");
        Ok(result)
    }
}
