//! Formatter registry

use std::sync::Arc;

use tracing::debug;

use super::{AngularFormatter, ChangelogFormatter, KeepAChangelogFormatter, ReleaseContext};
use crate::aggregate::GroupedEntries;
use tagline_core::error::ChangelogError;
use tagline_core::types::ChangelogFormat;

/// Registry of available changelog formatters
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn ChangelogFormatter>>,
}

impl FormatterRegistry {
    /// Create a new registry with all built-in formatters
    pub fn new() -> Self {
        Self {
            formatters: vec![
                Arc::new(KeepAChangelogFormatter::new()),
                Arc::new(AngularFormatter::new()),
            ],
        }
    }

    /// Get the formatter for a format
    pub fn get_format(&self, format: ChangelogFormat) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters
            .iter()
            .find(|f| f.changelog_format() == format)
            .cloned()
    }

    /// Get formatter by format name.
    ///
    /// Unknown names fail with [`ChangelogError::UnsupportedFormat`] listing
    /// the registered names.
    pub fn get(&self, name: &str) -> Result<Arc<dyn ChangelogFormatter>, ChangelogError> {
        let unsupported = || ChangelogError::UnsupportedFormat {
            format: name.to_string(),
            supported: self.names(),
        };

        let format: ChangelogFormat = name.parse().map_err(|_| unsupported())?;
        self.get_format(format).ok_or_else(unsupported)
    }

    /// Render a release section with the formatter registered for `format`
    pub fn render(
        &self,
        format: ChangelogFormat,
        release: &ReleaseContext,
        entries: &GroupedEntries,
    ) -> Result<String, ChangelogError> {
        let formatter = self
            .get_format(format)
            .ok_or_else(|| ChangelogError::UnsupportedFormat {
                format: format.to_string(),
                supported: self.names(),
            })?;

        debug!(%format, version = %release.version, "rendering release section");
        Ok(formatter.format(release, entries))
    }

    /// Get all registered formatters
    pub fn all(&self) -> &[Arc<dyn ChangelogFormatter>] {
        &self.formatters
    }

    /// Names of all registered formats
    pub fn names(&self) -> Vec<&'static str> {
        self.formatters
            .iter()
            .map(|f| f.changelog_format().as_str())
            .collect()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::parser::classify;

    #[test]
    fn test_registry_creation() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.all().len(), 2);
        assert_eq!(registry.names(), vec!["keep-a-changelog", "angular"]);
    }

    #[test]
    fn test_get_by_name() {
        let registry = FormatterRegistry::new();
        assert_eq!(
            registry.get("angular").unwrap().changelog_format(),
            ChangelogFormat::Angular
        );
        assert_eq!(
            registry.get("keep-a-changelog").unwrap().changelog_format(),
            ChangelogFormat::KeepAChangelog
        );
    }

    #[test]
    fn test_unknown_format_names_supported_set() {
        let registry = FormatterRegistry::new();
        let err = registry.get("gitmoji").err().unwrap();

        assert!(matches!(err, ChangelogError::UnsupportedFormat { .. }));
        let message = err.to_string();
        assert!(message.contains("gitmoji"));
        assert!(message.contains("keep-a-changelog"));
        assert!(message.contains("angular"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let registry = FormatterRegistry::new();
        let entries = aggregate(
            ["feat(core): add widget support", "fix!: drop legacy API", "docs: typo"]
                .iter()
                .filter_map(|m| classify(m)),
        );
        let release = ReleaseContext::new("1.0.0", "2023-01-15")
            .with_package_name("core")
            .with_repo_url("https://github.com/u/r");

        for format in ChangelogFormat::ALL {
            let first = registry.render(format, &release, &entries).unwrap();
            let second = registry.render(format, &release, &entries).unwrap();
            assert_eq!(first, second, "{format}");
        }
    }

    #[test]
    fn test_one_line_per_entry() {
        let registry = FormatterRegistry::new();
        let messages = [
            "feat: a",
            "fix: b",
            "chore: release 1.0.0",
            "not conventional",
            "revert: c",
        ];
        let entries = aggregate(messages.iter().filter_map(|m| classify(m)));
        let release = ReleaseContext::new("1.0.0", "2023-01-15");

        let keep = registry
            .render(ChangelogFormat::KeepAChangelog, &release, &entries)
            .unwrap();
        assert_eq!(keep.lines().filter(|l| l.starts_with("- ")).count(), 3);

        let angular = registry
            .render(ChangelogFormat::Angular, &release, &entries)
            .unwrap();
        assert_eq!(angular.lines().filter(|l| l.starts_with("* ")).count(), 3);
    }
}
