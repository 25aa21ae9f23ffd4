//! Per-package changelog pipeline
//!
//! One run reads the package history, classifies each commit, groups the
//! entries and renders a release section. The result is also recorded into
//! the run's [`JsonOutput`].

use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::aggregate::{aggregate, GroupedEntries};
use crate::formatter::{FormatterRegistry, ReleaseContext};
use crate::parser::{CommitParser, ConventionalParser};
use tagline_core::error::ChangelogError;
use tagline_core::output::{ChangelogData, JsonOutput};
use tagline_core::types::{ChangelogEntry, ChangelogFormat};
use tagline_git::{HistoryProvider, RawCommitBlock, RevisionRange, RevisionSource};

/// What to generate a changelog section for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRelease {
    /// Package name
    pub package_name: String,
    /// Path the history is restricted to (`.` for the whole repository)
    pub pathspec: String,
    /// Version being released
    pub version: String,
    /// Version of the previous release
    pub previous_version: Option<String>,
    /// Exclusive start of the range, usually the previous release tag
    pub from: Option<String>,
    /// Inclusive end of the range, `HEAD` when absent
    pub to: Option<String>,
    /// Release date, already formatted
    pub date: String,
    /// Repository URL for links
    pub repo_url: Option<String>,
    /// Package name shown in the release heading
    pub display_name: Option<String>,
    /// Output format
    pub format: ChangelogFormat,
}

impl PackageRelease {
    /// Release of `package_name` at `version`, covering the whole history of
    /// the repository
    pub fn new(
        package_name: impl Into<String>,
        version: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            pathspec: ".".to_string(),
            version: version.into(),
            previous_version: None,
            from: None,
            to: None,
            date: date.into(),
            repo_url: None,
            display_name: None,
            format: ChangelogFormat::default(),
        }
    }

    /// Range of history this release covers
    pub fn range(&self) -> RevisionRange {
        RevisionRange::new(self.from.as_deref(), self.to.as_deref())
    }

    fn context(&self) -> ReleaseContext {
        ReleaseContext {
            version: self.version.clone(),
            date: self.date.clone(),
            package_name: self.display_name.clone(),
            repo_url: self.repo_url.clone(),
        }
    }
}

/// Generated changelog section for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageChangelog {
    /// Package name
    pub package_name: String,
    /// Version the section was rendered for
    pub version: String,
    /// Output format
    pub format: ChangelogFormat,
    /// Rendered release section
    pub rendered: String,
    /// Classified entries, in history order
    pub entries: Vec<ChangelogEntry>,
}

/// Changelog generator
pub struct ChangelogGenerator {
    parser: Box<dyn CommitParser>,
    formatters: FormatterRegistry,
}

impl ChangelogGenerator {
    /// Create a new generator with the conventional parser and built-in
    /// formatters
    pub fn new() -> Self {
        Self {
            parser: Box::new(ConventionalParser::new()),
            formatters: FormatterRegistry::new(),
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Formatters available to this generator
    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Classify commits, dropping those that are not changelog entries
    pub fn classify_all(&self, commits: &[RawCommitBlock]) -> Vec<ChangelogEntry> {
        commits.iter().filter_map(|c| self.parser.parse(c)).collect()
    }

    /// Render classified entries as a release section
    pub fn render(
        &self,
        release: &PackageRelease,
        entries: &[ChangelogEntry],
    ) -> Result<String, ChangelogError> {
        let grouped: GroupedEntries = aggregate(entries.iter().cloned());
        self.formatters
            .render(release.format, &release.context(), &grouped)
    }

    /// Generate the release section for one package.
    ///
    /// History retrieval failures yield an empty section. The generated data
    /// is recorded into `output`.
    #[instrument(skip_all, fields(package = %release.package_name, version = %release.version))]
    pub async fn generate<H: HistoryProvider>(
        &self,
        source: &RevisionSource<H>,
        release: &PackageRelease,
        output: &JsonOutput,
    ) -> Result<PackageChangelog, ChangelogError> {
        let start = Instant::now();

        let commits = source
            .get_commits(
                &release.pathspec,
                release.from.as_deref(),
                release.to.as_deref(),
            )
            .await;
        let entries = self.classify_all(&commits);
        debug!(
            commit_count = commits.len(),
            entry_count = entries.len(),
            "commits classified"
        );

        let rendered = self.render(release, &entries)?;

        output.add_changelog_data(ChangelogData {
            package_name: release.package_name.clone(),
            version: release.version.clone(),
            previous_version: release.previous_version.clone(),
            revision_range: release.range().to_string(),
            repo_url: release.repo_url.clone(),
            entries: entries.clone(),
        });

        info!(
            entry_count = entries.len(),
            duration_ms = start.elapsed().as_millis(),
            "changelog generated"
        );

        Ok(PackageChangelog {
            package_name: release.package_name.clone(),
            version: release.version.clone(),
            format: release.format,
            rendered,
            entries,
        })
    }
}

impl Default for ChangelogGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tagline_core::error::GitError;
    use tagline_core::types::ChangeCategory;
    use tagline_git::COMMIT_DELIMITER;

    struct StaticHistory(Option<Vec<&'static str>>);

    #[async_trait]
    impl HistoryProvider for StaticHistory {
        async fn log(&self, _pathspec: &str, _range: &RevisionRange) -> tagline_git::Result<String> {
            match &self.0 {
                Some(messages) => Ok(messages
                    .iter()
                    .map(|m| format!("{}\n{}\n", m, COMMIT_DELIMITER))
                    .collect()),
                None => Err(GitError::CommandFailed {
                    command: "log".to_string(),
                    stderr: "fatal: not a git repository".to_string(),
                }),
            }
        }
    }

    fn release() -> PackageRelease {
        let mut release = PackageRelease::new("core", "1.0.0", "2023-01-15");
        release.pathspec = "packages/core".to_string();
        release.from = Some("core@0.9.0".to_string());
        release.previous_version = Some("0.9.0".to_string());
        release.repo_url = Some("https://github.com/u/r".to_string());
        release
    }

    #[tokio::test]
    async fn test_generate_keep_a_changelog() {
        let source = RevisionSource::new(StaticHistory(Some(vec![
            "fix: handle empty input\n\nCloses #12",
            "chore: release 0.9.0",
            "feat(core): add widget support",
            "Merge branch 'main'",
        ])));
        let output = JsonOutput::disabled();

        let changelog = ChangelogGenerator::new()
            .generate(&source, &release(), &output)
            .await
            .unwrap();

        assert_eq!(changelog.entries.len(), 2);
        assert_eq!(changelog.entries[0].category, ChangeCategory::Fixed);
        assert!(changelog.rendered.contains("## [1.0.0] - 2023-01-15"));
        assert!(changelog.rendered.contains("### Added"));
        assert!(changelog.rendered.contains("### Fixed"));
        assert!(changelog
            .rendered
            .contains("[1.0.0]: https://github.com/u/r/compare/v1.0.0...HEAD"));
        assert!(output.drain().is_none());
    }

    #[tokio::test]
    async fn test_generate_records_json_data() {
        let source = RevisionSource::new(StaticHistory(Some(vec![
            "feat(core): add widget support",
            "fix: resolve bug, closes #12 and fixes #34",
        ])));
        let output = JsonOutput::enabled(false);

        ChangelogGenerator::new()
            .generate(&source, &release(), &output)
            .await
            .unwrap();

        let report = output.drain().unwrap();
        assert_eq!(report.changelogs.len(), 1);
        let data = &report.changelogs[0];
        assert_eq!(data.package_name, "core");
        assert_eq!(data.previous_version.as_deref(), Some("0.9.0"));
        assert_eq!(data.revision_range, "core@0.9.0..HEAD");
        assert_eq!(
            data.entries[1].issue_ids,
            Some(vec!["#12".to_string(), "#34".to_string()])
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["changelogs"][0]["entries"][0]["type"], "added");
        assert_eq!(json["changelogs"][0]["entries"][0]["originalType"], "feat");
    }

    #[tokio::test]
    async fn test_generate_with_failed_history_is_empty() {
        let source = RevisionSource::new(StaticHistory(None));
        let output = JsonOutput::enabled(true);

        let changelog = ChangelogGenerator::new()
            .generate(&source, &release(), &output)
            .await
            .unwrap();

        assert!(changelog.entries.is_empty());
        assert!(!changelog.rendered.contains("###"));
        assert!(output.drain().unwrap().changelogs[0].entries.is_empty());
    }

    #[tokio::test]
    async fn test_generate_angular() {
        let source = RevisionSource::new(StaticHistory(Some(vec![
            "feat(core)!: new widget API",
            "fix: typo",
        ])));
        let mut release = release();
        release.format = ChangelogFormat::Angular;
        release.display_name = Some("core".to_string());

        let changelog = ChangelogGenerator::new()
            .generate(&source, &release, &JsonOutput::disabled())
            .await
            .unwrap();

        assert!(changelog
            .rendered
            .starts_with("## [1.0.0] (core) (2023-01-15)\n\n### BREAKING CHANGES\n\n"));
        assert!(changelog.rendered.contains("* **core:** new widget API\n"));
        assert!(changelog.rendered.contains("### Bug Fixes\n\n* typo\n"));
    }

    #[test]
    fn test_classify_all_keeps_history_order() {
        let commits: Vec<RawCommitBlock> = ["feat: a", "nope", "feat: b", "fix: c"]
            .into_iter()
            .map(RawCommitBlock::from)
            .collect();

        let entries = ChangelogGenerator::new().classify_all(&commits);
        let descriptions: Vec<_> = entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["a", "b", "c"]);
    }
}
