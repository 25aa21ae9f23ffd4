//! Angular (conventional-changelog) formatter

use tracing::{debug, instrument};

use super::{ChangelogFormatter, ReleaseContext};
use crate::aggregate::GroupedEntries;
use tagline_core::types::{ChangelogEntry, ChangelogFormat};

const BREAKING_TITLE: &str = "BREAKING CHANGES";

/// Subsections of an Angular release, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Features,
    BugFixes,
    Performance,
    Reverts,
    Deprecations,
    Security,
    Documentation,
    Styles,
    Refactoring,
    Tests,
    Build,
    Ci,
    Chores,
    Other,
}

impl Section {
    fn from_commit_type(commit_type: &str) -> Self {
        match commit_type {
            "feat" | "feature" => Self::Features,
            "fix" => Self::BugFixes,
            "perf" => Self::Performance,
            "revert" => Self::Reverts,
            "deprecate" => Self::Deprecations,
            "security" => Self::Security,
            "docs" => Self::Documentation,
            "style" => Self::Styles,
            "refactor" => Self::Refactoring,
            "test" => Self::Tests,
            "build" => Self::Build,
            "ci" => Self::Ci,
            "chore" => Self::Chores,
            _ => Self::Other,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Features => "Features",
            Self::BugFixes => "Bug Fixes",
            Self::Performance => "Performance Improvements",
            Self::Reverts => "Reverts",
            Self::Deprecations => "Deprecations",
            Self::Security => "Security",
            Self::Documentation => "Documentation",
            Self::Styles => "Styles",
            Self::Refactoring => "Code Refactoring",
            Self::Tests => "Tests",
            Self::Build => "Build System",
            Self::Ci => "Continuous Integration",
            Self::Chores => "Chores",
            Self::Other => "Other Changes",
        }
    }
}

/// Angular style formatter.
///
/// Breaking entries are listed once under `BREAKING CHANGES`; every other
/// entry goes to the subsection of its original commit type.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngularFormatter;

impl AngularFormatter {
    /// Create a new formatter
    pub fn new() -> Self {
        Self
    }

    fn format_entry(entry: &ChangelogEntry) -> String {
        let text = plain_description(entry);
        match &entry.scope {
            Some(scope) => format!("* **{}:** {}\n", scope, text),
            None => format!("* {}\n", text),
        }
    }
}

/// Description with the breaking and scope markers removed
fn plain_description(entry: &ChangelogEntry) -> &str {
    let mut text = entry.description.as_str();
    if entry.is_breaking() {
        text = text
            .strip_prefix(ChangelogEntry::BREAKING_MARKER)
            .unwrap_or(text);
    }

    match &entry.scope {
        Some(scope) => text
            .strip_prefix(&format!("**{}**: ", scope))
            .unwrap_or(text),
        None => text,
    }
}

impl ChangelogFormatter for AngularFormatter {
    #[instrument(skip_all, fields(version = %release.version, entries = entries.len()))]
    fn format(&self, release: &ReleaseContext, entries: &GroupedEntries) -> String {
        let mut output = String::new();

        match &release.package_name {
            Some(name) => output.push_str(&format!(
                "## [{}] ({}) ({})\n\n",
                release.version, name, release.date
            )),
            None => output.push_str(&format!("## [{}] ({})\n\n", release.version, release.date)),
        }

        let (breaking, regular): (Vec<&ChangelogEntry>, Vec<&ChangelogEntry>) =
            entries.in_history_order().partition(|e| e.is_breaking());

        if !breaking.is_empty() {
            output.push_str(&format!("### {}\n\n", BREAKING_TITLE));
            for entry in &breaking {
                output.push_str(&Self::format_entry(entry));
            }
            output.push('\n');
        }

        // Stable sort keeps history order inside a section
        let mut sectioned: Vec<(Section, &ChangelogEntry)> = regular
            .into_iter()
            .map(|e| (Section::from_commit_type(&e.original_type), e))
            .collect();
        sectioned.sort_by_key(|(section, _)| *section);

        let mut current = None;
        for (section, entry) in sectioned {
            if current != Some(section) {
                if current.is_some() {
                    output.push('\n');
                }
                output.push_str(&format!("### {}\n\n", section.title()));
                current = Some(section);
            }
            output.push_str(&Self::format_entry(entry));
        }
        if current.is_some() {
            output.push('\n');
        }

        debug!(
            breaking_count = breaking.len(),
            output_len = output.len(),
            "angular section formatted"
        );
        output
    }

    fn changelog_format(&self) -> ChangelogFormat {
        ChangelogFormat::Angular
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::parser::classify;

    fn classified(messages: &[&str]) -> GroupedEntries {
        aggregate(messages.iter().filter_map(|m| classify(m)))
    }

    #[test]
    fn test_header_with_package() {
        let release = ReleaseContext::new("2.0.0", "2024-05-02").with_package_name("core");
        let output = AngularFormatter::new().format(&release, &GroupedEntries::new());
        assert_eq!(output, "## [2.0.0] (core) (2024-05-02)\n\n");
    }

    #[test]
    fn test_header_without_package() {
        let release = ReleaseContext::new("2.0.0", "2024-05-02");
        let output = AngularFormatter::new().format(&release, &GroupedEntries::new());
        assert_eq!(output, "## [2.0.0] (2024-05-02)\n\n");
    }

    #[test]
    fn test_sections_follow_original_type() {
        let entries = classified(&[
            "perf: faster parsing",
            "feat(core): add widget support",
            "docs: update readme",
            "fix: handle empty input",
        ]);
        let release = ReleaseContext::new("1.1.0", "2024-01-01");

        let output = AngularFormatter::new().format(&release, &entries);

        assert_eq!(
            output,
            "## [1.1.0] (2024-01-01)\n\n\
             ### Features\n\n* **core:** add widget support\n\n\
             ### Bug Fixes\n\n* handle empty input\n\n\
             ### Performance Improvements\n\n* faster parsing\n\n\
             ### Documentation\n\n* update readme\n\n"
        );
    }

    #[test]
    fn test_breaking_changes_listed_first_and_once() {
        let entries = classified(&[
            "feat: new flag",
            "fix(api)!: drop legacy API",
            "refactor: rename module\n\nBREAKING CHANGE: import path changed",
        ]);
        let release = ReleaseContext::new("2.0.0", "2024-01-01");

        let output = AngularFormatter::new().format(&release, &entries);

        let breaking_at = output.find("### BREAKING CHANGES").unwrap();
        let features_at = output.find("### Features").unwrap();
        assert!(breaking_at < features_at);
        assert_eq!(output.matches("drop legacy API").count(), 1);
        assert!(output.contains("* **api:** drop legacy API\n"));
        assert!(output.contains("* rename module\n"));
        assert!(!output.contains("**BREAKING**"));
        assert!(!output.contains("### Code Refactoring"));
    }

    #[test]
    fn test_breaking_changes_keep_history_order_across_categories() {
        let entries = classified(&["fix!: newer break", "feat!: older break"]);
        let output =
            AngularFormatter::new().format(&ReleaseContext::new("3.0.0", "d"), &entries);

        assert!(output.contains("### BREAKING CHANGES\n\n* newer break\n* older break\n"));
    }

    #[test]
    fn test_marker_lookalike_stays_in_its_section() {
        let entries = classified(&["docs: **BREAKING** label explained"]);
        let output =
            AngularFormatter::new().format(&ReleaseContext::new("1.0.1", "d"), &entries);

        assert!(!output.contains("### BREAKING CHANGES"));
        assert!(output.contains("### Documentation\n\n* **BREAKING** label explained\n"));
    }

    #[test]
    fn test_one_line_per_entry_in_history_order() {
        let entries = classified(&["feat: one", "feat: two", "feat: three", "wip: misc"]);
        let output =
            AngularFormatter::new().format(&ReleaseContext::new("1.0.0", "d"), &entries);

        let lines: Vec<_> = output.lines().filter(|l| l.starts_with("* ")).collect();
        assert_eq!(lines, vec!["* one", "* two", "* three", "* misc"]);
        assert!(output.contains("### Other Changes"));
    }
}
