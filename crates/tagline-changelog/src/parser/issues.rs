//! Issue reference extraction

use regex::Regex;
use std::sync::LazyLock;

/// Closing keyword, optional colon, whitespace, `#<digits>`
static ISSUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:close|closes|closed|fix|fixes|fixed|resolve|resolves|resolved):?\s+#(?P<id>\d+)",
    )
    .expect("Invalid regex")
});

/// Issues a commit message closes, as `#<number>`, in order of appearance.
///
/// Repeated references are kept.
pub fn extract_issue_ids(message: &str) -> Vec<String> {
    ISSUE_REGEX
        .captures_iter(message)
        .filter_map(|caps| caps.name("id"))
        .map(|id| format!("#{}", id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_order() {
        assert_eq!(
            extract_issue_ids("fix: resolve bug, closes #12 and fixes #34"),
            vec!["#12".to_string(), "#34".to_string()]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive_and_accept_colon() {
        let message = "feat: thing\n\nCloses: #1\nRESOLVED #2\nFixed:\t#3";
        assert_eq!(extract_issue_ids(message), vec!["#1", "#2", "#3"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(
            extract_issue_ids("fixes #5, closes #5"),
            vec!["#5".to_string(), "#5".to_string()]
        );
    }

    #[test]
    fn test_keyword_may_end_a_longer_word() {
        assert_eq!(extract_issue_ids("hotfix #9"), vec!["#9"]);
        assert_eq!(extract_issue_ids("prefixes #3"), vec!["#3"]);
    }

    #[test]
    fn test_no_references() {
        assert!(extract_issue_ids("feat: mention #12 without keyword").is_empty());
        assert!(extract_issue_ids("fix:#12").is_empty());
        assert!(extract_issue_ids("").is_empty());
    }
}
