//! Conventional commit header grammar
//!
//! `<type>[(<scope>)][!]: <description>`, see
//! https://www.conventionalcommits.org/

use regex::Regex;
use std::sync::LazyLock;

/// Regex for parsing conventional commit headers
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<description>.+)$")
        .expect("Invalid regex")
});

/// Result of tokenizing a commit header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatch<'a> {
    /// The header follows the conventional commit grammar
    Matched {
        /// Type token as written
        commit_type: &'a str,
        /// Parenthesised scope
        scope: Option<&'a str>,
        /// `!` before the colon
        breaking: bool,
        /// Remainder of the line
        description: &'a str,
    },
    /// Anything else
    Unmatched,
}

/// Tokenize a single header line
pub fn tokenize_header(header: &str) -> HeaderMatch<'_> {
    let Some(caps) = HEADER_REGEX.captures(header) else {
        return HeaderMatch::Unmatched;
    };

    match (caps.name("type"), caps.name("description")) {
        (Some(commit_type), Some(description)) => HeaderMatch::Matched {
            commit_type: commit_type.as_str(),
            scope: caps.name("scope").map(|m| m.as_str()),
            breaking: caps.name("breaking").is_some(),
            description: description.as_str(),
        },
        _ => HeaderMatch::Unmatched,
    }
}
