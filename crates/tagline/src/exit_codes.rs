//! Exit codes for the CLI

use tagline_core::error::{ChangelogError, ConfigError, GitError};
use tagline_core::TaglineError;

/// Success
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Changelog error
pub const CHANGELOG_ERROR: i32 = 4;

/// Exit code for an error returned by a command
pub fn for_error(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<TaglineError>() {
            return match e {
                TaglineError::Config(_) => CONFIG_ERROR,
                TaglineError::Git(_) => GIT_ERROR,
                TaglineError::Changelog(_) => CHANGELOG_ERROR,
                _ => ERROR,
            };
        }
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<GitError>() {
            return GIT_ERROR;
        }
        if cause.is::<ChangelogError>() {
            return CHANGELOG_ERROR;
        }
    }
    ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_codes() {
        let config: anyhow::Error = TaglineError::Config(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "must not be empty".to_string(),
        })
        .into();
        assert_eq!(for_error(&config), CONFIG_ERROR);

        let git: anyhow::Error = GitError::RemoteNotFound("origin".to_string()).into();
        assert_eq!(for_error(&git), GIT_ERROR);

        let changelog: anyhow::Error = ChangelogError::UnsupportedFormat {
            format: "html".to_string(),
            supported: vec!["keep-a-changelog", "angular"],
        }
        .into();
        assert_eq!(for_error(&changelog), CHANGELOG_ERROR);
    }

    #[test]
    fn test_context_is_looked_through() {
        let err = anyhow::Error::from(GitError::RemoteNotFound("upstream".to_string()))
            .context("resolving repository URL");
        assert_eq!(for_error(&err), GIT_ERROR);
    }

    #[test]
    fn test_other_errors_are_general() {
        assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
    }
}
