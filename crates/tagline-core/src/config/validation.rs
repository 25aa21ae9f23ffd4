//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::types::ChangelogFormat;

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_git(config)?;
    validate_changelog(config)?;
    validate_packages(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "remote cannot be empty".to_string(),
        }
        .into());
    }

    validate_tag_format("git.tag_format", &config.git.tag_format)
}

fn validate_tag_format(field: &str, tag_format: &str) -> Result<()> {
    if !tag_format.contains("{version}") {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: "must contain {version} placeholder".to_string(),
        }
        .into());
    }
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.format.parse::<ChangelogFormat>().is_err() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.format".to_string(),
            message: format!("must be one of: {}", ChangelogFormat::names().join(", ")),
        }
        .into());
    }

    Ok(())
}

fn validate_packages(config: &Config) -> Result<()> {
    if !config.packages.is_empty() {
        debug!(count = config.packages.len(), "validating packages");
    }

    let mut seen = HashSet::new();
    for (i, package) in config.packages.iter().enumerate() {
        if package.name.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("packages[{}].name", i),
                message: "package name cannot be empty".to_string(),
            }
            .into());
        }

        if !seen.insert(package.name.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: format!("packages[{}].name", i),
                message: format!("duplicate package name '{}'", package.name),
            }
            .into());
        }

        if let Some(tag_format) = &package.tag_format {
            validate_tag_format(&format!("packages[{}].tag_format", i), tag_format)?;
        }
    }

    Ok(())
}
