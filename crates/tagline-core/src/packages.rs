//! Package targeting
//!
//! Resolves the packages a run operates on from configuration and narrows
//! them with an optional name glob.

use std::path::PathBuf;

use globset::Glob;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;

/// A package a changelog is generated for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageTarget {
    /// Package name
    pub name: String,
    /// Package root, relative to the repository root
    pub path: PathBuf,
    /// Tag format with `{name}` and `{version}` placeholders
    pub tag_format: String,
    /// Changelog file, relative to the repository root
    pub changelog_file: PathBuf,
}

impl PackageTarget {
    /// Resolve all packages described by the configuration.
    ///
    /// Without `[[packages]]` the repository root is the single package, named
    /// after `config.name` or `fallback_name`.
    pub fn from_config(config: &Config, fallback_name: &str) -> Vec<Self> {
        if config.packages.is_empty() {
            return vec![Self {
                name: config
                    .name
                    .clone()
                    .unwrap_or_else(|| fallback_name.to_string()),
                path: PathBuf::new(),
                tag_format: config.git.tag_format.clone(),
                changelog_file: config.changelog.file.clone(),
            }];
        }

        config
            .packages
            .iter()
            .map(|package| Self {
                name: package.name.clone(),
                path: package.path.clone(),
                tag_format: package
                    .tag_format
                    .clone()
                    .unwrap_or_else(|| config.git.tag_format.clone()),
                changelog_file: package.path.join(
                    package
                        .changelog_file
                        .as_deref()
                        .unwrap_or(&config.changelog.file),
                ),
            })
            .collect()
    }

    /// Path filter handed to the history tool
    pub fn pathspec(&self) -> String {
        if self.path.as_os_str().is_empty() {
            ".".to_string()
        } else {
            self.path.to_string_lossy().into_owned()
        }
    }

    /// Prefix every tag of this package starts with
    pub fn tag_prefix(&self) -> String {
        let prefix = self
            .tag_format
            .split("{version}")
            .next()
            .unwrap_or_default();
        prefix.replace("{name}", &self.name)
    }
}

/// Narrow packages by a name glob.
///
/// An invalid glob is logged and matches nothing.
pub fn select_packages(packages: Vec<PackageTarget>, pattern: Option<&str>) -> Vec<PackageTarget> {
    let Some(pattern) = pattern else {
        return packages;
    };

    let matcher = match Glob::new(pattern) {
        Ok(glob) => glob.compile_matcher(),
        Err(e) => {
            warn!(pattern, error = %e, "invalid package pattern, no packages selected");
            return Vec::new();
        }
    };

    let selected: Vec<_> = packages
        .into_iter()
        .filter(|p| matcher.is_match(&p.name))
        .collect();
    debug!(pattern, count = selected.len(), "selected packages");
    selected
}
