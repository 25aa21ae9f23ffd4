//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for tagline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name, used as the package name of single-package repositories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Git configuration
    pub git: GitConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Package configurations (monorepo)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<PackageConfig>,
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote used to derive repository links
    pub remote: String,

    /// Tag format (e.g., "v{version}" or "{name}@{version}")
    pub tag_format: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            tag_format: "v{version}".to_string(),
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path, relative to each package root
    pub file: PathBuf,

    /// Changelog format (keep-a-changelog, angular)
    pub format: String,

    /// Repository URL used for compare links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            format: "keep-a-changelog".to_string(),
            repo_url: None,
        }
    }
}

/// Package-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Package name
    pub name: String,

    /// Path to package (relative to repo root)
    pub path: PathBuf,

    /// Package-specific tag format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_format: Option<String>,

    /// Package-specific changelog file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog_file: Option<PathBuf>,
}
