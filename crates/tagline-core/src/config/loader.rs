//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// Each directory level is checked for `<dir>/<name>` and then
/// `<dir>/.github/<name>`; the first match wins.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.exists() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration or use defaults.
///
/// A missing file falls back to defaults; a file that exists but fails to
/// parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("tagline.toml");
        std::fs::write(&config_path, "[changelog]\nformat = \"angular\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("tagline.toml");
        let yaml_path = temp.path().join("tagline.yaml");
        std::fs::write(&toml_path, "[changelog]\nformat = \"angular\"").unwrap();
        std::fs::write(&yaml_path, "changelog:\n  format: angular").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_find_config_in_github_dir() {
        let temp = TempDir::new().unwrap();
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        let config_path = github_dir.join("tagline.yaml");
        std::fs::write(&config_path, "changelog:\n  format: angular").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("tagline.toml");
        std::fs::write(&config_path, "").unwrap();
        let nested = temp.path().join("packages").join("core");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(config_path));
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("tagline.toml");
        std::fs::write(
            &config_path,
            r#"
name = "widgets"

[changelog]
format = "angular"
repo_url = "https://github.com/u/r"

[[packages]]
name = "core"
path = "packages/core"
tag_format = "{name}@{version}"
"#,
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.name.as_deref(), Some("widgets"));
        assert_eq!(config.changelog.format, "angular");
        assert_eq!(config.packages.len(), 1);
        assert_eq!(config.packages[0].path, PathBuf::from("packages/core"));
        assert_eq!(config.git.tag_format, "v{version}");
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("tagline.yaml");
        std::fs::write(
            &config_path,
            "git:\n  remote: upstream\nchangelog:\n  file: HISTORY.md\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.git.remote, "upstream");
        assert_eq!(config.changelog.file, PathBuf::from("HISTORY.md"));
        assert_eq!(config.changelog.format, "keep-a-changelog");
    }

    #[test]
    fn test_load_config_rejects_unknown_format() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("tagline.toml");
        std::fs::write(&config_path, "[changelog]\nformat = \"html\"").unwrap();

        assert!(load_config(&config_path).is_err());
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.changelog.format, "keep-a-changelog");
    }
}
