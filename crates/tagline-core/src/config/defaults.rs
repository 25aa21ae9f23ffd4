//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "tagline.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "tagline.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".tagline.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".tagline.toml",
        ALT_CONFIG_FILE,
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tagline configuration

git:
  remote: origin
  tag_format: "v{version}"

changelog:
  file: CHANGELOG.md
  # keep-a-changelog | angular
  format: keep-a-changelog

# Monorepo packages. Leave empty to treat the repository root as one package.
packages: []
#  - name: core
#    path: packages/core
#    tag_format: "{name}@{version}"
"#;
