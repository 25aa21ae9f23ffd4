//! Init command

use std::path::PathBuf;

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use tagline_core::config::{Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};
use tagline_core::ChangelogFormat;

use crate::cli::output;
use crate::cli::Cli;

/// Initialize a new tagline configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        let (file_format, changelog_format) = if self.yes {
            ("yaml", ChangelogFormat::default())
        } else {
            let file_formats = ["yaml", "toml"];
            let file_format = Select::new()
                .with_prompt("Configuration format")
                .items(&file_formats)
                .default(0)
                .interact()?;

            let changelog_formats = ChangelogFormat::names();
            let changelog_format = Select::new()
                .with_prompt("Changelog format")
                .items(&changelog_formats)
                .default(0)
                .interact()?;

            (
                file_formats[file_format],
                ChangelogFormat::ALL[changelog_format],
            )
        };

        let config_path =
            if file_format == "toml" && config_path.extension().is_some_and(|e| e == "yaml") {
                config_path.with_extension("toml")
            } else {
                config_path
            };

        let content = render_config(file_format, changelog_format)?;
        std::fs::write(&config_path, &content)?;

        if cli.is_chatty() {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to list your packages", config_path.display());
            println!(
                "  2. Run {} to preview the next release notes",
                style("tagline changelog").cyan()
            );
        }

        Ok(())
    }
}

/// Configuration file contents for a file format and changelog format
fn render_config(file_format: &str, changelog_format: ChangelogFormat) -> anyhow::Result<String> {
    let template = DEFAULT_CONFIG_TEMPLATE.replace(
        &format!("format: {}", ChangelogFormat::default()),
        &format!("format: {}", changelog_format),
    );

    if file_format == "toml" {
        let config: Config = serde_yaml::from_str(&template)?;
        Ok(toml::to_string_pretty(&config)?)
    } else {
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_yaml_parses() {
        let content = render_config("yaml", ChangelogFormat::KeepAChangelog).unwrap();
        let config: Config = serde_yaml::from_str(&content).unwrap();
        assert_eq!(config.changelog.format, "keep-a-changelog");
        assert_eq!(config.git.tag_format, "v{version}");
    }

    #[test]
    fn test_toml_with_angular_format() {
        let content = render_config("toml", ChangelogFormat::Angular).unwrap();
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.changelog.format, "angular");
        assert!(config.packages.is_empty());
    }
}
