//! Changelog command

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Args;
use tokio::task::JoinSet;
use tracing::{debug, info};

use tagline_changelog::{
    ChangelogGenerator, ChangelogWriter, PackageChangelog, PackageRelease, ReleaseContext,
};
use tagline_core::config::{load_config_or_default, Config};
use tagline_core::{select_packages, JsonOutput, PackageTarget};
use tagline_git::{GitRepo, RevisionSource, SystemGitHistory};

use crate::cli::output;
use crate::cli::Cli;

/// Generate changelog
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Changelog format (keep-a-changelog, angular); defaults to the configured format
    #[arg(short, long)]
    pub format: Option<String>,

    /// Version to generate changelog for
    #[arg(long = "for-version", value_name = "VERSION")]
    pub for_version: Option<String>,

    /// Start of the range (exclusive); defaults to each package's latest tag
    #[arg(long, value_name = "TAG")]
    pub from: Option<String>,

    /// End of the range (inclusive)
    #[arg(long, value_name = "REF")]
    pub to: Option<String>,

    /// Only packages whose name matches this glob
    #[arg(short, long, value_name = "GLOB")]
    pub package: Option<String>,

    /// Release date (YYYY-MM-DD); defaults to today
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Write to the changelog files (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Show what would be written without touching any file
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            version = ?self.for_version,
            format = ?self.format,
            package = ?self.package,
            write = self.write,
            dry_run = self.dry_run,
            "executing changelog command"
        );
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd)?;
        debug!(config = ?config_path, "configuration resolved");

        let repo = GitRepo::discover(&cwd)?;
        let repo_root = repo.path().to_path_buf();

        let generator = ChangelogGenerator::new();
        let format_name = self.format.as_deref().unwrap_or(&config.changelog.format);
        let format = generator.formatters().get(format_name)?.changelog_format();

        let fallback_name = repo_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string());
        let packages = select_packages(
            PackageTarget::from_config(&config, &fallback_name),
            self.package.as_deref(),
        );
        if packages.is_empty() {
            if cli.is_chatty() {
                output::warning("No packages matched.");
            }
            return Ok(());
        }

        let repo_url = resolve_repo_url(&repo, &config);
        let date = self
            .date
            .unwrap_or_else(|| Local::now().date_naive())
            .format("%Y-%m-%d")
            .to_string();
        let monorepo = !config.packages.is_empty();

        let mut releases = Vec::with_capacity(packages.len());
        for package in &packages {
            let latest = repo
                .find_latest_tag(Some(&package.tag_prefix()))
                .with_context(|| format!("reading tags of package {}", package.name))?;

            let mut release = PackageRelease::new(
                &package.name,
                self.for_version.as_deref().unwrap_or(ReleaseContext::UNRELEASED),
                &date,
            );
            release.pathspec = package.pathspec();
            release.previous_version = latest.as_ref().and_then(|t| t.version.clone());
            release.from = self.from.clone().or_else(|| latest.map(|t| t.name));
            release.to = self.to.clone();
            release.repo_url = repo_url.clone();
            release.display_name = monorepo.then(|| package.name.clone());
            release.format = format;
            releases.push(release);
        }

        let json = Arc::new(if cli.json {
            JsonOutput::enabled(self.dry_run || !self.write)
        } else {
            JsonOutput::disabled()
        });

        let changelogs = generate_all(
            generator,
            SystemGitHistory::new(&repo_root),
            releases,
            Arc::clone(&json),
        )?;

        let writer = if self.dry_run {
            ChangelogWriter::dry_run()
        } else {
            ChangelogWriter::new()
        };

        for (package, changelog) in packages.iter().zip(&changelogs) {
            if self.write || self.dry_run {
                self.write_changelog(cli, &writer, &repo_root, package, changelog)?;
            } else if !cli.json {
                println!("{}", changelog.rendered.trim_end());
            }
        }

        if let Some(report) = json.drain() {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Ok(())
    }

    fn write_changelog(
        &self,
        cli: &Cli,
        writer: &ChangelogWriter,
        repo_root: &Path,
        package: &PackageTarget,
        changelog: &PackageChangelog,
    ) -> anyhow::Result<()> {
        let path = repo_root.join(&package.changelog_file);
        let update = writer.update(&path, changelog.format, &changelog.rendered)?;

        if !cli.is_chatty() {
            return Ok(());
        }

        let shown = output::path_style().apply_to(package.changelog_file.display());
        if update.written {
            output::success(&format!(
                "{} {} for {} ({} entries)",
                if update.created { "Created" } else { "Updated" },
                shown,
                output::version_style().apply_to(&changelog.version),
                changelog.entries.len()
            ));
        } else {
            output::info(&format!("Would write {}:", shown));
            println!("{}", changelog.rendered.trim_end());
        }

        Ok(())
    }
}

/// Configured repository URL, else one derived from the configured remote
fn resolve_repo_url(repo: &GitRepo, config: &Config) -> Option<String> {
    if let Some(url) = &config.changelog.repo_url {
        return Some(url.trim_end_matches('/').to_string());
    }

    match repo.web_url(&config.git.remote) {
        Ok(url) => url,
        Err(e) => {
            debug!(remote = %config.git.remote, error = %e, "no repository URL from remote");
            None
        }
    }
}

/// Generate every release concurrently, returning changelogs in input order
fn generate_all(
    generator: ChangelogGenerator,
    history: SystemGitHistory,
    releases: Vec<PackageRelease>,
    json: Arc<JsonOutput>,
) -> anyhow::Result<Vec<PackageChangelog>> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async move {
        let generator = Arc::new(generator);
        let source = Arc::new(RevisionSource::new(history));
        let mut tasks = JoinSet::new();

        for (index, release) in releases.into_iter().enumerate() {
            let generator = Arc::clone(&generator);
            let source = Arc::clone(&source);
            let json = Arc::clone(&json);
            tasks.spawn(async move {
                let changelog = generator.generate(&*source, &release, &*json).await;
                (index, changelog)
            });
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let (index, changelog) = joined.context("changelog task panicked")?;
            results.push((index, changelog?));
        }

        results.sort_by_key(|(index, _)| *index);
        Ok::<_, anyhow::Error>(results.into_iter().map(|(_, changelog)| changelog).collect())
    })
}
