//! Static changelog file headers

use tagline_core::types::ChangelogFormat;

const KEEP_A_CHANGELOG_HEADER: &str = "# Changelog\n\n\
All notable changes to this project will be documented in this file.\n\n\
The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/),\n\
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).\n\n";

const ANGULAR_HEADER: &str = "# Changelog\n\n\
All notable changes to this project will be documented in this file. \
See [Conventional Commits](https://conventionalcommits.org) for commit guidelines.\n\n";

/// Header written at the top of a new changelog file
pub fn header_for(format: ChangelogFormat) -> &'static str {
    match format {
        ChangelogFormat::KeepAChangelog => KEEP_A_CHANGELOG_HEADER,
        ChangelogFormat::Angular => ANGULAR_HEADER,
    }
}
