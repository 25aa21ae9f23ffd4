//! Tagline Changelog - Changelog generation for release management
//!
//! Commit messages are classified into [`ChangelogEntry`] values, grouped by
//! [`ChangeCategory`] and rendered by one of the [`ChangelogFormatter`]
//! implementations.

pub mod aggregate;
pub mod formatter;
pub mod generator;
pub mod parser;
pub mod templates;
pub mod writer;

pub use aggregate::{aggregate, GroupedEntries};
pub use formatter::{
    AngularFormatter, ChangelogFormatter, FormatterRegistry, KeepAChangelogFormatter,
    ReleaseContext,
};
pub use generator::{ChangelogGenerator, PackageChangelog, PackageRelease};
pub use parser::{classify, extract_issue_ids, CommitParser, ConventionalParser, HeaderMatch};
pub use tagline_core::types::{ChangeCategory, ChangelogEntry, ChangelogFormat};
pub use templates::header_for;
pub use writer::{insert_release, ChangelogUpdate, ChangelogWriter};
