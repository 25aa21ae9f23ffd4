//! Tagline Core - Core library for release management
//!
//! This crate provides the foundational types, error handling, configuration,
//! package targeting and the structured output accumulator shared by the
//! tagline crates.

pub mod config;
pub mod error;
pub mod output;
pub mod packages;
pub mod types;

pub use error::{Result, TaglineError};
pub use output::{ChangelogData, JsonOutput, OutputEvent, OutputReport, VersionUpdate};
pub use packages::{select_packages, PackageTarget};
pub use types::{ChangeCategory, ChangelogEntry, ChangelogFormat};
