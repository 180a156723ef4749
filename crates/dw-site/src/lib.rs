//! Site configuration and build orchestration.
//!
//! Ties the pipeline together: configuration names the content roots and
//! output locations, [`SiteBuilder`] walks each section into a navigation
//! artifact and builds individual pages through image rewriting and
//! rendering. Traversal errors are fatal to the enclosing build; broken
//! image references are not.

mod builder;
mod config;

pub use builder::{BuildError, BuiltPage, SectionBuild, SiteBuilder};
pub use config::{AssetsConfig, Config, ConfigError, SectionConfig};
