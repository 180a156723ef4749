//! Site configuration loaded from `docweave.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Error loading site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Configuration file is not valid TOML.
    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level site configuration.
///
/// Every field has a default, so an empty file is a valid configuration for
/// a site that keeps the conventional layout.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the content roots.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Directory navigation-config artifacts are written to.
    #[serde(default = "default_nav_dir")]
    pub nav_dir: PathBuf,
    /// Processed-asset settings.
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Content roots to build.
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

/// Processed-asset settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// On-disk directory of processed assets, if one exists locally.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// URL prefix for rewritten image references.
    #[serde(default = "default_asset_base")]
    pub base: String,
}

/// One content root.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    /// Directory name under `content_dir`, also the slug root.
    pub name: String,
    /// Directory levels below the section root to descend into.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            nav_dir: default_nav_dir(),
            assets: AssetsConfig::default(),
            sections: Vec::new(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            base: default_asset_base(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Look up a configured section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.name == name)
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_nav_dir() -> PathBuf {
    PathBuf::from("generated/nav")
}

fn default_asset_base() -> String {
    "/assets".to_owned()
}

fn default_max_depth() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docweave.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.nav_dir, PathBuf::from("generated/nav"));
        assert_eq!(config.assets.base, "/assets");
        assert!(config.sections.is_empty());
    }

    #[test]
    fn test_full_config_parsed() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docweave.toml");
        std::fs::write(
            &path,
            r#"
content_dir = "docs"
nav_dir = "out/nav"

[assets]
dir = "out/assets"
base = "/static"

[[sections]]
name = "platform"
max_depth = 4

[[sections]]
name = "guides"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.content_dir, PathBuf::from("docs"));
        assert_eq!(config.assets.dir, Some(PathBuf::from("out/assets")));
        assert_eq!(config.sections.len(), 2);
        assert_eq!(config.section("platform").unwrap().max_depth, 4);
        // Unspecified depth falls back to the default.
        assert_eq!(config.section("guides").unwrap().max_depth, 3);
        assert!(config.section("missing").is_none());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = Config::load(Path::new("/nonexistent/docweave.toml"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docweave.toml");
        std::fs::write(&path, "sections = 5").unwrap();

        let result = Config::load(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docweave.toml");
        std::fs::write(&path, "contnet_dir = \"typo\"").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
