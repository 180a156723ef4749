//! Read-only lookup of processed image assets.

use std::collections::HashMap;

/// Metadata for one processed asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetInfo {
    /// Pixel width of the processed image.
    pub width: u32,
    /// Pixel height of the processed image.
    pub height: u32,
    /// Content hash of the processed image.
    pub hash: String,
}

/// Read-only registry of processed assets, keyed by processed name.
///
/// The registry is consulted once per unique image reference during a page
/// build and never written to by the rewriter.
pub trait AssetRegistry {
    /// Look up a processed asset by name.
    fn lookup(&self, name: &str) -> Option<AssetInfo>;
}

/// Asset registry backed by an in-memory map.
#[derive(Debug, Default)]
pub struct InMemoryAssetRegistry {
    assets: HashMap<String, AssetInfo>,
}

impl InMemoryAssetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processed asset under `name`.
    pub fn insert(&mut self, name: impl Into<String>, info: AssetInfo) {
        self.assets.insert(name.into(), info);
    }
}

impl AssetRegistry for InMemoryAssetRegistry {
    fn lookup(&self, name: &str) -> Option<AssetInfo> {
        self.assets.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn info() -> AssetInfo {
        AssetInfo {
            width: 640,
            height: 480,
            hash: "abc123".to_owned(),
        }
    }

    #[test]
    fn test_lookup_hit() {
        let mut registry = InMemoryAssetRegistry::new();
        registry.insert("platform-diagram.png", info());

        assert_eq!(registry.lookup("platform-diagram.png"), Some(info()));
    }

    #[test]
    fn test_lookup_miss() {
        let registry = InMemoryAssetRegistry::new();

        assert_eq!(registry.lookup("missing.png"), None);
    }
}
