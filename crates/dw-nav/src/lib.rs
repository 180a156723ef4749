//! Navigation tree builder.
//!
//! Builds sidebar navigation trees from flat [`ContentNode`] records.
//! Navigation is a view layer over the content hierarchy: exactly three
//! tiers, children attached by slug/parent-slug matching, siblings sorted by
//! their ordering prefix. Deeper content exists but is not reflected here.
//!
//! # Example
//!
//! ```
//! use dw_content::ContentNode;
//! use dw_nav::build_navigation;
//! use std::path::PathBuf;
//!
//! let records = vec![ContentNode {
//!     title: "Foo".to_owned(),
//!     slug: "/platform/foo".to_owned(),
//!     parent_slug: "/platform".to_owned(),
//!     level: 1,
//!     order: 10,
//!     section: "platform".to_owned(),
//!     source_path: PathBuf::from("platform/10.foo/docs.md"),
//! }];
//!
//! let nav = build_navigation(&records);
//! assert_eq!(nav.len(), 1);
//! assert_eq!(nav[0].title, "Foo");
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use dw_content::ContentNode;

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target slug.
    pub slug: String,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Navigation-config artifact written once per content root.
///
/// Serialized as `{ "config": [...] }`, consumed by page templates at render
/// time.
#[derive(Debug, Serialize)]
pub struct NavConfig<'a> {
    /// Top-level navigation items.
    pub config: &'a [NavItem],
}

/// Error writing a navigation-config artifact.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Artifact file could not be written.
    #[error("Failed to write navigation config {}: {source}", .path.display())]
    Write {
        /// Target artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Tree serialization failed.
    #[error("Failed to serialize navigation config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Build a three-tier navigation tree from flat records.
///
/// Pure function: tiers are partitioned by `level`, each tier is sorted by
/// `order` (stable, so equal orders keep their input order), and children
/// attach where `parent_slug` equals the parent's `slug`. Records deeper
/// than level 3 never become tree nodes. Records whose parent slug matches
/// nothing are dropped.
#[must_use]
pub fn build_navigation(records: &[ContentNode]) -> Vec<NavItem> {
    let tier = |level: usize| {
        let mut bucket: Vec<&ContentNode> =
            records.iter().filter(|n| n.level == level).collect();
        // sort_by_key is stable: equal orders preserve input order.
        bucket.sort_by_key(|n| n.order);
        bucket
    };

    let (tier1, tier2, tier3) = (tier(1), tier(2), tier(3));
    let mut dropped = 0usize;

    let tree: Vec<NavItem> = tier1
        .iter()
        .map(|top| {
            let children = tier2
                .iter()
                .filter(|n| n.parent_slug == top.slug)
                .map(|mid| {
                    let grandchildren = tier3
                        .iter()
                        .filter(|n| n.parent_slug == mid.slug)
                        .map(|leaf| leaf_item(leaf))
                        .collect();
                    NavItem {
                        title: mid.title.clone(),
                        slug: mid.slug.clone(),
                        children: grandchildren,
                    }
                })
                .collect();
            NavItem {
                title: top.title.clone(),
                slug: top.slug.clone(),
                children,
            }
        })
        .collect();

    let attached: usize = count_items(&tree);
    let eligible = tier1.len() + tier2.len() + tier3.len();
    if attached < eligible {
        dropped = eligible - attached;
    }
    if dropped > 0 {
        tracing::debug!(dropped, "Orphaned navigation records not attached");
    }

    tree
}

/// Write the navigation-config artifact for one content root.
///
/// # Errors
///
/// Returns [`NavError`] when serialization or the file write fails. Nothing
/// is written on failure.
pub fn write_nav_config(path: &Path, tree: &[NavItem]) -> Result<(), NavError> {
    let json = serde_json::to_string_pretty(&NavConfig { config: tree })?;
    fs::write(path, json).map_err(|source| NavError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Navigation config written");
    Ok(())
}

fn leaf_item(node: &ContentNode) -> NavItem {
    NavItem {
        title: node.title.clone(),
        slug: node.slug.clone(),
        children: Vec::new(),
    }
}

fn count_items(items: &[NavItem]) -> usize {
    items
        .iter()
        .map(|i| 1 + count_items(&i.children))
        .sum()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn record(title: &str, slug: &str, level: usize, order: u32) -> ContentNode {
        let parent_slug = slug
            .rsplit_once('/')
            .map_or(String::new(), |(head, _)| head.to_owned());
        ContentNode {
            title: title.to_owned(),
            slug: slug.to_owned(),
            parent_slug,
            level,
            order,
            section: "platform".to_owned(),
            source_path: PathBuf::new(),
        }
    }

    #[test]
    fn test_empty_records_build_empty_tree() {
        assert!(build_navigation(&[]).is_empty());
    }

    #[test]
    fn test_single_tier_sorted_by_order() {
        let records = vec![
            record("B", "/platform/b", 1, 20),
            record("A", "/platform/a", 1, 10),
        ];

        let nav = build_navigation(&records);

        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].title, "A");
        assert_eq!(nav[1].title, "B");
    }

    #[test]
    fn test_three_tiers_attached() {
        let records = vec![
            record("Top", "/platform/top", 1, 1),
            record("Mid", "/platform/top/mid", 2, 1),
            record("Leaf", "/platform/top/mid/leaf", 3, 1),
        ];

        let nav = build_navigation(&records);

        assert_eq!(nav[0].title, "Top");
        assert_eq!(nav[0].children[0].title, "Mid");
        assert_eq!(nav[0].children[0].children[0].title, "Leaf");
    }

    #[test]
    fn test_never_deeper_than_three_tiers() {
        let records = vec![
            record("Top", "/s/a", 1, 1),
            record("Mid", "/s/a/b", 2, 1),
            record("Leaf", "/s/a/b/c", 3, 1),
            record("TooDeep", "/s/a/b/c/d", 4, 1),
        ];

        let nav = build_navigation(&records);

        let leaf = &nav[0].children[0].children[0];
        assert_eq!(leaf.title, "Leaf");
        assert!(leaf.children.is_empty());
    }

    #[test]
    fn test_sort_is_stable_for_equal_orders() {
        let records = vec![
            record("First", "/s/first", 1, 0),
            record("Second", "/s/second", 1, 0),
            record("Third", "/s/third", 1, 0),
        ];

        let nav = build_navigation(&records);

        let titles: Vec<_> = nav.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_orphans_dropped_silently() {
        let records = vec![
            record("Top", "/s/top", 1, 1),
            record("Orphan", "/s/gone/child", 2, 1),
        ];

        let nav = build_navigation(&records);

        assert_eq!(nav.len(), 1);
        assert!(nav[0].children.is_empty());
    }

    #[test]
    fn test_children_sorted_by_order() {
        let records = vec![
            record("Top", "/s/top", 1, 1),
            record("Z", "/s/top/z", 2, 5),
            record("A", "/s/top/a", 2, 1),
        ];

        let nav = build_navigation(&records);

        assert_eq!(nav[0].children[0].title, "A");
        assert_eq!(nav[0].children[1].title, "Z");
    }

    #[test]
    fn test_write_nav_config_shape() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("platform.json");
        let tree = build_navigation(&[record("Foo", "/platform/foo", 1, 10)]);

        write_nav_config(&path, &tree).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["config"][0]["title"], "Foo");
        assert_eq!(value["config"][0]["slug"], "/platform/foo");
        // Empty children are omitted from the artifact.
        assert!(value["config"][0].get("children").is_none());
    }

    #[test]
    fn test_write_nav_config_unwritable_path_fails() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing-dir/platform.json");
        let result = write_nav_config(&path, &[]);

        assert!(matches!(result, Err(NavError::Write { .. })));
    }
}
