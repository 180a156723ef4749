//! Nested outline reconstruction from flat headings.

use serde::Serialize;

use crate::collector::Heading;

/// One node of a page outline.
///
/// The root node carries neither title nor url, only `items`. Linking nodes
/// created to bridge a skipped heading level carry `items` but no title.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TocNode {
    /// Heading text, absent on the root and on bridge nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// In-page anchor, `#` plus the heading id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Nested child outline entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TocNode>,
}

/// Build a nested outline from collected headings.
///
/// Depths are normalized so the shallowest heading becomes the first nesting
/// level: a page using only H2/H3 produces the same shape as one using H1/H2.
/// A heading that skips levels relative to its predecessor nests exactly one
/// level deeper, not one level per skipped depth.
///
/// An empty input yields a bare root with no items, which serializes as `{}`.
#[must_use]
pub fn build_toc(headings: &[Heading]) -> TocNode {
    let mut root = TocNode::default();
    let Some(min_depth) = headings.iter().map(|h| h.depth).min() else {
        return root;
    };

    for heading in headings {
        let normalized = heading.depth - min_depth + 1;
        insert(heading, &mut root.items, normalized);
    }
    root
}

/// Place `heading` at `depth` levels below `nodes`.
///
/// Descends through the last sibling at each level; when a level has no
/// sibling to descend into (a skipped depth), the heading attaches right
/// there instead of growing an empty chain.
fn insert(heading: &Heading, nodes: &mut Vec<TocNode>, depth: u8) {
    if depth <= 1 {
        nodes.push(leaf(heading));
        return;
    }
    match nodes.last_mut() {
        Some(last) => insert(heading, &mut last.items, depth - 1),
        None => nodes.push(leaf(heading)),
    }
}

fn leaf(heading: &Heading) -> TocNode {
    TocNode {
        title: Some(heading.text.clone()),
        url: Some(format!("#{}", heading.id)),
        items: Vec::new(),
    }
}
