//! Path classification.
//!
//! Decides whether a relative path names a content file and derives the
//! canonical slug data from its ordering-prefixed segments.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Matches a leading numeric ordering prefix on a directory segment.
static ORDER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(.+)$").expect("valid ordering-prefix regex"));

/// Basename every content file must carry.
const CONTENT_BASENAME: &str = "docs";

/// Markdown-family extensions recognized for content files.
const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Classification result for one content file path.
///
/// All slug-like fields are de-ordered: ordering prefixes are stripped from
/// every path segment before slugs are assembled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedPath {
    /// Top-level content root name (e.g. `"platform"`).
    pub section: String,
    /// De-ordered path below the section, with a leading `/` (e.g. `"/foo/bar"`).
    pub local_path: String,
    /// Absolute slug: `"/" + section + local_path`.
    pub slug: String,
    /// Slug with the last segment removed.
    pub parent_slug: String,
    /// Count of `/` in `local_path`, minimum 1. Root-level pages are 1.
    pub level: usize,
    /// Ordering prefix of the content file's immediate parent directory,
    /// 0 when absent or malformed.
    pub order: u32,
}

/// Check whether a filename matches the content-file pattern.
///
/// Only the exact basename `docs` with a markdown-family extension counts;
/// anything else is not a content file.
#[must_use]
pub fn is_content_file(file_name: &str) -> bool {
    let Some((stem, ext)) = file_name.rsplit_once('.') else {
        return false;
    };
    stem == CONTENT_BASENAME && CONTENT_EXTENSIONS.contains(&ext)
}

/// Split a directory segment into its ordering prefix and de-ordered name.
///
/// Returns `(None, segment)` when the segment carries no valid prefix, in
/// which case the caller treats the order as 0.
///
/// # Examples
///
/// ```
/// use dw_content::strip_order_prefix;
///
/// assert_eq!(strip_order_prefix("10.getting-started"), (Some(10), "getting-started"));
/// assert_eq!(strip_order_prefix("unordered"), (None, "unordered"));
/// ```
#[must_use]
pub fn strip_order_prefix(segment: &str) -> (Option<u32>, &str) {
    match ORDER_PREFIX.captures(segment) {
        Some(caps) => {
            let digits = caps.get(1).map_or("", |m| m.as_str());
            let name = caps.get(2).map_or(segment, |m| m.as_str());
            // Absurdly long prefixes overflow u32; treat them as unordered.
            match digits.parse() {
                Ok(order) => (Some(order), name),
                Err(_) => (None, segment),
            }
        }
        None => (None, segment),
    }
}

/// Classify a relative content-file path.
///
/// The path must look like `<section>/<ordered segments...>/<content file>`.
/// Returns `None` when the final component does not match the content-file
/// pattern — that is "not a content node", not an error.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use dw_content::classify;
///
/// let c = classify(Path::new("platform/10.foo/docs.md")).unwrap();
/// assert_eq!(c.slug, "/platform/foo");
/// assert_eq!(c.parent_slug, "/platform");
/// assert_eq!(c.level, 1);
/// assert_eq!(c.order, 10);
/// ```
#[must_use]
pub fn classify(rel_path: &Path) -> Option<ClassifiedPath> {
    let file_name = rel_path.file_name()?.to_str()?;
    if !is_content_file(file_name) {
        return None;
    }

    let mut segments: Vec<&str> = rel_path
        .parent()?
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    if segments.is_empty() {
        return None;
    }
    let section = segments.remove(0).to_owned();

    // Order comes from the content file's immediate parent segment only.
    let order = segments
        .last()
        .and_then(|seg| strip_order_prefix(seg).0)
        .unwrap_or(0);

    let mut local_path = String::new();
    for seg in &segments {
        let (_, name) = strip_order_prefix(seg);
        local_path.push('/');
        local_path.push_str(name);
    }

    let slug = format!("/{section}{local_path}");
    let level = local_path.matches('/').count().max(1);
    let parent_slug = slug
        .rsplit_once('/')
        .map_or(String::new(), |(head, _)| head.to_owned());

    Some(ClassifiedPath {
        section,
        local_path,
        slug,
        parent_slug,
        level,
        order,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_is_content_file() {
        assert!(is_content_file("docs.md"));
        assert!(is_content_file("docs.mdx"));
        assert!(!is_content_file("docs.markdown"));
        assert!(!is_content_file("index.md"));
        assert!(!is_content_file("docs"));
        assert!(!is_content_file("readme.md"));
    }

    #[test]
    fn test_strip_order_prefix_digits() {
        assert_eq!(strip_order_prefix("10.foo"), (Some(10), "foo"));
        assert_eq!(strip_order_prefix("0.foo"), (Some(0), "foo"));
        assert_eq!(strip_order_prefix("007.bond"), (Some(7), "bond"));
    }

    #[test]
    fn test_strip_order_prefix_malformed() {
        assert_eq!(strip_order_prefix("foo"), (None, "foo"));
        assert_eq!(strip_order_prefix("a10.foo"), (None, "a10.foo"));
        assert_eq!(strip_order_prefix("10foo"), (None, "10foo"));
        assert_eq!(strip_order_prefix("10."), (None, "10."));
    }

    #[test]
    fn test_strip_order_prefix_keeps_inner_dots() {
        assert_eq!(strip_order_prefix("10.foo.bar"), (Some(10), "foo.bar"));
    }

    #[test]
    fn test_classify_single_level() {
        let c = classify(Path::new("platform/10.foo/docs.md")).unwrap();
        assert_eq!(c.section, "platform");
        assert_eq!(c.local_path, "/foo");
        assert_eq!(c.slug, "/platform/foo");
        assert_eq!(c.parent_slug, "/platform");
        assert_eq!(c.level, 1);
        assert_eq!(c.order, 10);
    }

    #[test]
    fn test_classify_nested() {
        let c = classify(Path::new("platform/10.foo/20.bar/docs.mdx")).unwrap();
        assert_eq!(c.slug, "/platform/foo/bar");
        assert_eq!(c.parent_slug, "/platform/foo");
        assert_eq!(c.level, 2);
        assert_eq!(c.order, 20);
    }

    #[test]
    fn test_classify_stripping_is_prefix_independent() {
        // Same slug regardless of the digit value or count.
        for dir in ["1.foo", "99.foo", "1234.foo"] {
            let c = classify(&Path::new("embedded").join(dir).join("docs.md")).unwrap();
            assert_eq!(c.slug, "/embedded/foo");
        }
    }

    #[test]
    fn test_classify_unordered_segment_defaults_to_zero() {
        let c = classify(Path::new("platform/misc/docs.md")).unwrap();
        assert_eq!(c.order, 0);
        assert_eq!(c.slug, "/platform/misc");
    }

    #[test]
    fn test_classify_level_equals_separator_count() {
        let c = classify(Path::new("s/1.a/2.b/3.c/4.d/docs.md")).unwrap();
        assert_eq!(c.local_path, "/a/b/c/d");
        assert_eq!(c.level, 4);
    }

    #[test]
    fn test_classify_rejects_non_content_filename() {
        assert_eq!(classify(Path::new("platform/10.foo/notes.md")), None);
        assert_eq!(classify(Path::new("platform/10.foo/docs.txt")), None);
    }

    #[test]
    fn test_classify_rejects_bare_filename() {
        // A content file needs at least a section directory above it.
        assert_eq!(classify(Path::new("docs.md")), None);
    }
}
