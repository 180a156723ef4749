//! In-place rewriting of embedded image references.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use dw_content::strip_order_prefix;

use crate::registry::{AssetInfo, AssetRegistry};

static MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").unwrap());

static HTML_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img\b[^>]*\bsrc\s*=\s*(?:"([^"]+)"|'([^']+)')[^>]*/?>"#).unwrap()
});

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Syntactic form of an image reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// `![alt](path)` form.
    Markdown,
    /// `<img src="path">` form.
    Html,
}

/// One image reference extracted from document text.
///
/// Transient: created and consumed within a single rewrite pass.
#[derive(Clone, Debug)]
struct ImageRef {
    raw: String,
    path: String,
    kind: ImageKind,
    alt: String,
}

/// Result of one document rewrite pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Document text with references rewritten or stripped.
    pub text: String,
    /// Original target paths whose processed asset could not be found.
    pub broken: Vec<String>,
}

/// Rewrites embedded image references to processed-asset paths.
///
/// References are resolved against an [`AssetRegistry`] and, when configured,
/// an on-disk directory of processed assets. A reference that resolves to
/// nothing is stripped from the output and reported as broken.
pub struct ImageRewriter<'a> {
    registry: &'a dyn AssetRegistry,
    assets_dir: Option<PathBuf>,
    asset_base: String,
}

impl<'a> ImageRewriter<'a> {
    /// Create a rewriter over `registry`.
    #[must_use]
    pub fn new(registry: &'a dyn AssetRegistry) -> Self {
        Self {
            registry,
            assets_dir: None,
            asset_base: "/assets".to_owned(),
        }
    }

    /// Also accept assets that exist on disk under `dir` but are missing
    /// from the registry.
    #[must_use]
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    /// URL prefix for rewritten references. Defaults to `/assets`.
    #[must_use]
    pub fn with_asset_base(mut self, base: impl Into<String>) -> Self {
        self.asset_base = base.into();
        self
    }

    /// Rewrite every image reference in `text`.
    ///
    /// `source_path` is the hosting document; its parent directory supplies
    /// the fallback slug for single-segment links, and its path names the
    /// document in broken-link warnings. Each unique `{path, kind}` pair is
    /// resolved once; every occurrence is then rewritten (or stripped) from
    /// that shared resolution, even when its raw match text differs (other
    /// alt text, other attribute order). HTML comments are removed from the
    /// output unconditionally.
    #[must_use]
    pub fn rewrite(&self, text: &str, source_path: &Path) -> RewriteOutcome {
        let host_slug = host_parent_slug(source_path);
        let refs = extract_refs(text);

        // One resolution (and at most one warning) per unique key.
        let mut resolutions: HashMap<(String, ImageKind), Option<(String, Option<AssetInfo>)>> =
            HashMap::new();
        let mut broken = Vec::new();
        for image in &refs {
            let key = (image.path.clone(), image.kind);
            if resolutions.contains_key(&key) {
                continue;
            }
            let name = resolve_name(&image.path, &host_slug);
            let resolution = self.find_asset(&name).map(|info| (name, info));
            if resolution.is_none() {
                tracing::warn!(
                    link = %image.path,
                    document = %source_path.display(),
                    "Broken image reference removed"
                );
                broken.push(image.path.clone());
            }
            resolutions.insert(key, resolution);
        }

        let mut output = text.to_owned();
        for image in &refs {
            match resolutions.get(&(image.path.clone(), image.kind)) {
                Some(Some((name, info))) => {
                    let replacement = self.render_reference(image, name, info.as_ref());
                    output = output.replace(&image.raw, &replacement);
                }
                _ => {
                    output = output.replace(&image.raw, "");
                }
            }
        }

        let output = HTML_COMMENT.replace_all(&output, "").into_owned();
        RewriteOutcome {
            text: output,
            broken,
        }
    }

    /// Registry first, then on-disk fallback without metadata.
    fn find_asset(&self, name: &str) -> Option<Option<AssetInfo>> {
        if let Some(info) = self.registry.lookup(name) {
            return Some(Some(info));
        }
        let dir = self.assets_dir.as_ref()?;
        dir.join(name).is_file().then_some(None)
    }

    fn render_reference(&self, image: &ImageRef, name: &str, info: Option<&AssetInfo>) -> String {
        let url = format!("{}/{name}", self.asset_base);
        match info {
            // Explicit dimensions keep the page layout stable while the
            // image loads.
            Some(info) => format!(
                r#"<img src="{url}" alt="{}" width="{}" height="{}">"#,
                image.alt, info.width, info.height
            ),
            None => match image.kind {
                ImageKind::Markdown => format!("![{}]({url})", image.alt),
                ImageKind::Html => format!(r#"<img src="{url}" alt="{}">"#, image.alt),
            },
        }
    }
}

/// Extract all image references in document order, Markdown form first.
fn extract_refs(text: &str) -> Vec<ImageRef> {
    let mut refs = Vec::new();
    for caps in MARKDOWN_IMAGE.captures_iter(text) {
        refs.push(ImageRef {
            raw: caps[0].to_owned(),
            path: caps[2].to_owned(),
            kind: ImageKind::Markdown,
            alt: caps[1].to_owned(),
        });
    }
    for caps in HTML_IMAGE.captures_iter(text) {
        let Some(path) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        refs.push(ImageRef {
            raw: caps[0].to_owned(),
            path: path.as_str().to_owned(),
            kind: ImageKind::Html,
            alt: html_alt(&caps[0]),
        });
    }
    refs
}

/// Pull the alt attribute out of a raw `<img>` tag, if present.
fn html_alt(tag: &str) -> String {
    static ALT: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"\balt\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());
    ALT.captures(tag)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map_or_else(String::new, |m| m.as_str().to_owned())
}

/// Processed-asset name for a link target.
///
/// Multi-segment links take their slug from the link's own last directory;
/// single-segment links fall back to the hosting document's parent directory.
/// Either way the ordering prefix is stripped and the result lower-cased.
fn resolve_name(link: &str, host_slug: &str) -> String {
    let trimmed = link
        .trim_start_matches("./")
        .trim_start_matches('/');
    let (dirs, filename) = match trimmed.rsplit_once('/') {
        Some((dirs, filename)) => (Some(dirs), filename),
        None => (None, trimmed),
    };
    let slug = dirs.map_or_else(
        || host_slug.to_owned(),
        |dirs| {
            let last = dirs.rsplit('/').next().unwrap_or(dirs);
            strip_order_prefix(last).1.to_lowercase()
        },
    );
    format!("{slug}-{filename}").to_lowercase()
}

/// Slug of the hosting document's parent directory.
fn host_parent_slug(source_path: &Path) -> String {
    source_path
        .parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .map_or_else(String::new, |dir| strip_order_prefix(dir).1.to_lowercase())
}
