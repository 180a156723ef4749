//! Recursive content tree walking.
//!
//! The walker visits a section root directory, locates at most one content
//! file per directory, classifies it, and collects flat [`ContentNode`]
//! records plus a side list of sibling image files. Subdirectory visits run
//! in parallel; each branch returns its own [`WalkOutcome`] which the caller
//! merges, so no shared mutable state exists during the walk.
//!
//! Directory entries are sorted by name before matching, which makes the
//! "first content file wins" rule deterministic across filesystems. Extra
//! candidates are recorded in [`WalkOutcome::ambiguous`] and logged.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::classifier::{classify, is_content_file};
use crate::error::WalkError;
use crate::frontmatter::Frontmatter;

/// File extensions collected into the image side list.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Walk configuration.
///
/// `max_depth` bounds how many directory levels below the section root are
/// visited; it equals the deepest node level the walk can produce. Plain
/// article trees use 3, connector-style trees nest to 5.
#[derive(Clone, Copy, Debug)]
pub struct WalkOptions {
    /// Maximum node level to descend to.
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

impl WalkOptions {
    /// Create options with an explicit depth bound.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

/// One content file discovered during a walk.
///
/// Immutable after creation; the flat record list is the sole input to
/// navigation building.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentNode {
    /// Navigation title resolved from frontmatter.
    pub title: String,
    /// Absolute slug, e.g. `/platform/getting-started/overview`.
    pub slug: String,
    /// Slug with the last segment removed.
    pub parent_slug: String,
    /// Depth below the section root, minimum 1.
    pub level: usize,
    /// Sibling sort key from the parent directory's ordering prefix.
    pub order: u32,
    /// Content root name.
    pub section: String,
    /// On-disk path of the content file.
    pub source_path: PathBuf,
}

/// Image file found next to content, handed to the asset pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    /// On-disk path of the image.
    pub path: PathBuf,
}

/// Aggregated result of one walk.
#[derive(Clone, Debug, Default)]
pub struct WalkOutcome {
    /// Flat per-node records, one per titled content file.
    pub nodes: Vec<ContentNode>,
    /// Side list of sibling images, collected regardless of whether the
    /// directory is a content node.
    pub images: Vec<ImageFile>,
    /// Extra content-file candidates that were ignored because their
    /// directory already had one. Detectable ambiguity, not an error.
    pub ambiguous: Vec<PathBuf>,
}

impl WalkOutcome {
    fn merge(&mut self, other: Self) {
        self.nodes.extend(other.nodes);
        self.images.extend(other.images);
        self.ambiguous.extend(other.ambiguous);
    }
}

/// Walk one section root and collect flat node records.
///
/// # Arguments
///
/// * `root` - Directory of the content root (e.g. `content/platform`)
/// * `section` - Content root name used in slugs (e.g. `"platform"`)
/// * `options` - Depth bound
///
/// # Errors
///
/// Returns [`WalkError`] when the root is missing or any directory or
/// content file cannot be read. Errors abort the whole walk; no partial
/// outcome is returned.
pub fn walk_section(
    root: &Path,
    section: &str,
    options: WalkOptions,
) -> Result<WalkOutcome, WalkError> {
    if !root.is_dir() {
        return Err(WalkError::MissingRoot(root.to_path_buf()));
    }
    let outcome = visit_dir(root, Path::new(section), 0, options)?;
    tracing::debug!(
        section,
        node_count = outcome.nodes.len(),
        image_count = outcome.images.len(),
        "Section walk completed"
    );
    Ok(outcome)
}

/// Visit one directory, then recurse into subdirectories in parallel.
///
/// `rel` is the classification path for this directory, rooted at the
/// section name (e.g. `platform/10.foo`). `depth` is 0 at the section root.
fn visit_dir(
    dir: &Path,
    rel: &Path,
    depth: usize,
    options: WalkOptions,
) -> Result<WalkOutcome, WalkError> {
    let entries = fs::read_dir(dir).map_err(|source| WalkError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    // Sort by name so "first match" is deterministic across filesystems.
    let mut entries: Vec<_> = entries
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| WalkError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
    entries.sort_by_key(fs::DirEntry::file_name);

    let mut outcome = WalkOutcome::default();
    let mut subdirs: Vec<(PathBuf, PathBuf)> = Vec::new();
    let mut content_file: Option<PathBuf> = None;

    for entry in &entries {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            subdirs.push((path, rel.join(name)));
        } else if is_image_file(name) {
            outcome.images.push(ImageFile { path });
        } else if is_content_file(name) {
            if content_file.is_some() {
                tracing::warn!(
                    path = %path.display(),
                    "Ignoring additional content file, directory already has one"
                );
                outcome.ambiguous.push(path);
            } else {
                content_file = Some(path);
            }
        }
    }

    if let Some(path) = content_file {
        let rel_file = rel.join(path.file_name().unwrap_or_default());
        if let Some(node) = load_node(&path, &rel_file)? {
            outcome.nodes.push(node);
        }
    }

    // Depth bound: children of this directory sit at depth + 1.
    if depth + 1 <= options.max_depth {
        let sub_outcomes = subdirs
            .into_par_iter()
            .map(|(path, sub_rel)| visit_dir(&path, &sub_rel, depth + 1, options))
            .collect::<Result<Vec<_>, _>>()?;
        for sub in sub_outcomes {
            outcome.merge(sub);
        }
    }

    Ok(outcome)
}

/// Read and classify one content file. Returns `None` when the file carries
/// no usable title or the path does not classify.
fn load_node(path: &Path, rel_file: &Path) -> Result<Option<ContentNode>, WalkError> {
    let Some(classified) = classify(rel_file) else {
        return Ok(None);
    };

    let raw = fs::read_to_string(path).map_err(|source| WalkError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let (frontmatter, _body) = Frontmatter::parse(&raw);

    let Some(title) = frontmatter.title() else {
        // Untitled pages exist but never reach navigation.
        return Ok(None);
    };

    Ok(Some(ContentNode {
        title: title.to_owned(),
        slug: classified.slug,
        parent_slug: classified.parent_slug,
        level: classified.level,
        order: classified.order,
        section: classified.section,
        source_path: path.to_path_buf(),
    }))
}

fn is_image_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
