//! Build orchestration across walker, navigation, images, and rendering.

use std::fs;
use std::path::{Path, PathBuf};

use dw_content::{Frontmatter, ImageFile, WalkError, WalkOptions, classify, walk_section};
use dw_images::{AssetRegistry, ImageRewriter};
use dw_nav::{NavError, NavItem, build_navigation, write_nav_config};
use dw_render::PageRenderer;
use dw_toc::TocNode;

use crate::config::Config;

/// Error during a site build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Section traversal failed.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// Navigation artifact could not be produced.
    #[error(transparent)]
    Nav(#[from] NavError),
    /// Requested section is not in the configuration.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
    /// Requested page path does not classify as a content file.
    #[error("Not a content file: {}", .0.display())]
    NotContent(PathBuf),
    /// Page source could not be read.
    #[error("Failed to read page {}: {source}", .path.display())]
    ReadPage {
        /// Page source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Output directory could not be created.
    #[error("Failed to create output dir {}: {source}", .path.display())]
    CreateDir {
        /// Output directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result of building one section.
#[derive(Debug)]
pub struct SectionBuild {
    /// Navigation tree written to the section's artifact.
    pub nav: Vec<NavItem>,
    /// Image files found beside content, for the asset pipeline.
    pub images: Vec<ImageFile>,
}

/// One fully built page.
#[derive(Debug)]
pub struct BuiltPage {
    /// Canonical slug of the page.
    pub slug: String,
    /// Page title from frontmatter, or the first H1 as fallback.
    pub title: Option<String>,
    /// Rendered body HTML.
    pub html: String,
    /// Page outline.
    pub toc: TocNode,
    /// Image references that resolved to no known asset.
    pub broken_images: Vec<String>,
}

/// Orchestrates section and page builds over injected collaborators.
///
/// The asset registry and renderer are passed in rather than constructed
/// here, so builds against fixtures and alternative backends need no global
/// state.
pub struct SiteBuilder<'a> {
    config: &'a Config,
    registry: &'a dyn AssetRegistry,
    renderer: &'a dyn PageRenderer,
}

impl<'a> SiteBuilder<'a> {
    /// Create a builder over the given collaborators.
    #[must_use]
    pub fn new(
        config: &'a Config,
        registry: &'a dyn AssetRegistry,
        renderer: &'a dyn PageRenderer,
    ) -> Self {
        Self {
            config,
            registry,
            renderer,
        }
    }

    /// Build one section: walk it and write its navigation artifact.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when the section is unknown, the walk fails,
    /// or the artifact cannot be written. A failed walk writes nothing.
    pub fn build_section(&self, name: &str) -> Result<SectionBuild, BuildError> {
        let section = self
            .config
            .section(name)
            .ok_or_else(|| BuildError::UnknownSection(name.to_owned()))?;

        let root = self.config.content_dir.join(&section.name);
        let outcome = walk_section(
            &root,
            &section.name,
            WalkOptions::with_max_depth(section.max_depth),
        )?;
        let nav = build_navigation(&outcome.nodes);

        fs::create_dir_all(&self.config.nav_dir).map_err(|source| BuildError::CreateDir {
            path: self.config.nav_dir.clone(),
            source,
        })?;
        let artifact = self.config.nav_dir.join(format!("{name}.json"));
        write_nav_config(&artifact, &nav)?;

        tracing::info!(
            section = name,
            nodes = outcome.nodes.len(),
            images = outcome.images.len(),
            "Section built"
        );
        Ok(SectionBuild {
            nav,
            images: outcome.images,
        })
    }

    /// Build one page from its path relative to the content directory.
    ///
    /// Reads the source, splits frontmatter, rewrites image references, and
    /// renders. The frontmatter title wins over the first H1; a page with
    /// neither still builds, it just carries no title.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotContent`] when the path does not classify
    /// as a content file, or [`BuildError::ReadPage`] when it cannot be
    /// read.
    pub fn build_page(&self, rel_path: &Path) -> Result<BuiltPage, BuildError> {
        let classified =
            classify(rel_path).ok_or_else(|| BuildError::NotContent(rel_path.to_path_buf()))?;

        let source = self.config.content_dir.join(rel_path);
        let raw = fs::read_to_string(&source).map_err(|source_err| BuildError::ReadPage {
            path: source.clone(),
            source: source_err,
        })?;
        let (frontmatter, body) = Frontmatter::parse(&raw);

        let mut rewriter =
            ImageRewriter::new(self.registry).with_asset_base(self.config.assets.base.clone());
        if let Some(dir) = &self.config.assets.dir {
            rewriter = rewriter.with_assets_dir(dir);
        }
        let rewritten = rewriter.rewrite(body, &source);

        let page = self.renderer.render(&rewritten.text);
        let title = frontmatter
            .title()
            .map(ToOwned::to_owned)
            .or(page.title);

        Ok(BuiltPage {
            slug: classified.slug,
            title,
            html: page.html,
            toc: page.toc,
            broken_images: rewritten.broken,
        })
    }

    /// Build every configured section, failing on the first error.
    ///
    /// # Errors
    ///
    /// Propagates the first section's [`BuildError`]; later sections are not
    /// attempted.
    pub fn build_all(&self) -> Result<Vec<(String, SectionBuild)>, BuildError> {
        let mut built = Vec::with_capacity(self.config.sections.len());
        for section in &self.config.sections {
            let build = self.build_section(&section.name)?;
            built.push((section.name.clone(), build));
        }
        Ok(built)
    }
}
