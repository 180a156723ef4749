//! Image reference rewriting.
//!
//! Documents embed images as `![alt](path)` or `<img src="path">` relative
//! to their own directory. Before rendering, [`ImageRewriter`] resolves each
//! reference to a processed-asset name, checks it against an
//! [`AssetRegistry`] (and optionally the optimized-assets directory on
//! disk), and rewrites the reference in place. References that resolve to
//! nothing are stripped and reported so a build never ships dead image tags.

mod registry;
mod rewriter;

pub use registry::{AssetInfo, AssetRegistry, InMemoryAssetRegistry};
pub use rewriter::{ImageKind, ImageRewriter, RewriteOutcome};
