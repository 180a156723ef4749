//! Content tree discovery for the docweave documentation engine.
//!
//! A content tree is a directory hierarchy where sibling order is encoded in
//! directory names (`10.getting-started`, `20.reference`) and each directory
//! holds at most one content file (`docs.md` or `docs.mdx`). This crate
//! classifies those paths into canonical slugs, walks content roots into flat
//! [`ContentNode`] records, and parses frontmatter for page titles.
//!
//! Hierarchy is *derived*, never stored: a node's place in navigation follows
//! from its slug and parent slug alone, so the walker can visit directories
//! in any order (and does, in parallel).

mod classifier;
mod error;
mod frontmatter;
mod walker;

pub use classifier::{ClassifiedPath, classify, is_content_file, strip_order_prefix};
pub use error::WalkError;
pub use frontmatter::Frontmatter;
pub use walker::{ContentNode, ImageFile, WalkOptions, WalkOutcome, walk_section};
