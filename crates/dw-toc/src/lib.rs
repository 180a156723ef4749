//! Heading collection and table-of-contents derivation.
//!
//! A page's outline is built in two steps: [`collect_headings`] flattens the
//! markdown event stream into depth-tagged [`Heading`] records with unique
//! slugified ids, then [`build_toc`] reconstructs the nested outline,
//! normalizing the minimum depth and absorbing skipped heading levels.

mod collector;
mod slug;
mod tree;

pub use collector::{Heading, collect_headings};
pub use slug::SlugRegistry;
pub use tree::{TocNode, build_toc};
