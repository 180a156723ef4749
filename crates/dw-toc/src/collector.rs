//! Flat heading collection from a markdown event stream.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::slug::SlugRegistry;

/// One heading encountered during a document traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    /// Heading level, 1 for H1 through 6 for H6.
    pub depth: u8,
    /// Concatenated text content.
    pub text: String,
    /// Unique slugified id within the document.
    pub id: String,
}

/// Parser options used for heading collection.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Collect document headings up to `max_depth`, in document order.
///
/// Headings nested inside blockquotes are excluded: the outline reflects the
/// document's own structure, not quoted material. Headings deeper than
/// `max_depth` are dropped entirely.
///
/// Ids come from `registry`, which must be fresh per document so identical
/// heading text on two pages does not cross-contaminate uniqueness counters.
/// A heading carrying an explicit id (`## Title {#custom}`) uses that id as
/// the slug input instead of its text.
///
/// # Example
///
/// ```
/// use dw_toc::{SlugRegistry, collect_headings};
///
/// let mut registry = SlugRegistry::new();
/// let headings = collect_headings("## Install\n\n### Linux\n", 3, &mut registry);
/// assert_eq!(headings.len(), 2);
/// assert_eq!(headings[0].id, "install");
/// ```
#[must_use]
pub fn collect_headings(markdown: &str, max_depth: u8, registry: &mut SlugRegistry) -> Vec<Heading> {
    let parser = Parser::new_ext(markdown, parser_options());

    let mut headings = Vec::new();
    let mut blockquote_depth = 0usize;
    // (depth, explicit id, accumulated text) for the heading being read.
    let mut current: Option<(u8, Option<String>, String)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::BlockQuote(_)) => blockquote_depth += 1,
            Event::End(TagEnd::BlockQuote(_)) => blockquote_depth -= 1,
            Event::Start(Tag::Heading { level, id, .. }) => {
                if blockquote_depth == 0 {
                    let explicit = id.map(|v| v.to_string());
                    current = Some((heading_level_to_num(level), explicit, String::new()));
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((depth, explicit, text)) = current.take()
                    && depth <= max_depth
                {
                    let slug_input = explicit.as_deref().unwrap_or(&text);
                    let id = registry.assign(slug_input);
                    headings.push(Heading { depth, text, id });
                }
            }
            Event::Text(t) => {
                if let Some((_, _, text)) = current.as_mut() {
                    text.push_str(&t);
                }
            }
            Event::Code(c) => {
                if let Some((_, _, text)) = current.as_mut() {
                    text.push_str(&c);
                }
            }
            _ => {}
        }
    }

    headings
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
