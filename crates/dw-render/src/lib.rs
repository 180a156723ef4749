//! Markdown-to-HTML page rendering.
//!
//! [`HtmlPageRenderer`] turns a transformed markdown document into HTML with
//! anchor ids injected into headings, extracts the page title from the first
//! H1, and derives the page outline. Heading ids in the HTML and anchors in
//! the outline come from the same per-document slug pass, so every outline
//! entry links to an element that exists on the page.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

use dw_toc::{SlugRegistry, TocNode, build_toc, collect_headings};

/// Rendered output for one page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    /// Page body HTML.
    pub html: String,
    /// Text of the first H1, if the document has one.
    pub title: Option<String>,
    /// Page outline.
    pub toc: TocNode,
}

/// Renders one transformed document into a [`RenderedPage`].
///
/// The trait seam lets the build pipeline swap the HTML backend without
/// touching traversal or navigation code.
pub trait PageRenderer {
    /// Render `markdown` into HTML, title, and outline.
    fn render(&self, markdown: &str) -> RenderedPage;
}

/// Default renderer backed by pulldown-cmark.
#[derive(Clone, Debug)]
pub struct HtmlPageRenderer {
    toc_depth: u8,
}

impl Default for HtmlPageRenderer {
    fn default() -> Self {
        Self { toc_depth: 3 }
    }
}

impl HtmlPageRenderer {
    /// Create a renderer with the default outline depth of 3.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum heading depth included in the outline.
    #[must_use]
    pub fn with_toc_depth(mut self, depth: u8) -> Self {
        self.toc_depth = depth;
        self
    }
}

impl PageRenderer for HtmlPageRenderer {
    fn render(&self, markdown: &str) -> RenderedPage {
        // Collect every heading so anchor ids stay aligned with the HTML
        // even when deep headings are excluded from the outline.
        let mut registry = SlugRegistry::new();
        let headings = collect_headings(markdown, 6, &mut registry);

        let title = headings
            .iter()
            .find(|h| h.depth == 1)
            .map(|h| h.text.clone());

        let outline: Vec<_> = headings
            .iter()
            .filter(|h| h.depth <= self.toc_depth)
            .cloned()
            .collect();
        let toc = build_toc(&outline);

        let html = render_html(markdown, &headings);

        RenderedPage { html, title, toc }
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render HTML, injecting the collected id into each heading.
///
/// Headings are matched by position: the event stream visits them in the
/// same order the collector did, skipping blockquoted ones on both sides.
fn render_html(markdown: &str, headings: &[dw_toc::Heading]) -> String {
    let mut blockquote_depth = 0usize;
    let mut next = 0usize;

    let events = Parser::new_ext(markdown, parser_options()).map(|event| match event {
        Event::Start(Tag::BlockQuote(kind)) => {
            blockquote_depth += 1;
            Event::Start(Tag::BlockQuote(kind))
        }
        Event::End(TagEnd::BlockQuote(kind)) => {
            blockquote_depth -= 1;
            Event::End(TagEnd::BlockQuote(kind))
        }
        Event::Start(Tag::Heading {
            level,
            classes,
            attrs,
            ..
        }) if blockquote_depth == 0 => {
            let id = headings.get(next).map(|h| CowStr::from(h.id.clone()));
            next += 1;
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            })
        }
        other => other,
    });

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, events);
    html
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(markdown: &str) -> RenderedPage {
        HtmlPageRenderer::new().render(markdown)
    }

    #[test]
    fn test_heading_ids_injected() {
        let page = render("## Getting Started\n");

        assert!(page.html.contains(r#"<h2 id="getting-started">"#));
    }

    #[test]
    fn test_title_from_first_h1() {
        let page = render("# My Page\n\n## Section\n");

        assert_eq!(page.title.as_deref(), Some("My Page"));
    }

    #[test]
    fn test_no_h1_means_no_title() {
        let page = render("## Only a section\n");

        assert_eq!(page.title, None);
    }

    #[test]
    fn test_toc_anchor_matches_html_id() {
        let page = render("## Install\n\ntext\n");

        assert_eq!(page.toc.items[0].url.as_deref(), Some("#install"));
        assert!(page.html.contains(r#"<h2 id="install">"#));
    }

    #[test]
    fn test_duplicate_headings_anchors_stay_aligned() {
        let page = render("## FAQ\n\n## FAQ\n");

        assert!(page.html.contains(r#"<h2 id="faq">"#));
        assert!(page.html.contains(r#"<h2 id="faq-1">"#));
        assert_eq!(page.toc.items[1].url.as_deref(), Some("#faq-1"));
    }

    #[test]
    fn test_deep_heading_gets_id_but_not_outline_entry() {
        let page = render("## A\n\n#### Deep\n");

        assert!(page.html.contains(r#"<h4 id="deep">"#));
        // Outline holds only the H2.
        assert_eq!(page.toc.items.len(), 1);
        assert!(page.toc.items[0].items.is_empty());
    }

    #[test]
    fn test_deep_heading_does_not_shift_later_anchors() {
        let page = render("## FAQ\n\n#### FAQ\n\n## FAQ\n");

        // Third heading is the second outline entry and keeps its html id.
        assert_eq!(page.toc.items[1].url.as_deref(), Some("#faq-2"));
        assert!(page.html.contains(r#"<h2 id="faq-2">"#));
    }

    #[test]
    fn test_blockquoted_heading_has_no_id() {
        let page = render("> ## Quoted\n");

        assert!(page.html.contains("<h2>Quoted</h2>"));
        assert!(page.toc.items.is_empty());
    }

    #[test]
    fn test_explicit_id_preserved() {
        let page = render("## Title {#custom}\n");

        assert!(page.html.contains(r#"<h2 id="custom">"#));
        assert_eq!(page.toc.items[0].url.as_deref(), Some("#custom"));
    }

    #[test]
    fn test_body_markdown_rendered() {
        let page = render("Some *emphasis* here.\n");

        assert!(page.html.contains("<em>emphasis</em>"));
        assert!(page.toc.items.is_empty());
        assert_eq!(page.title, None);
    }

    #[test]
    fn test_rendered_page_serializes_for_props() {
        let page = render("# Title\n\n## Section\n");

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["title"], "Title");
        assert_eq!(json["toc"]["items"][0]["url"], "#title");
        assert_eq!(json["toc"]["items"][0]["items"][0]["url"], "#section");
        assert!(json["html"].as_str().unwrap().contains("<h1"));
    }

    #[test]
    fn test_custom_toc_depth() {
        let page = HtmlPageRenderer::new()
            .with_toc_depth(2)
            .render("## Keep\n\n### Drop\n");

        assert_eq!(page.toc.items.len(), 1);
        assert!(page.toc.items[0].items.is_empty());
    }
}
