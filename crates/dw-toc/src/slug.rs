//! Per-document slug registry.

use std::collections::{HashMap, HashSet};

/// Assigns unique, URL-safe ids from heading text.
///
/// One registry per document: uniqueness counters must not leak between
/// pages, so callers create a fresh instance for every document instead of
/// sharing one.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    counts: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl SlugRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text` and return a unique id.
    ///
    /// Repeated inputs get incrementing suffixes: `faq`, `faq-1`, `faq-2`.
    /// A suffixed candidate that matches an id already handed out (literal
    /// "FAQ-1" after two "FAQ"s, or the reverse) keeps counting until free.
    pub fn assign(&mut self, text: &str) -> String {
        let base = slugify(text);
        loop {
            let count = self.counts.entry(base.clone()).or_insert(0);
            let candidate = if *count == 0 {
                base.clone()
            } else {
                format!("{base}-{count}")
            };
            *count += 1;
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Lower-case `text` and replace non-alphanumeric runs with single hyphens.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        "section".to_owned()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_basic_slug() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.assign("Getting Started"), "getting-started");
    }

    #[test]
    fn test_punctuation_collapsed() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.assign("What's new? (2026)"), "what-s-new-2026");
    }

    #[test]
    fn test_duplicates_get_suffixes() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.assign("FAQ"), "faq");
        assert_eq!(reg.assign("FAQ"), "faq-1");
        assert_eq!(reg.assign("FAQ"), "faq-2");
    }

    #[test]
    fn test_suffixed_candidate_never_reuses_issued_id() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.assign("FAQ"), "faq");
        assert_eq!(reg.assign("FAQ"), "faq-1");
        // Literal "FAQ-1" must not collide with the suffixed id above.
        assert_eq!(reg.assign("FAQ-1"), "faq-1-1");
    }

    #[test]
    fn test_literal_id_blocks_later_suffix() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.assign("FAQ-1"), "faq-1");
        assert_eq!(reg.assign("FAQ"), "faq");
        // The "-1" suffix is taken, counting continues.
        assert_eq!(reg.assign("FAQ"), "faq-2");
    }

    #[test]
    fn test_fresh_registry_resets_counters() {
        let mut first = SlugRegistry::new();
        first.assign("FAQ");
        first.assign("FAQ");

        let mut second = SlugRegistry::new();
        assert_eq!(second.assign("FAQ"), "faq");
    }

    #[test]
    fn test_empty_text_falls_back() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.assign("!!!"), "section");
        assert_eq!(reg.assign("???"), "section-1");
    }

    #[test]
    fn test_unicode_lowercased() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.assign("Конфигурация"), "конфигурация");
    }
}
