//! Frontmatter parsing.
//!
//! Content files may start with a YAML block fenced by `---` lines. The
//! metadata is a flat string map for navigation purposes; richer values are
//! flattened to their YAML scalar representation.

use std::collections::HashMap;

/// Frontmatter delimiter line.
const FENCE: &str = "---";

/// Parsed frontmatter metadata for one content file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frontmatter {
    fields: HashMap<String, String>,
}

impl Frontmatter {
    /// Split raw file text into frontmatter and body.
    ///
    /// A file without a leading `---` fence has empty frontmatter and the
    /// whole text as body. A malformed YAML block is treated as empty
    /// frontmatter (logged, not an error) — the page still exists, it just
    /// won't reach navigation without a title.
    #[must_use]
    pub fn parse(raw: &str) -> (Self, &str) {
        let Some(rest) = raw.strip_prefix(FENCE) else {
            return (Self::default(), raw);
        };
        // The fence must be a full line.
        let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
            return (Self::default(), raw);
        };

        let Some(end) = find_closing_fence(rest) else {
            return (Self::default(), raw);
        };
        let (yaml, body) = rest.split_at(end);
        let body = body
            .trim_start_matches(FENCE)
            .trim_start_matches(['\r', '\n']);

        if yaml.trim().is_empty() {
            return (Self::default(), body);
        }

        match serde_yaml::from_str::<HashMap<String, serde_yaml::Value>>(yaml) {
            Ok(values) => {
                let fields = values
                    .into_iter()
                    .filter_map(|(k, v)| scalar_to_string(&v).map(|s| (k, s)))
                    .collect();
                (Self { fields }, body)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed frontmatter, treating as empty");
                (Self::default(), body)
            }
        }
    }

    /// Get a metadata field by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Resolve the navigation title: `menuTitle` falls back to `title`.
    ///
    /// Returns `None` when neither field is present; such nodes are excluded
    /// from navigation.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get("menuTitle").or_else(|| self.get("title"))
    }

    /// True when no fields were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Find the byte offset of the closing `---` fence line in `text`.
fn find_closing_fence(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Render a YAML scalar as a plain string. Non-scalar values are skipped.
fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
