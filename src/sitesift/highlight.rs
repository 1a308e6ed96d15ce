//! Literal, case-insensitive highlighting.
//!
//! The search term is user text, never a pattern: it is escaped before the matcher is built,
//! so `c++`, `(beta)` or `a.b` highlight exactly what they say.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::warn;

/// A piece of displayed text, either plain or a highlighted occurrence of the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    Plain(String),
    Match(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(t) | Segment::Match(t) => t,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Match(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// A highlighter for `term`. An empty term highlights nothing.
    pub fn new(term: &str) -> Self {
        if term.is_empty() {
            return Self::none();
        }
        let escaped = regex::escape(term);
        match RegexBuilder::new(&escaped).case_insensitive(true).build() {
            Ok(pattern) => Self {
                pattern: Some(pattern),
            },
            Err(e) => {
                warn!(term, error = %e, "could not build highlight pattern");
                Self::none()
            }
        }
    }

    pub fn none() -> Self {
        Self { pattern: None }
    }

    /// Splits `text` into plain and matched segments, in order.
    pub fn segments(&self, text: &str) -> Vec<Segment> {
        let Some(pattern) = &self.pattern else {
            return plain(text);
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::Plain(text[last..m.start()].to_string()));
            }
            segments.push(Segment::Match(m.as_str().to_string()));
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment::Plain(text[last..].to_string()));
        }
        segments
    }
}

/// Text with no highlighting.
pub fn plain(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::Plain(text.to_string())]
    }
}

/// Joins segments back to text, wrapping matches in `open`/`close` markers.
pub fn marked(segments: &[Segment], open: &str, close: &str) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Plain(t) => out.push_str(t),
            Segment::Match(t) => {
                out.push_str(open);
                out.push_str(t);
                out.push_str(close);
            }
        }
    }
    out
}

pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}
