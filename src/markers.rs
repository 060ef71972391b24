//! The explicit-index `{N}` notation used to tie together many-to-many
//! rewrites. Rather than leaving `{N}` scattered through ad hoc string
//! surgery at every call site, every rule field is parsed once into an
//! ordered list of [`Segment`]s - each segment is a run of literal
//! characters together with the label (if any) attached by a trailing
//! `{N}`.
//!
//! The surface notation (`{N}` inline in the `in`/`out` string) is kept
//! only so on-disk mapping files stay compatible with the convention the
//! wider grapheme-to-phoneme ecosystem uses; internally, everything
//! downstream works off [`Segment`] lists.

use once_cell::sync::Lazy;
use regex::Regex;

static INDEX_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([0-9]+)\}").unwrap());
static LABELED_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^0-9{}]+)\{([0-9]+)\}").unwrap());

/// One run of literal characters from a rule's `in`/`out` field, with the
/// explicit index label (if any) that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub label: Option<u32>,
}

/// Removes every `{N}` token, keeping the characters adjacent to it.
pub fn strip_index_markers(s: &str) -> String {
    INDEX_MARKER.replace_all(s, "").into_owned()
}

/// Whether `s` carries at least one explicit index marker.
pub fn has_index_markers(s: &str) -> bool {
    INDEX_MARKER.is_match(s)
}

/// Parses a raw (marker-bearing) rule field into an ordered sequence of
/// segments. A labeled run is a maximal sequence of non-digit, non-brace
/// characters immediately followed by `{N}`; any literal run without a
/// following marker becomes an unlabeled segment.
pub fn parse_segments(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0usize;
    for caps in LABELED_RUN.captures_iter(raw) {
        let whole = caps.get(0).unwrap();
        if whole.start() > last_end {
            segments.push(Segment {
                text: raw[last_end..whole.start()].to_string(),
                label: None,
            });
        }
        let text = caps.get(1).unwrap().as_str().to_string();
        let label: u32 = caps.get(2).unwrap().as_str().parse().unwrap();
        segments.push(Segment {
            text,
            label: Some(label),
        });
        last_end = whole.end();
    }
    if last_end < raw.len() {
        segments.push(Segment {
            text: raw[last_end..].to_string(),
            label: None,
        });
    }
    segments
}
