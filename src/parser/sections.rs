use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::normalize::{collapse_whitespace, strip_markup};

static HEADING_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<strong class="mfn-heading-[12]">"#).unwrap());
static SECTION_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<strong class="mfn-heading|<div class="mfn-footer"#).unwrap());

const HEADING_CLOSE: &str = "</strong>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub text: String,
}

/// Split the document on heading markers into (heading, body) pairs, in
/// document order. A body runs to the next heading or footer; headings with
/// nothing under them are dropped.
pub fn split_sections(html: &str) -> Vec<Section> {
    let mut sections = Vec::new();

    for part in HEADING_OPEN_RE.split(html).skip(1) {
        let (raw_heading, rest) = split_heading(part);
        let heading = collapse_whitespace(&strip_markup(raw_heading));
        if heading.is_empty() {
            continue;
        }

        let body = match SECTION_END_RE.find(rest) {
            Some(m) => &rest[..m.start()],
            None => rest,
        };
        let text = strip_markup(body);
        if text.is_empty() {
            continue;
        }

        sections.push(Section { heading, text });
    }

    sections
}

// Unterminated headings end at the next tag, or run to the end of input.
fn split_heading(part: &str) -> (&str, &str) {
    if let Some(end) = part.find(HEADING_CLOSE) {
        return (&part[..end], &part[end + HEADING_CLOSE.len()..]);
    }
    match part.find('<') {
        Some(end) => (&part[..end], &part[end..]),
        None => (part, ""),
    }
}
