use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Turn a markup fragment into plain text.
///
/// Every tag becomes a newline so adjacent cells never glue words together,
/// a handful of entities are decoded, and runs of blank lines collapse to one.
pub fn strip_markup(markup: &str) -> String {
    let text = TAG_RE.replace_all(markup, "\n");
    let text = decode_entities(&text);
    BLANK_RUN_RE.replace_all(&text, "\n\n").trim().to_string()
}

/// Collapse all whitespace (newlines included) to single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    SPACE_RUN_RE.replace_all(s.trim(), " ").to_string()
}

// `&amp;` goes last so "&amp;lt;" decodes once, to "&lt;".
fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
