use std::sync::LazyLock;

use regex::Regex;

static EMAIL_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:E-?mail:\s*)?[\w.+-]+@[\w.-]+\.\w+$").unwrap());
static PHONE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:Phone:\s*|Tel(?:efon)?:\s*)?[+0][\s()\d-]{7,}").unwrap());
static PHONE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:Phone|Tel(?:efon)?):\s*").unwrap());
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w.-]+\.\w+").unwrap());
static INLINE_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s,:])([+0][\s()\d-]{7,})").unwrap());
static NAME_WITH_ROLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\p{Lu}[\w\s.-]{1,50}),\s*(.+)$").unwrap());
static DEPARTMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:Mediakontakt|Företagskontakt|Investor Relations|Pressansvarig|Press\s*contact|Media\s*contact|Communications?\s*Department)",
    )
    .unwrap()
});
static FIELD_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:E-?mail|Phone|Tel(?:efon)?):\s*$").unwrap());
static OPENER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:FOR MORE|For (?:further|additional) information|För (?:mer|ytterligare|vidare)|KONTAKT|Contact)")
        .unwrap()
});
static BARE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{Lu}[\w\s.-]+$").unwrap());
static ROLE_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:VD|CEO|CFO|CTO|COO|VP|IR)\b|Head|Chief|Director|Chef|direktör|ansvarig|ordförande|Chairman|Manager|Officer|Investor|Communications)",
    )
    .unwrap()
});
static TITLE_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:CEO|CFO|CTO|COO|VD|VP|Head|Chief|Director|Chef|Kommunikation|Finans)").unwrap()
});

const MAX_LINE_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    NameWithRole,
    Email,
    Phone,
    DepartmentHeader,
    Capitalized,
    Noise,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub tag: LineTag,
}

impl Line {
    pub fn new(text: &str) -> Self {
        Line {
            text: text.to_string(),
            tag: classify(text),
        }
    }

    pub fn is_detail(&self) -> bool {
        matches!(self.tag, LineTag::Email | LineTag::Phone)
    }

    /// True for lines that can start a new contact entry: capitalized text
    /// that is not an email, phone, or bare field label.
    pub fn opens_entry(&self) -> bool {
        matches!(
            self.tag,
            LineTag::NameWithRole | LineTag::DepartmentHeader | LineTag::Capitalized
        )
    }
}

/// A named classification rule. Rules are tried in table order and the
/// first match decides the tag.
pub struct Rule {
    pub name: &'static str,
    pub tag: LineTag,
    pub matches: fn(&str) -> bool,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "email",
        tag: LineTag::Email,
        matches: is_email,
    },
    Rule {
        name: "phone",
        tag: LineTag::Phone,
        matches: is_phone,
    },
    Rule {
        name: "name_with_role",
        tag: LineTag::NameWithRole,
        matches: is_name_with_role,
    },
    Rule {
        name: "department_header",
        tag: LineTag::DepartmentHeader,
        matches: is_department_header,
    },
    Rule {
        name: "capitalized",
        tag: LineTag::Capitalized,
        matches: is_capitalized,
    },
];

pub fn classify(line: &str) -> LineTag {
    RULES
        .iter()
        .find(|r| (r.matches)(line))
        .map(|r| r.tag)
        .unwrap_or(LineTag::Noise)
}

/// Split a normalized block into classified lines, dropping separators and
/// "for more information" style openers.
pub fn split_block(text: &str) -> Vec<Line> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_separator(l) && !OPENER_RE.is_match(l))
        .map(Line::new)
        .collect()
}

fn is_separator(line: &str) -> bool {
    line.chars().all(|c| c == '-') || line.chars().all(|c| c == '_')
}

pub fn is_email(line: &str) -> bool {
    EMAIL_LINE_RE.is_match(line)
}

pub fn is_phone(line: &str) -> bool {
    PHONE_LINE_RE.is_match(line)
}

pub fn is_name_with_role(line: &str) -> bool {
    line.chars().count() <= MAX_LINE_CHARS && NAME_WITH_ROLE_RE.is_match(line)
}

pub fn is_department_header(line: &str) -> bool {
    DEPARTMENT_RE.is_match(line)
}

pub fn is_field_label(line: &str) -> bool {
    FIELD_LABEL_RE.is_match(line)
}

pub fn is_capitalized(line: &str) -> bool {
    starts_upper(line) && !is_field_label(line)
}

fn starts_upper(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_uppercase)
}

/// A line that is nothing but a name: capitalized words, dots and hyphens.
pub fn is_bare_name(line: &str) -> bool {
    BARE_NAME_RE.is_match(line)
}

/// The line mentions a recognizable job title anywhere in it.
pub fn looks_like_role(line: &str) -> bool {
    ROLE_KEYWORD_RE.is_match(line)
}

/// The line opens with a title word, as role lines under a department header do.
pub fn is_title_word(line: &str) -> bool {
    TITLE_WORD_RE.is_match(line)
}

/// Split a "Name, Role" line into its two trimmed halves.
pub fn name_and_role(line: &str) -> Option<(String, String)> {
    if line.chars().count() > MAX_LINE_CHARS {
        return None;
    }
    let caps = NAME_WITH_ROLE_RE.captures(line)?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

/// First email address anywhere in `s`.
pub fn email_in(s: &str) -> Option<&str> {
    EMAIL_RE.find(s).map(|m| m.as_str())
}

/// First phone number in free text, trimmed.
pub fn phone_in(s: &str) -> Option<&str> {
    INLINE_PHONE_RE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Phone line without its "Phone:" / "Tel:" label.
pub fn phone_value(line: &str) -> String {
    PHONE_LABEL_RE.replace(line, "").trim().to_string()
}

/// Email line reduced to the bare address.
pub fn email_value(line: &str) -> String {
    email_in(line).unwrap_or(line).to_string()
}
