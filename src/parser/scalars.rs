use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use super::locate::{self, Located, ABOUT_LOCATORS, REGULATORY_LOCATORS};
use super::normalize::strip_markup;

static ADVISER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(?i:certified adviser)[:\s]*\n(.*?)(?:\n\n|\bOm |\bAbout |\z)").unwrap()
});
static PUBLISHED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2})(?:\s+kl\.?)?\s+(\d{1,2})[:.](\d{2})").unwrap()
});

/// Text following a "Certified Adviser" label in the normalized document,
/// up to the next blank line or About/Om section.
pub fn certified_adviser(text: &str) -> Option<String> {
    ADVISER_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

pub fn about_company(html: &str) -> Option<String> {
    locate::locate(html, ABOUT_LOCATORS).map(footer_text)
}

pub fn regulatory_disclosure(html: &str) -> Option<String> {
    locate::locate(html, REGULATORY_LOCATORS).map(footer_text)
}

/// Plain text of an already located footer.
pub fn footer_text(found: Located<'_>) -> String {
    strip_markup(found.markup)
}

/// Publication time stated in a regulatory disclosure, e.g.
/// "... för offentliggörande den 2024-05-08 08:00 CET". The zone is dropped.
pub fn disclosure_published_at(disclosure: &str) -> Option<NaiveDateTime> {
    let caps = PUBLISHED_RE.captures(disclosure)?;
    let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
    let hour = caps[2].parse().ok()?;
    let minute = caps[3].parse().ok()?;
    date.and_hms_opt(hour, minute, 0)
}
