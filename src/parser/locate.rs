use std::sync::LazyLock;

use regex::Regex;

static CONTACTS_FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="mfn-footer mfn-contacts[^"]*">(.*?)</div>\s*(?:\n<div|$)"#).unwrap()
});
static KEYWORD_FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div class="mfn-footer mfn-[a-f0-9]+">.*?(?:CONTACT|kontakta|INFORMATION).*?</div>"#)
        .unwrap()
});
static BARE_FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<div class="mfn-footer">\s*(?:<p>)?\s*(?:<span>)*\s*(?:<span>)*\s*(?:<strong>)?\s*(?:Mediakontakt|Företagskontakt|Investor Relations|Pressansvarig|Press\s*contact|Media\s*contact|CONTACT|kontakta|INFORMATION).*?</div>"#,
    )
    .unwrap()
});
static INLINE_CONTACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<strong[^>]*>(?:<[^>]+>)*[^<]*(?:kontakt[a-z]*|(?:please )?contact).*?</strong>(?:</p>)?\s*(.*?)(?:<div class="mfn-footer|<strong[^>]*class="mfn-heading|$)"#,
    )
    .unwrap()
});

static ABOUT_FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="mfn-footer mfn-about[^"]*">(.*?)</div>"#).unwrap()
});
static KEYWORD_ABOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<div class="mfn-footer mfn-[a-f0-9]+">\s*(?:<p>)?\s*(?:<strong[^>]*>)?\s*(?:Om |About ).*?</div>"#,
    )
    .unwrap()
});
static BARE_ABOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div class="mfn-footer">\s*(?:<p>)?\s*(?:<strong[^>]*>)?\s*(?:Om |About ).*?</div>"#)
        .unwrap()
});

static REGULATORY_FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="mfn-footer mfn-regulatory[^"]*">(.*?)</div>"#).unwrap()
});

/// One named strategy for finding a document region.
#[derive(Clone, Copy)]
pub struct Locator {
    pub name: &'static str,
    find: fn(&str) -> Option<&str>,
}

impl Locator {
    pub fn find<'a>(&self, html: &'a str) -> Option<&'a str> {
        (self.find)(html)
    }
}

/// The markup a locator selected, and which locator selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<'a> {
    pub strategy: &'static str,
    pub markup: &'a str,
}

/// Contact regions, strongest signal first.
pub const CONTACT_LOCATORS: &[Locator] = &[
    Locator { name: "labeled_contacts_footer", find: labeled_contacts_footer },
    Locator { name: "keyword_footer", find: keyword_footer },
    Locator { name: "bare_footer", find: bare_footer },
    Locator { name: "inline_contact_heading", find: inline_contact_heading },
];

pub const ABOUT_LOCATORS: &[Locator] = &[
    Locator { name: "labeled_about_footer", find: labeled_about_footer },
    Locator { name: "keyword_about_footer", find: keyword_about_footer },
    Locator { name: "bare_about_footer", find: bare_about_footer },
];

pub const REGULATORY_LOCATORS: &[Locator] = &[
    Locator { name: "labeled_regulatory_footer", find: labeled_regulatory_footer },
];

/// Run `locators` in order; the first one that matches wins and the rest are never tried.
pub fn locate<'a>(html: &'a str, locators: &[Locator]) -> Option<Located<'a>> {
    locators.iter().find_map(|l| {
        l.find(html).map(|markup| Located {
            strategy: l.name,
            markup,
        })
    })
}

fn group<'a>(re: &Regex, html: &'a str, idx: usize) -> Option<&'a str> {
    re.captures(html)
        .and_then(|caps| caps.get(idx))
        .map(|m| m.as_str())
}

fn labeled_contacts_footer(html: &str) -> Option<&str> {
    group(&CONTACTS_FOOTER_RE, html, 1)
}

fn keyword_footer(html: &str) -> Option<&str> {
    group(&KEYWORD_FOOTER_RE, html, 0)
}

fn bare_footer(html: &str) -> Option<&str> {
    group(&BARE_FOOTER_RE, html, 0)
}

fn inline_contact_heading(html: &str) -> Option<&str> {
    group(&INLINE_CONTACT_RE, html, 1)
}

fn labeled_about_footer(html: &str) -> Option<&str> {
    group(&ABOUT_FOOTER_RE, html, 1)
}

fn keyword_about_footer(html: &str) -> Option<&str> {
    group(&KEYWORD_ABOUT_RE, html, 0)
}

fn bare_about_footer(html: &str) -> Option<&str> {
    group(&BARE_ABOUT_RE, html, 0)
}

fn labeled_regulatory_footer(html: &str) -> Option<&str> {
    group(&REGULATORY_FOOTER_RE, html, 1)
}
