pub mod contacts;
pub mod lines;
pub mod locate;
pub mod normalize;
pub mod scalars;
pub mod sections;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use contacts::Contact;
use locate::{ABOUT_LOCATORS, CONTACT_LOCATORS, REGULATORY_LOCATORS};
use sections::Section;

/// Everything the extractor could recover from one press release.
/// Fields that were not found are `None`, never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    pub contacts: Vec<Contact>,
    pub about_company: Option<String>,
    pub certified_adviser: Option<String>,
    pub regulatory_disclosure: Option<String>,
    pub sections: Vec<Section>,
}

impl ExtractedContent {
    pub fn disclosure_published_at(&self) -> Option<NaiveDateTime> {
        self.regulatory_disclosure
            .as_deref()
            .and_then(scalars::disclosure_published_at)
    }
}

/// Which locator strategies fired during one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    pub contacts: Option<&'static str>,
    pub about: Option<&'static str>,
    pub regulatory: Option<&'static str>,
    pub contact_lines: usize,
    pub patterns: Vec<&'static str>,
}

/// markup → normalized text → located blocks → contacts, sections, scalars.
pub fn extract_content(html: &str) -> ExtractedContent {
    extract_traced(html).0
}

pub fn extract_traced(html: &str) -> (ExtractedContent, Trace) {
    let mut trace = Trace::default();

    let contact_block = locate::locate(html, CONTACT_LOCATORS);
    trace.contacts = contact_block.map(|b| b.strategy);
    let text = contact_block
        .map(|b| normalize::strip_markup(b.markup))
        .unwrap_or_default();
    let lines = lines::split_block(&text);
    trace.contact_lines = lines.len();
    let (assembled, _) = contacts::assemble(&lines);
    trace.patterns = assembled.iter().map(|a| a.pattern).collect();

    let about = locate::locate(html, ABOUT_LOCATORS);
    trace.about = about.map(|b| b.strategy);
    let regulatory = locate::locate(html, REGULATORY_LOCATORS);
    trace.regulatory = regulatory.map(|b| b.strategy);

    let content = ExtractedContent {
        contacts: assembled.into_iter().map(|a| a.contact).collect(),
        about_company: about.map(scalars::footer_text),
        certified_adviser: scalars::certified_adviser(&normalize::strip_markup(html)),
        regulatory_disclosure: regulatory.map(scalars::footer_text),
        sections: sections::split_sections(html),
    };

    (content, trace)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    fn names(content: &ExtractedContent) -> Vec<&str> {
        content.contacts.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn empty_input() {
        let (content, trace) = extract_traced("");
        assert_eq!(content, ExtractedContent::default());
        assert!(content.contacts.is_empty());
        assert!(content.about_company.is_none());
        assert!(content.certified_adviser.is_none());
        assert!(content.regulatory_disclosure.is_none());
        assert!(content.sections.is_empty());
        assert_eq!(trace, Trace::default());
    }

    #[test]
    fn garbage_input_does_not_panic() {
        for input in ["<", ">>><<<", "<div class=\"mfn-footer", "&amp;&amp;", "\u{0}\u{feff}<p"] {
            let _ = extract_content(input);
        }
    }

    #[test]
    fn egetis_labeled_footer() {
        let (content, trace) = extract_traced(&fixture("egetis"));
        assert_eq!(trace.contacts, Some("labeled_contacts_footer"));
        assert_eq!(names(&content), vec!["Nicklas Westerholm", "Karl Hård"]);

        let karl = &content.contacts[1];
        assert_eq!(karl.role.as_deref(), Some("Head of Investor Relations & BD"));
        assert_eq!(karl.email.as_deref(), Some("karl.hard@egetis.com"));
        assert_eq!(karl.phone.as_deref(), Some("+46 (0) 733 944 700"));

        let about = content.about_company.as_deref().unwrap();
        assert!(about.starts_with("About Egetis Therapeutics"));
        assert!(about.ends_with("rare diseases."));
        assert!(content
            .regulatory_disclosure
            .as_deref()
            .unwrap()
            .starts_with("This information is information that Egetis"));
        assert!(content.certified_adviser.is_none());
        assert_eq!(
            content.disclosure_published_at(),
            chrono::NaiveDate::from_ymd_opt(2024, 5, 8).and_then(|d| d.and_hms_opt(8, 0, 0))
        );
    }

    #[test]
    fn labeled_footer_wins_over_inline_contacts() {
        let content = extract_content(&fixture("egetis"));
        assert!(content.contacts.iter().all(|c| c.email.as_deref() != Some("ir@egetis.com")));
    }

    #[test]
    fn egetis_sections() {
        let content = extract_content(&fixture("egetis"));
        let headings: Vec<&str> = content.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Q1 Results", "Outlook"]);
        assert_eq!(content.sections[0].text, "Revenue grew 12 percent & margins improved.");
        assert!(content.sections[1].text.starts_with("The company expects continued growth."));
    }

    #[test]
    fn climeon_keyword_footer() {
        let (content, trace) = extract_traced(&fixture("climeon"));
        assert_eq!(trace.contacts, Some("keyword_footer"));
        assert_eq!(trace.patterns, vec!["name_with_role", "name_then_email"]);
        assert_eq!(
            content.contacts,
            vec![
                Contact {
                    name: "Lena Sundquist".into(),
                    role: Some("VD".into()),
                    email: Some("lena.sundquist@climeon.com".into()),
                    phone: Some("+46 70 567 89 01".into()),
                },
                Contact {
                    name: "Investerarkontakt".into(),
                    role: None,
                    email: Some("ir@climeon.com".into()),
                    phone: Some("+46 8 123 456 78".into()),
                },
            ]
        );
        assert_eq!(trace.about, Some("keyword_about_footer"));
        assert!(content.about_company.as_deref().unwrap().starts_with("Om Climeon"));
        assert_eq!(
            content.certified_adviser.as_deref(),
            Some("FNCA Sweden AB, info@fnca.se, +46 8 528 00 399")
        );
        assert!(content.regulatory_disclosure.is_none());
        // "Bakgrund" is followed only by a footer
        assert!(content.sections.is_empty());
    }

    #[test]
    fn sivers_bare_footer() {
        let (content, trace) = extract_traced(&fixture("sivers"));
        assert_eq!(trace.contacts, Some("bare_footer"));
        assert_eq!(
            trace.patterns,
            vec!["department_block", "department_block", "name_then_role"]
        );
        assert_eq!(names(&content), vec!["Anders Storm", "Erik Svensson", "Maria Lind"]);
        assert_eq!(content.contacts[0].role.as_deref(), Some("VD"));
        assert_eq!(content.contacts[0].phone.as_deref(), Some("+46 70 262 6390"));
        assert_eq!(content.contacts[1].phone, None);
        assert_eq!(content.contacts[2].role.as_deref(), Some("Communications Manager"));
        assert_eq!(content.contacts[2].phone.as_deref(), Some("+46 8 703 68 00"));
        assert!(content.about_company.is_none());
    }

    #[test]
    fn nattaro_inline_contacts() {
        let (content, trace) = extract_traced(&fixture("nattaro"));
        assert_eq!(trace.contacts, Some("inline_contact_heading"));
        assert_eq!(
            content.contacts,
            vec![Contact {
                name: "Mats Persson".into(),
                role: Some("VD".into()),
                email: Some("mats.persson@nattarolabs.se".into()),
                phone: Some("0708 39 42 00".into()),
            }]
        );
        assert_eq!(content.sections.len(), 1);
        assert_eq!(content.sections[0].heading, "Om Nattaro Labs");
    }

    #[test]
    fn footer_fields_match_traced_strategy() {
        for name in ["egetis", "climeon", "sivers", "nattaro"] {
            let html = fixture(name);
            let (content, trace) = extract_traced(&html);
            assert_eq!(trace.about.is_some(), content.about_company.is_some(), "{name}");
            assert_eq!(
                trace.regulatory.is_some(),
                content.regulatory_disclosure.is_some(),
                "{name}"
            );
            assert_eq!(content.about_company, scalars::about_company(&html), "{name}");
            assert_eq!(
                content.regulatory_disclosure,
                scalars::regulatory_disclosure(&html),
                "{name}"
            );
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        for name in ["egetis", "climeon", "sivers", "nattaro"] {
            let html = fixture(name);
            assert_eq!(extract_content(&html), extract_content(&html), "{name}");
        }
    }

    #[test]
    fn serializes_with_data_model_names() {
        let json = serde_json::to_value(extract_content("")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contacts": [],
                "aboutCompany": null,
                "certifiedAdviser": null,
                "regulatoryDisclosure": null,
                "sections": [],
            })
        );
    }
}
