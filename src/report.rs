use crate::feed::Document;
use crate::parser::ExtractedContent;

const RULE_WIDTH: usize = 70;
const NO_HTML: &str = "No HTML content available for extraction.";

/// How much of the longer text fields to show.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub about_chars: usize,
    pub preview_chars: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            about_chars: 500,
            preview_chars: 200,
        }
    }
}

/// Human-readable report for one extracted release.
pub fn render(doc: &Document, content: &ExtractedContent, opts: ReportOptions) -> String {
    let mut out: Vec<String> = Vec::new();

    out.push("=".repeat(RULE_WIDTH));
    match &doc.item {
        Some(item) => {
            out.push(format!("Company: {}", or_dash(&item.author.name)));
            out.push(format!("Title:   {}", or_dash(&item.content.title)));
            let date = item
                .content
                .publish_date
                .map(|d| d.format("%Y-%m-%d %H:%M %:z").to_string())
                .unwrap_or_else(|| "-".into());
            out.push(format!("Date:    {}", date));
            out.push(format!(
                "Type:    {} | Lang: {}",
                item.properties.kind.as_deref().unwrap_or("-"),
                or_dash(&item.properties.lang)
            ));
            out.push(format!("Tags:    {}", or_dash(&item.properties.tags.join(", "))));
            if let Some(url) = &item.url {
                out.push(format!("URL:     {}", url));
            }
        }
        None => out.push(format!("Document: {}", doc.label)),
    }
    out.push("=".repeat(RULE_WIDTH));

    if doc.html.is_empty() {
        out.push(String::new());
        out.push(NO_HTML.into());
        return out.join("\n");
    }

    out.push(String::new());
    out.push(format!("--- Contacts ({}) ---", content.contacts.len()));
    if content.contacts.is_empty() {
        out.push("  (none found)".into());
    }
    for c in &content.contacts {
        out.push(format!("  Name:  {}", c.name));
        if let Some(role) = &c.role {
            out.push(format!("  Role:  {}", role));
        }
        if let Some(email) = &c.email {
            out.push(format!("  Email: {}", email));
        }
        if let Some(phone) = &c.phone {
            out.push(format!("  Phone: {}", phone));
        }
        out.push(String::new());
    }

    out.push("--- About Company ---".into());
    match &content.about_company {
        Some(about) => out.push(format!("  {}", truncate(about, opts.about_chars))),
        None => out.push("  (none found)".into()),
    }

    if let Some(adviser) = &content.certified_adviser {
        out.push(String::new());
        out.push("--- Certified Adviser ---".into());
        out.push(format!("  {}", adviser));
    }

    out.push(String::new());
    out.push("--- Regulatory Disclosure ---".into());
    match &content.regulatory_disclosure {
        Some(text) => {
            out.push(format!("  {}", text));
            if let Some(at) = content.disclosure_published_at() {
                out.push(format!("  Published: {}", at.format("%Y-%m-%d %H:%M")));
            }
        }
        None => out.push("  (none found)".into()),
    }

    out.push(String::new());
    out.push(format!("--- Sections ({}) ---", content.sections.len()));
    if content.sections.is_empty() {
        out.push("  (none found)".into());
    }
    for s in &content.sections {
        out.push(format!("  [{}]", s.heading));
        out.push(format!("  {}", truncate(&s.text, opts.preview_chars)));
        out.push(String::new());
    }

    if let Some(item) = &doc.item {
        let attachments = &item.content.attachments;
        out.push(format!("--- Attachments ({}) ---", attachments.len()));
        if attachments.is_empty() {
            out.push("  (none)".into());
        }
        for a in attachments {
            let title = if a.file_title.is_empty() {
                "(untitled)"
            } else {
                &a.file_title
            };
            out.push(format!("  {}", title));
            out.push(format!("  URL:  {}", a.url));
            out.push(format!("  Tags: {}", or_dash(&a.tags.join(", "))));
            out.push(String::new());
        }
    }

    out.join("\n")
}

/// Cut to at most `max` chars, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::parse_feed;
    use crate::parser::contacts::Contact;
    use crate::parser::extract_content;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Håkan", 10), "Håkan");
        assert_eq!(truncate("Håkan", 2), "Hå...");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn empty_result_reports_none_found() {
        let doc = Document::from_html("blank", "<p>Nothing to see.</p>");
        let text = render(&doc, &ExtractedContent::default(), ReportOptions::default());
        assert!(text.contains("Document: blank"));
        assert!(text.contains("--- Contacts (0) ---\n  (none found)"));
        assert!(text.contains("--- About Company ---\n  (none found)"));
        assert!(!text.contains("Certified Adviser"));
        assert!(!text.contains("Attachments"));
    }

    #[test]
    fn missing_html_prints_notice_only() {
        let json = r#"{ "news_id": "n2", "url": "https://mfn.se/a/acme/invite", "author": { "name": "Acme AB" }, "content": { "title": "Invite" } }"#;
        let doc = parse_feed(json).unwrap().remove(0);
        let text = render(&doc, &extract_content(&doc.html), ReportOptions::default());
        assert!(text.contains("Company: Acme AB"));
        assert!(text.contains("URL:     https://mfn.se/a/acme/invite"));
        assert!(text.ends_with("\n\nNo HTML content available for extraction."));
        assert!(!text.contains("--- Contacts"));
        assert!(!text.contains("Attachments"));
    }

    #[test]
    fn contact_fields_only_when_present() {
        let content = ExtractedContent {
            contacts: vec![Contact {
                name: "Press Desk".into(),
                role: None,
                email: Some("press@x.com".into()),
                phone: None,
            }],
            ..Default::default()
        };
        let doc = Document::from_html("x", "<p>x</p>");
        let text = render(&doc, &content, ReportOptions::default());
        assert!(text.contains("  Name:  Press Desk\n  Email: press@x.com\n"));
        assert!(!text.contains("Role:"));
        assert!(!text.contains("Phone:"));
    }

    #[test]
    fn feed_item_header_and_disclosure_time() {
        let json = r#"{
            "news_id": "n1",
            "author": { "name": "Egetis Therapeutics" },
            "properties": { "lang": "en", "type": "ir", "tags": [] },
            "content": {
                "title": "Q1 report",
                "publish_date": "2024-05-08T08:00:00+02:00",
                "html": "<div class=\"mfn-footer mfn-regulatory\"><p>Submitted for publication on 2024-05-08 08:00 CET.</p></div>"
            }
        }"#;
        let doc = parse_feed(json).unwrap().remove(0);
        let content = extract_content(&doc.html);
        let text = render(&doc, &content, ReportOptions::default());
        assert!(text.contains("Company: Egetis Therapeutics"));
        assert!(text.contains("Date:    2024-05-08 08:00 +02:00"));
        assert!(text.contains("Type:    ir | Lang: en"));
        assert!(text.contains("Tags:    -"));
        assert!(text.contains("  Published: 2024-05-08 08:00"));
        assert!(text.contains("--- Attachments (0) ---\n  (none)"));
    }

    #[test]
    fn previews_are_truncated() {
        let long = "x".repeat(300);
        let html = format!(r#"<strong class="mfn-heading-1">Long</strong><p>{long}</p>"#);
        let content = extract_content(&html);
        let opts = ReportOptions {
            about_chars: 10,
            preview_chars: 20,
        };
        let text = render(&Document::from_html("long", html), &content, opts);
        assert!(text.contains(&format!("  {}...", "x".repeat(20))));
        assert!(!text.contains(&"x".repeat(21)));
    }
}
