use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

const INPUT_EXTENSIONS: &[&str] = &["html", "htm", "json"];

/// One page of the news feed as the fetcher stores it.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub items: Vec<NewsItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    pub news_id: String,
    pub url: Option<String>,
    pub author: Author,
    pub properties: Properties,
    pub content: NewsContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Properties {
    pub lang: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsContent {
    pub title: String,
    pub slug: String,
    pub publish_date: Option<DateTime<FixedOffset>>,
    pub html: Option<String>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Attachment {
    pub file_title: String,
    pub url: String,
    pub tags: Vec<String>,
}

impl NewsItem {
    /// Tagged as a regulatory (MAR etc.) release.
    pub fn is_regulatory(&self) -> bool {
        self.properties.tags.iter().any(|t| t.starts_with(":regulatory"))
    }
}

/// A single press release ready for extraction.
#[derive(Debug, Clone)]
pub struct Document {
    pub label: String,
    pub html: String,
    pub item: Option<NewsItem>,
}

impl Document {
    pub fn from_html(label: impl Into<String>, html: impl Into<String>) -> Self {
        Document {
            label: label.into(),
            html: html.into(),
            item: None,
        }
    }

    fn from_item(item: NewsItem) -> Self {
        let label = if item.content.slug.is_empty() {
            item.news_id.clone()
        } else {
            item.content.slug.clone()
        };
        Document {
            label,
            html: item.content.html.clone().unwrap_or_default(),
            item: Some(item),
        }
    }
}

/// Read one input file. JSON files hold a feed page or a single news item;
/// anything else is taken to be raw release markup.
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if has_extension(path, "json") {
        return parse_feed(&raw).with_context(|| format!("failed to parse {}", path.display()));
    }

    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(vec![Document::from_html(label, raw)])
}

pub fn parse_feed(json: &str) -> Result<Vec<Document>> {
    // Every field defaults, so only the "items" key tells a page from an item.
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.get("items").is_some() {
        let page: FeedResponse = serde_json::from_value(value)?;
        return Ok(page.items.into_iter().map(Document::from_item).collect());
    }
    let item: NewsItem = serde_json::from_value(value)?;
    Ok(vec![Document::from_item(item)])
}

/// Input files under `dir` (not recursive), sorted by path.
pub fn collect_inputs(dir: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && INPUT_EXTENSIONS.iter().any(|ext| has_extension(&path, ext)) {
            paths.push(path);
        }
    }
    paths.sort();
    if let Some(n) = limit {
        paths.truncate(n);
    }
    Ok(paths)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
}
