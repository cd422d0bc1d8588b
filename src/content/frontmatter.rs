//! Front-matter parsing

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::helpers::display_date;

lazy_static! {
    /// Opening `---` line, block, closing `---` line, body
    static ref FRONTMATTER_RE: Regex =
        Regex::new(r"(?s)\A---\s*\n(.*?)\n---\s*\n(.*)\z").expect("valid front-matter regex");
}

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    Text(String),
    /// `[a, b, c]`
    List(Vec<String>),
}

/// Front-matter data from a post, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, FrontMatterValue>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Input without a well-formed block at the very start yields an empty
    /// mapping and the whole input as content.
    pub fn parse(content: &str) -> (Self, &str) {
        let Some(captures) = FRONTMATTER_RE.captures(content) else {
            return (FrontMatter::default(), content);
        };

        let (Some(block), Some(body)) = (captures.get(1), captures.get(2)) else {
            return (FrontMatter::default(), content);
        };

        let mut fields = IndexMap::new();
        for line in block.as_str().lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            fields.insert(key.to_string(), parse_value(value));
        }

        (Self { fields }, body.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.fields.get(key)
    }

    /// Text value of a key; lists are not text
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.fields.get(key)? {
            FrontMatterValue::Text(s) => Some(s),
            FrontMatterValue::List(_) => None,
        }
    }

    /// List value of a key; plain text is not a list
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        match self.fields.get(key)? {
            FrontMatterValue::List(items) => Some(items),
            FrontMatterValue::Text(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontMatterValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve the single-post header, filling in defaults for missing fields
    pub fn header(&self, site_title: &str) -> PostHeader {
        let title = self.get_str("title").filter(|t| !t.is_empty());
        let date = self
            .get_str("date")
            .filter(|d| !d.is_empty())
            .map(display_date)
            .unwrap_or_else(|| chrono::Local::now().format("%B %-d, %Y").to_string());

        PostHeader {
            document_title: format!("{} | {}", title.unwrap_or("Blog Post"), site_title),
            title: title.unwrap_or("Untitled Post").to_string(),
            excerpt: self.get_str("excerpt").unwrap_or_default().to_string(),
            category: self
                .get_str("category")
                .filter(|c| !c.is_empty())
                .unwrap_or("general")
                .to_uppercase(),
            date,
            read_time: self
                .get_str("readTime")
                .filter(|r| !r.is_empty())
                .unwrap_or("5 min read")
                .to_string(),
            tags: self.get_list("tags").map(<[String]>::to_vec).unwrap_or_default(),
        }
    }
}

/// Display-ready metadata for the single-post view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostHeader {
    /// Browser title, e.g. `Hello | NoteMe`
    pub document_title: String,
    pub title: String,
    pub excerpt: String,
    /// Upper-cased for display
    pub category: String,
    pub date: String,
    pub read_time: String,
    pub tags: Vec<String>,
}

fn parse_value(raw: &str) -> FrontMatterValue {
    let value = strip_quotes(raw.trim());

    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        // `[]` has no items, not one empty item
        if inner.trim().is_empty() {
            return FrontMatterValue::List(Vec::new());
        }
        let items = inner
            .split(',')
            .map(|item| strip_quotes(item.trim()).to_string())
            .collect();
        return FrontMatterValue::List(items);
    }

    FrontMatterValue::Text(value.to_string())
}

/// Strip one layer of matching `'` or `"` quotes
///
/// A lone leading or trailing quote is kept: `"abc` stays `"abc`.
fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_frontmatter() {
        let (fm, body) = FrontMatter::parse("---\ntitle: Hello\ntags: [a, b]\n---\nBody text");
        assert_eq!(fm.len(), 2);
        assert_eq!(fm.get_str("title"), Some("Hello"));
        assert_eq!(
            fm.get_list("tags"),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_quotes_and_colons() {
        let content = r#"---
title: "Postfix: a guide"
excerpt: 'Single quoted'
url: https://example.com/x
mixed: "unbalanced'
lone: "abc
tags: ["Linux", 'DNS', plain]
---
# Heading
"#;
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.get_str("title"), Some("Postfix: a guide"));
        assert_eq!(fm.get_str("excerpt"), Some("Single quoted"));
        assert_eq!(fm.get_str("url"), Some("https://example.com/x"));
        assert_eq!(fm.get_str("mixed"), Some("\"unbalanced'"));
        assert_eq!(fm.get_str("lone"), Some("\"abc"));
        assert_eq!(
            fm.get_list("tags").unwrap(),
            &["Linux".to_string(), "DNS".to_string(), "plain".to_string()]
        );
        assert_eq!(body, "# Heading\n");
    }

    #[test]
    fn test_lines_without_colon_skipped_and_empty_values_kept() {
        let (fm, _) = FrontMatter::parse("---\njust words\nreadTime:\n: orphan\ntags: []\n---\nx");
        let keys: Vec<_> = fm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["readTime", "tags"]);
        assert_eq!(fm.get_str("readTime"), Some(""));
        assert_eq!(fm.get_list("tags"), Some(&[][..]));
    }

    #[test]
    fn test_no_frontmatter_returns_whole_input() {
        let content = "# Just markdown\n\n---\n\nmore";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_block_must_start_input() {
        let content = "\n---\ntitle: Late\n---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unterminated_block_is_content() {
        let content = "---\ntitle: Open\nno closing line";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_header_defaults() {
        let (fm, _) = FrontMatter::parse("no front matter");
        let header = fm.header("NoteMe");
        assert_eq!(header.title, "Untitled Post");
        assert_eq!(header.document_title, "Blog Post | NoteMe");
        assert_eq!(header.category, "GENERAL");
        assert_eq!(header.read_time, "5 min read");
        assert!(header.tags.is_empty());
        assert!(!header.date.is_empty());
    }

    #[test]
    fn test_header_from_fields() {
        let content = "---\ntitle: DNS Guide\ncategory: linux\ndate: 2024-12-28\nreadTime: 9 min read\ntags: DNS\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        let header = fm.header("NoteMe");
        assert_eq!(header.document_title, "DNS Guide | NoteMe");
        assert_eq!(header.category, "LINUX");
        assert_eq!(header.date, "December 28, 2024");
        assert_eq!(header.read_time, "9 min read");
        // a plain string is not a tag list
        assert!(header.tags.is_empty());
    }
}
