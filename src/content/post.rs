//! Post metadata records

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Icon shown on cards when a record carries none
pub const DEFAULT_ICON: &str = "📝";

/// One blog post's metadata, as listed in `posts.json`
///
/// Optional wire fields are resolved at ingestion, so every consumer can rely
/// on `tags` and `icon` being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// Stable identifier, used for lookup and URL construction
    pub id: String,

    pub title: String,

    /// Plain-text summary
    pub excerpt: String,

    /// Matched case-sensitively by the category filter
    pub category: String,

    /// ISO-8601 calendar date
    pub date: String,

    /// Human readable reading time ("8 min read")
    pub read_time: Option<String>,

    pub tags: Vec<String>,

    /// Single glyph shown on the card
    pub icon: String,
}

/// A record as it appears on the wire, before defaults are applied
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPostRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub read_time: Option<String>,
    pub tags: Option<Vec<String>>,
    pub icon: Option<String>,
}

/// The metadata document: `{"posts": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostsDocument {
    #[serde(default)]
    pub posts: Vec<RawPostRecord>,
}

impl PostRecord {
    /// Resolve a wire record, returning `None` when it is unusable
    /// (no id, or no category to filter on)
    pub fn from_raw(raw: RawPostRecord, default_icon: &str) -> Option<Self> {
        let id = non_empty(raw.id)?;
        let category = non_empty(raw.category)?;

        Some(Self {
            id,
            title: raw.title.unwrap_or_default(),
            excerpt: raw.excerpt.unwrap_or_default(),
            category,
            date: raw.date.unwrap_or_default(),
            read_time: non_empty(raw.read_time),
            tags: raw.tags.unwrap_or_default(),
            icon: non_empty(raw.icon).unwrap_or_else(|| default_icon.to_string()),
        })
    }

    /// Text searched by free-text queries: title, excerpt, category and tags,
    /// joined with spaces and lower-cased
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3 + self.tags.len());
        parts.push(&self.title);
        parts.push(&self.excerpt);
        parts.push(&self.category);
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }

    /// Category as shown on cards
    pub fn display_category(&self) -> String {
        self.category.to_uppercase()
    }
}

impl PostsDocument {
    /// Parse a metadata document from JSON text
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Resolve every record, dropping invalid ones and duplicate ids
    pub fn into_records(self, default_icon: &str) -> Vec<PostRecord> {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(self.posts.len());

        for (index, raw) in self.posts.into_iter().enumerate() {
            let Some(record) = PostRecord::from_raw(raw, default_icon) else {
                tracing::warn!("Skipping post #{}: missing id or category", index);
                continue;
            };
            if !seen.insert(record.id.clone()) {
                tracing::warn!("Skipping duplicate post id {:?}", record.id);
                continue;
            }
            records.push(record);
        }

        records
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Built-in sample posts shown on the homepage when metadata is unavailable
pub fn default_posts() -> Vec<PostRecord> {
    #[allow(clippy::too_many_arguments)]
    fn post(
        id: &str,
        title: &str,
        excerpt: &str,
        category: &str,
        date: &str,
        read_time: &str,
        tags: &[&str],
        icon: &str,
    ) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            category: category.to_string(),
            date: date.to_string(),
            read_time: Some(read_time.to_string()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            icon: icon.to_string(),
        }
    }

    vec![
        post(
            "getting-started-aws-ec2",
            "Getting Started with AWS EC2: A Complete Guide",
            "Learn how to launch and configure your first EC2 instance on AWS, including security groups, key pairs, and best practices.",
            "aws",
            "2025-01-10",
            "8 min read",
            &["AWS", "EC2", "Cloud Computing"],
            "☁️",
        ),
        post(
            "linux-mail-server-setup",
            "Setting Up a Mail Server with Postfix and Dovecot",
            "Step-by-step guide to configuring a secure mail server on AlmaLinux using Postfix for SMTP and Dovecot for IMAP.",
            "linux",
            "2025-01-08",
            "12 min read",
            &["Linux", "Postfix", "Dovecot", "AlmaLinux"],
            "🐧",
        ),
        post(
            "custom-ami-creation",
            "Creating Custom AMIs for Faster EC2 Deployment",
            "Optimize your AWS deployment workflow by creating custom Amazon Machine Images with pre-configured applications.",
            "aws",
            "2025-01-05",
            "10 min read",
            &["AWS", "AMI", "DevOps", "Automation"],
            "⚙️",
        ),
        post(
            "firewall-configuration-linux",
            "Linux Firewall Configuration: firewalld vs iptables",
            "Compare firewalld and iptables, and learn which one to use for your Linux server security needs.",
            "linux",
            "2025-01-03",
            "7 min read",
            &["Linux", "Security", "Firewall", "iptables"],
            "🔒",
        ),
        post(
            "devops-cicd-pipeline",
            "Building a CI/CD Pipeline with GitHub Actions",
            "Automate your deployment process with GitHub Actions. Learn to set up testing, building, and deployment workflows.",
            "devops",
            "2025-01-01",
            "15 min read",
            &["DevOps", "CI/CD", "GitHub Actions", "Automation"],
            "🚀",
        ),
        post(
            "dns-configuration-guide",
            "Complete DNS Configuration Guide for System Admins",
            "Master DNS concepts and learn to configure DNS servers, zones, and records for your infrastructure.",
            "linux",
            "2024-12-28",
            "9 min read",
            &["DNS", "Linux", "Networking"],
            "🌐",
        ),
    ]
}
