//! Site configuration (_config.yml / _config.toml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,

    // Content locations (relative to the site directory or `remote_url`)
    pub posts_dir: String,
    pub metadata_file: String,
    /// When set, content is fetched over HTTP from this base URL
    pub remote_url: Option<String>,

    // Pages
    pub listing_page: String,
    pub post_page: String,

    // Listing
    pub per_page: usize,
    pub latest_count: usize,
    pub related_count: usize,
    pub search_debounce_ms: u64,
    /// Categories offered as filter buttons on the listing page
    pub categories: Vec<String>,

    // Cards
    pub default_icon: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "NoteMe".to_string(),
            description: String::new(),

            posts_dir: "posts".to_string(),
            metadata_file: "posts/posts.json".to_string(),
            remote_url: None,

            listing_page: "blog.html".to_string(),
            post_page: "post.html".to_string(),

            per_page: 9,
            latest_count: 3,
            related_count: 3,
            search_debounce_ms: 300,
            categories: vec!["aws".to_string(), "linux".to_string(), "devops".to_string()],

            default_icon: "📝".to_string(),

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML or TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: SiteConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("yml") | Some("yaml") => serde_yaml::from_str(&content)?,
            _ => bail!("Unsupported config format: {:?}", path),
        };

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config.normalized())
    }

    /// Quiet window for search keystrokes
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Path of a single post's markdown source
    pub fn post_source_path(&self, id: &str) -> String {
        format!("{}/{}.md", self.posts_dir.trim_end_matches('/'), id)
    }

    fn normalized(mut self) -> Self {
        if self.per_page == 0 {
            tracing::warn!("per_page must be at least 1, using 1");
            self.per_page = 1;
        }
        if self.default_icon.is_empty() {
            self.default_icon = Self::default().default_icon;
        }
        self
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
