//! noteme: a small blog engine over a static post collection
//!
//! Loads post metadata (`posts/posts.json`) from a site directory or a remote
//! base URL, filters, searches and paginates the listing, and renders posts
//! from front-matter + Markdown.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{ContentSource, FsSource, HttpSource, MarkdownRenderer, PostCatalog};
use listing::{FilterState, ListingPresenter};

/// Config file names, in lookup order
const CONFIG_FILES: [&str; 2] = ["_config.yml", "_config.toml"];

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    source: Arc<dyn ContentSource>,
}

impl Blog {
    /// Create a new blog from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();

        let config = match CONFIG_FILES
            .iter()
            .map(|name| base_dir.join(name))
            .find(|path| path.exists())
        {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                config::SiteConfig::load(&path)?
            }
            None => config::SiteConfig::default(),
        };

        Ok(Self::from_config(base_dir, config))
    }

    /// Create a blog with an explicit configuration
    ///
    /// Posts are read from `remote_url` when set, otherwise from `base_dir`.
    pub fn from_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source: Arc<dyn ContentSource> = match &config.remote_url {
            Some(url) => Arc::new(HttpSource::new(url)),
            None => Arc::new(FsSource::new(&base_dir)),
        };

        Self::with_source(base_dir, config, source)
    }

    /// Create a blog reading documents from `source`
    pub fn with_source<P: AsRef<Path>>(
        base_dir: P,
        config: config::SiteConfig,
        source: Arc<dyn ContentSource>,
    ) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
            source,
        }
    }

    /// Where posts are read from
    pub fn source(&self) -> Arc<dyn ContentSource> {
        self.source.clone()
    }

    /// A fresh catalog; create one per page view
    pub fn catalog(&self) -> PostCatalog {
        PostCatalog::new(
            self.source(),
            &self.config.metadata_file,
            &self.config.default_icon,
        )
    }

    /// Markdown renderer configured from `highlight`
    pub fn markdown_renderer(&self) -> Result<MarkdownRenderer> {
        MarkdownRenderer::with_options(&self.config.highlight)
    }

    /// Listing presenter over a loaded catalog, starting from `state`
    pub fn presenter(
        &self,
        posts: Arc<[content::PostRecord]>,
        state: FilterState,
    ) -> ListingPresenter {
        ListingPresenter::restore(posts, self.config.per_page, state)
    }
}
