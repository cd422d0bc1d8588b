//! Post catalog - the metadata records for every post, loaded once per page view

use std::sync::Arc;
use tokio::sync::OnceCell;

use super::post::{default_posts, PostRecord, PostsDocument};
use super::ContentSource;
use crate::error::CatalogError;

/// Which page is asking for the catalog; decides the fallback on failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadContext {
    /// Degrades to the built-in sample posts
    Homepage,
    /// Degrades to an empty catalog and a "no results" panel
    Listing,
}

/// How the catalog came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// Metadata unavailable, sample posts substituted
    DefaultContent,
    /// Metadata unavailable, nothing to show
    Unavailable,
}

/// Result of [`PostCatalog::load`]
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub posts: Arc<[PostRecord]>,
    pub outcome: LoadOutcome,
}

impl CatalogLoad {
    pub fn is_unavailable(&self) -> bool {
        self.outcome == LoadOutcome::Unavailable
    }
}

/// Loads and caches `posts.json` through a [`ContentSource`]
///
/// The cache lives as long as the catalog value; create one per page view.
pub struct PostCatalog {
    source: Arc<dyn ContentSource>,
    metadata_path: String,
    default_icon: String,
    cached: OnceCell<Option<Arc<[PostRecord]>>>,
}

impl PostCatalog {
    pub fn new(source: Arc<dyn ContentSource>, metadata_path: &str, default_icon: &str) -> Self {
        Self {
            source,
            metadata_path: metadata_path.to_string(),
            default_icon: default_icon.to_string(),
            cached: OnceCell::new(),
        }
    }

    /// Fetch and parse the metadata document, without caching or fallback
    pub async fn fetch(&self) -> Result<Vec<PostRecord>, CatalogError> {
        let text = self.source.fetch_text(&self.metadata_path).await?;
        let document = PostsDocument::from_json(&text)?;
        Ok(document.into_records(&self.default_icon))
    }

    /// Records from the metadata resource, or `None` when it could not be loaded
    async fn records(&self) -> Option<Arc<[PostRecord]>> {
        self.cached
            .get_or_init(|| async move {
                match self.fetch().await {
                    Ok(posts) => {
                        tracing::info!(
                            "Loaded {} posts from {}/{}",
                            posts.len(),
                            self.source.describe(),
                            self.metadata_path
                        );
                        Some(Arc::from(posts))
                    }
                    Err(e) => {
                        tracing::error!("Error loading post metadata: {}", e);
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// Load the catalog, substituting the fallback for `context` on failure
    pub async fn load(&self, context: LoadContext) -> CatalogLoad {
        match (self.records().await, context) {
            (Some(posts), _) => CatalogLoad {
                posts,
                outcome: LoadOutcome::Loaded,
            },
            (None, LoadContext::Homepage) => {
                tracing::warn!("Post metadata unavailable, using default posts");
                CatalogLoad {
                    posts: Arc::from(default_posts()),
                    outcome: LoadOutcome::DefaultContent,
                }
            }
            (None, LoadContext::Listing) => CatalogLoad {
                posts: Arc::from(Vec::new()),
                outcome: LoadOutcome::Unavailable,
            },
        }
    }

    /// The newest `count` posts for the homepage (catalog order)
    pub async fn latest(&self, count: usize) -> CatalogLoad {
        let load = self.load(LoadContext::Homepage).await;
        CatalogLoad {
            posts: load.posts.iter().take(count).cloned().collect(),
            outcome: load.outcome,
        }
    }

    /// Up to `count` other posts in exactly the same category
    ///
    /// Empty when the metadata cannot be loaded.
    pub async fn related(&self, category: &str, exclude_id: &str, count: usize) -> Vec<PostRecord> {
        let Some(posts) = self.records().await else {
            return Vec::new();
        };
        related_posts(&posts, category, exclude_id, count)
    }
}

/// Related posts: same category (case-sensitive), excluding the current post
pub fn related_posts(
    posts: &[PostRecord],
    category: &str,
    exclude_id: &str,
    count: usize,
) -> Vec<PostRecord> {
    posts
        .iter()
        .filter(|p| p.category == category && p.id != exclude_id)
        .take(count)
        .cloned()
        .collect()
}
