//! Single-post loader - resolves a post id into a rendered post page

use serde::Serialize;

use super::catalog::PostCatalog;
use super::{FrontMatter, MarkdownRenderer, PostHeader, PostRecord};
use crate::helpers::back_to_listing;
use crate::Blog;

/// A post ready to display
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: String,
    pub header: PostHeader,
    /// Rendered markdown body
    pub html: String,
    /// Other posts in the same category; empty hides the section
    pub related: Vec<PostRecord>,
}

/// Outcome of loading the single-post view
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PostPage {
    Found(PostView),
    /// No `id` was given
    NotFound { message: String, listing_url: String },
    /// The post source could not be fetched
    LoadError { message: String, listing_url: String },
}

impl PostPage {
    /// HTML shown in place of the post content when there is no post
    pub fn message_html(&self) -> Option<String> {
        match self {
            PostPage::Found(_) => None,
            PostPage::NotFound {
                message,
                listing_url,
            }
            | PostPage::LoadError {
                message,
                listing_url,
            } => Some(format!("{} {}", message, back_to_listing(listing_url))),
        }
    }
}

/// Loads single posts for a blog
pub struct PostLoader<'a> {
    blog: &'a Blog,
    renderer: &'a MarkdownRenderer,
}

impl<'a> PostLoader<'a> {
    /// Create a new post loader
    pub fn new(blog: &'a Blog, renderer: &'a MarkdownRenderer) -> Self {
        Self { blog, renderer }
    }

    /// Load the post selected by the `id` route parameter
    ///
    /// Never fails: a missing id or an unreadable source becomes a message page.
    pub async fn load(&self, catalog: &PostCatalog, id: Option<&str>) -> PostPage {
        let listing_url = self.blog.config.listing_page.clone();

        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            tracing::warn!("Post requested without an id");
            return PostPage::NotFound {
                message: "Post not found.".to_string(),
                listing_url,
            };
        };

        if id.contains(['/', '\\']) || id.contains("..") {
            tracing::warn!("Rejected post id {:?}", id);
            return PostPage::LoadError {
                message: "Error loading post.".to_string(),
                listing_url,
            };
        }

        let path = self.blog.config.post_source_path(id);
        let raw = match self.blog.source().fetch_text(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Error loading post {:?}: {}", id, e);
                return PostPage::LoadError {
                    message: "Error loading post.".to_string(),
                    listing_url,
                };
            }
        };

        let (front_matter, body) = FrontMatter::parse(&raw);
        let header = front_matter.header(&self.blog.config.title);
        let html = self.renderer.render(body);

        // Only a category the post itself declares pulls in related posts
        let related = match front_matter
            .get_str("category")
            .map(str::trim)
            .filter(|category| !category.is_empty())
        {
            Some(category) => {
                catalog
                    .related(category, id, self.blog.config.related_count)
                    .await
            }
            None => Vec::new(),
        };

        PostPage::Found(PostView {
            id: id.to_string(),
            header,
            html,
            related,
        })
    }
}
