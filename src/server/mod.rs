//! Development server rendering the home, listing and post pages

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{LoadContext, MarkdownRenderer, PostLoader, PostPage};
use crate::listing::{CategoryFilter, FilterState, RenderInstruction};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Server state
struct ServerState {
    blog: Blog,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl ServerState {
    /// One listing page view: load the catalog, then render the requested state
    async fn listing(&self, params: ListingParams) -> RenderInstruction {
        let load = self.blog.catalog().load(LoadContext::Listing).await;
        self.blog.presenter(load.posts, params.filter_state()).render()
    }
}

/// Listing query string: `?category=&q=&page=`
#[derive(Debug, Default, Deserialize)]
struct ListingParams {
    category: Option<String>,
    q: Option<String>,
    page: Option<String>,
}

impl ListingParams {
    fn filter_state(&self) -> FilterState {
        FilterState::new(
            CategoryFilter::parse(self.category.as_deref().unwrap_or_default()),
            self.q.as_deref().unwrap_or_default(),
            self.page
                .as_deref()
                .and_then(|page| page.trim().parse().ok())
                .unwrap_or(1),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct PostParams {
    id: Option<String>,
}

/// Build the router for a blog
pub fn router(blog: Blog) -> Result<Router> {
    let listing_route = format!("/{}", blog.config.listing_page.trim_start_matches('/'));
    let post_route = format!("/{}", blog.config.post_page.trim_start_matches('/'));
    let static_files = ServeDir::new(&blog.base_dir);

    let state = Arc::new(ServerState {
        templates: TemplateRenderer::new(&blog.config)?,
        markdown: blog.markdown_renderer()?,
        blog,
    });

    Ok(Router::new()
        .route("/", get(home_handler))
        .route("/index.html", get(home_handler))
        .route(&listing_route, get(listing_handler))
        .route(&post_route, get(post_handler))
        .route("/api/posts", get(api_posts_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the development server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(blog.clone())?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Serving posts from {}", blog.source().describe());
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn html_response(status: StatusCode, rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template error: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    let latest = state
        .blog
        .catalog()
        .latest(state.blog.config.latest_count)
        .await;
    html_response(StatusCode::OK, state.templates.render_home(&latest))
}

async fn listing_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ListingParams>,
) -> Response {
    let instruction = state.listing(params).await;
    html_response(StatusCode::OK, state.templates.render_listing(&instruction))
}

async fn api_posts_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ListingParams>,
) -> Json<RenderInstruction> {
    Json(state.listing(params).await)
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<PostParams>,
) -> Response {
    let catalog = state.blog.catalog();
    let page = PostLoader::new(&state.blog, &state.markdown)
        .load(&catalog, params.id.as_deref())
        .await;

    let status = match page {
        PostPage::Found(_) => StatusCode::OK,
        PostPage::NotFound { .. } | PostPage::LoadError { .. } => StatusCode::NOT_FOUND,
    };
    html_response(status, state.templates.render_post(&page))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(category: Option<&str>, q: Option<&str>, page: Option<&str>) -> ListingParams {
        ListingParams {
            category: category.map(str::to_string),
            q: q.map(str::to_string),
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn test_listing_params_defaults() {
        assert_eq!(ListingParams::default().filter_state(), FilterState::default());
    }

    #[test]
    fn test_listing_params_parse() {
        let state = params(Some("linux"), Some(" DNS "), Some("2")).filter_state();
        assert_eq!(state.category, CategoryFilter::Only("linux".to_string()));
        assert_eq!(state.query, "dns");
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_listing_params_bad_page() {
        assert_eq!(params(None, None, Some("two")).filter_state().page, 1);
        assert_eq!(params(None, None, Some("0")).filter_state().page, 1);
        assert_eq!(params(Some("all"), None, None).filter_state().category, CategoryFilter::All);
    }
}
