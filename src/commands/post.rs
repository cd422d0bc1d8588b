//! Show a single post

use anyhow::Result;

use crate::content::{PostLoader, PostPage};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Load a post by id and print it, or the full HTML page with `html`
pub async fn run(blog: &Blog, id: Option<&str>, html: bool) -> Result<()> {
    let renderer = blog.markdown_renderer()?;
    let catalog = blog.catalog();
    let page = PostLoader::new(blog, &renderer).load(&catalog, id).await;

    if html {
        let templates = TemplateRenderer::new(&blog.config)?;
        println!("{}", templates.render_post(&page)?);
        return Ok(());
    }

    match &page {
        PostPage::Found(view) => {
            let header = &view.header;
            println!("{}", header.title);
            println!(
                "{} | {} | {}",
                header.category, header.date, header.read_time
            );
            if !header.tags.is_empty() {
                println!("Tags: {}", header.tags.join(", "));
            }
            println!();
            println!("{}", view.html);

            if !view.related.is_empty() {
                println!("Related posts:");
                for post in &view.related {
                    println!("  {} {} [{}]", post.icon, post.title, post.id);
                }
            }
        }
        PostPage::NotFound { message, listing_url }
        | PostPage::LoadError { message, listing_url } => {
            println!("{} Return to blog listing: {}", message, listing_url);
        }
    }

    Ok(())
}
