//! Show the homepage's latest posts

use anyhow::Result;

use crate::content::LoadOutcome;
use crate::helpers::display_date;
use crate::Blog;

/// Print the newest posts, falling back to the sample posts
pub async fn run(blog: &Blog) -> Result<()> {
    let latest = blog.catalog().latest(blog.config.latest_count).await;

    if latest.outcome == LoadOutcome::DefaultContent {
        println!("(post metadata unavailable, showing default posts)");
    }

    if latest.posts.is_empty() {
        println!("No blog posts yet. Check back soon!");
        return Ok(());
    }

    println!("Latest posts ({}):", latest.posts.len());
    for post in latest.posts.iter() {
        println!(
            "  {} {} - {} [{}]",
            post.icon,
            display_date(&post.date),
            post.title,
            post.id
        );
    }

    Ok(())
}
