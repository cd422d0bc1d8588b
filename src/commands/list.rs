//! List posts with the listing filters

use anyhow::Result;

use crate::content::LoadContext;
use crate::helpers::display_date;
use crate::listing::{CategoryFilter, FilterState, PageControl, RenderInstruction};
use crate::Blog;

/// Print one page of the filtered listing
pub async fn run(
    blog: &Blog,
    category: Option<&str>,
    query: Option<&str>,
    page: usize,
    json: bool,
) -> Result<()> {
    let load = blog.catalog().load(LoadContext::Listing).await;
    if load.is_unavailable() {
        tracing::warn!("Post metadata unavailable at {}", blog.source().describe());
    }

    let state = FilterState::new(
        CategoryFilter::parse(category.unwrap_or_default()),
        query.unwrap_or_default(),
        page,
    );
    let instruction = blog.presenter(load.posts, state).render();

    if json {
        println!("{}", serde_json::to_string_pretty(&instruction)?);
    } else {
        print!("{}", format_listing(&instruction));
    }

    Ok(())
}

/// Plain-text rendering of a listing render instruction
pub fn format_listing(instruction: &RenderInstruction) -> String {
    let mut out = format!("[{}]", instruction.active_category);
    if !instruction.query.is_empty() {
        out.push_str(&format!(" search: \"{}\"", instruction.query));
    }
    out.push_str(&format!(" - {}\n", instruction.results_text));

    if instruction.show_no_results {
        out.push_str("  No posts found. Try adjusting your search or filter.\n");
        return out;
    }

    for post in &instruction.view.posts {
        let read_time = post
            .read_time
            .as_deref()
            .map(|t| format!(" ({})", t))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {} {:<8} {:<18} {}\n      {}{}\n",
            post.icon,
            post.display_category(),
            display_date(&post.date),
            post.title,
            post.id,
            read_time
        ));
    }

    if instruction.pagination.visible {
        let pages: Vec<String> = instruction
            .pagination
            .pages
            .iter()
            .map(|control| match control {
                PageControl::Page { number, current: true } => format!("[{}]", number),
                PageControl::Page { number, .. } => number.to_string(),
                PageControl::Ellipsis => "...".to_string(),
            })
            .collect();
        out.push_str(&format!(
            "  {} {} {}\n",
            if instruction.pagination.prev_enabled { "<" } else { " " },
            pages.join(" "),
            if instruction.pagination.next_enabled { ">" } else { " " },
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_posts;
    use crate::listing::{ListingEvent, ListingPresenter};
    use std::sync::Arc;

    #[test]
    fn test_format_listing_page() {
        let mut presenter = ListingPresenter::new(Arc::from(default_posts()), 2);
        let instruction = presenter.handle(ListingEvent::NextPage).unwrap();
        let text = format_listing(&instruction);

        assert!(text.starts_with("[all] - Showing 3-4 of 6 posts\n"));
        assert!(text.contains("custom-ami-creation (10 min read)"));
        assert!(text.contains("January 5, 2025"));
        assert!(text.contains("< 1 [2] 3 >"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_format_listing_no_results() {
        let mut presenter = ListingPresenter::new(Arc::from(default_posts()), 9);
        let instruction = presenter
            .handle(ListingEvent::QueryChanged("zzz".to_string()))
            .unwrap();
        let text = format_listing(&instruction);

        assert!(text.starts_with("[all] search: \"zzz\" - No posts found\n"));
        assert!(text.contains("Try adjusting your search or filter."));
        assert_eq!(text.lines().count(), 2);
    }
}
