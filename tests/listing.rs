//! Listing behaviour over whole catalogs

use std::sync::Arc;

use noteme::content::{default_posts, PostRecord};
use noteme::listing::{
    filter, page_window, paginate, CategoryFilter, FilterState, ListingEvent, ListingPresenter,
    PageControl,
};

fn post(id: &str, category: &str) -> PostRecord {
    PostRecord {
        id: id.to_string(),
        title: format!("Notes on {id}"),
        excerpt: String::new(),
        category: category.to_string(),
        date: "2025-01-01".to_string(),
        read_time: None,
        tags: Vec::new(),
        icon: "📝".to_string(),
    }
}

fn catalog(count: usize, category: &str) -> Vec<PostRecord> {
    (1..=count)
        .map(|n| post(&format!("{category}-{n}"), category))
        .collect()
}

#[test]
fn ten_posts_nine_per_page() {
    let presenter = ListingPresenter::new(Arc::from(catalog(10, "aws")), 9);
    let render = presenter.render();

    let ids: Vec<_> = render.view.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.first(), Some(&"aws-1"));
    assert_eq!(ids.last(), Some(&"aws-9"));
    assert_eq!(render.results_text, "Showing 1-9 of 10 posts");
    assert_eq!(render.view.total_pages, 2);
    assert!(render.pagination.next_enabled);
    assert!(!render.pagination.prev_enabled);
}

#[test]
fn aws_query_against_default_posts() {
    let mut presenter = ListingPresenter::new(Arc::from(default_posts()), 9);
    let render = presenter
        .handle(ListingEvent::QueryChanged("aws".to_string()))
        .unwrap();

    let ids: Vec<_> = render.view.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["getting-started-aws-ec2", "custom-ami-creation"]);
    assert!(render.view.posts.iter().all(|p| p.category == "aws"));
}

#[test]
fn window_for_page_five_of_ten() {
    let window: Vec<String> = page_window(5, 10)
        .iter()
        .map(|control| match control {
            PageControl::Page { number, .. } => number.to_string(),
            PageControl::Ellipsis => "...".to_string(),
        })
        .collect();
    assert_eq!(window, vec!["1", "...", "4", "5", "6", "...", "10"]);
}

#[test]
fn category_switch_resets_page() {
    let mut posts = catalog(12, "linux");
    posts.extend(catalog(3, "devops"));
    let mut presenter = ListingPresenter::restore(
        Arc::from(posts),
        9,
        FilterState::new(CategoryFilter::parse("linux"), "", 2),
    );
    assert_eq!(presenter.state().page, 2);

    let render = presenter
        .handle(ListingEvent::CategorySelected(CategoryFilter::parse("devops")))
        .unwrap();
    assert_eq!(render.view.current_page, 1);
    assert_eq!(render.results_text, "Showing 1-3 of 3 posts");
    assert!(!render.pagination.visible);
}

#[test]
fn pages_cover_filtered_sequence_exactly() {
    let mut posts = catalog(17, "linux");
    posts.extend(catalog(8, "aws"));
    let filtered: Vec<_> = posts.iter().filter(|p| p.category == "linux").collect();

    let mut seen = Vec::new();
    for page in 1..=2 {
        let slice = paginate(&filtered, 9, page);
        assert!(slice.items.len() <= 9);
        seen.extend(slice.items.into_iter().map(|p| p.id.clone()));
    }

    let expected: Vec<_> = filtered.iter().map(|p| p.id.clone()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn single_page_hides_controls() {
    let presenter = ListingPresenter::new(Arc::from(catalog(4, "aws")), 9);
    let render = presenter.render();
    assert_eq!(render.view.total_pages, 1);
    assert!(!render.pagination.visible);
    assert!(!render.show_no_results);
}

#[test]
fn empty_catalog_shows_no_results() {
    let presenter = ListingPresenter::new(Arc::from(Vec::new()), 9);
    let render = presenter.render();
    assert_eq!(render.view.total_pages, 0);
    assert!(render.show_no_results);
    assert!(!render.pagination.visible);
    assert_eq!(render.results_text, "No posts found");
}

#[test]
fn filtering_is_idempotent_for_every_category() {
    let posts = default_posts();

    for category in ["all", "aws", "linux", "devops", "missing"] {
        let filter = CategoryFilter::parse(category);
        let once: Vec<PostRecord> = filter::apply(&posts, &filter, "")
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<_> = filter::apply(&once, &filter, "")
            .iter()
            .map(|p| p.id.clone())
            .collect();
        let once_ids: Vec<_> = once.iter().map(|p| p.id.clone()).collect();
        assert_eq!(twice, once_ids, "{category}");
    }
}

#[test]
fn query_results_are_matching_subsequence() {
    let mut posts = default_posts();
    let mut tagged = post("kube-notes", "devops");
    tagged.tags = vec!["Kubernetes".to_string()];
    posts.insert(2, tagged);

    for query in ["aws", "LINUX", " Automation ", "kubernetes", "Cloud Computing", "nothing"] {
        let needle = query.trim().to_lowercase();
        let filtered = filter::apply(&posts, &CategoryFilter::All, query);

        for found in &filtered {
            assert!(
                found.searchable_text().contains(&needle),
                "{query}: {}",
                found.id
            );
        }

        // catalog order is kept
        let mut positions = filtered
            .iter()
            .map(|found| posts.iter().position(|p| p.id == found.id).unwrap());
        let mut last = positions.next();
        for position in positions {
            assert!(Some(position) > last, "{query}");
            last = Some(position);
        }
    }

    let tag_only: Vec<_> = filter::apply(&posts, &CategoryFilter::All, "Kubernetes")
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(tag_only, vec!["kube-notes"]);
}
