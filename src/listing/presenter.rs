//! Listing presenter - owns the filter state and turns events into render
//! instructions

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::filter::{self, normalize_query, CategoryFilter};
use super::paginator::{paginate, total_pages, PaginationControls};
use crate::content::PostRecord;

/// Current category, query and page of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    /// Trimmed and lowercased
    pub query: String,
    /// 1-based
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            query: String::new(),
            page: 1,
        }
    }
}

impl FilterState {
    pub fn new(category: CategoryFilter, query: &str, page: usize) -> Self {
        Self {
            category,
            query: normalize_query(query),
            page: page.max(1),
        }
    }
}

/// User input the listing reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEvent {
    CategorySelected(CategoryFilter),
    /// A search query that has already been debounced
    QueryChanged(String),
    ClearSearch,
    Reset,
    PreviousPage,
    NextPage,
    GoToPage(usize),
}

/// The posts to show for one filter state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredView {
    pub posts: Vec<PostRecord>,
    pub current_page: usize,
    pub total_filtered: usize,
    pub total_pages: usize,
    /// 1-based inclusive; both 0 when empty
    pub start_index: usize,
    pub end_index: usize,
}

impl FilteredView {
    pub fn is_empty(&self) -> bool {
        self.total_filtered == 0
    }

    /// Results count line
    pub fn results_text(&self) -> String {
        if self.is_empty() {
            "No posts found".to_string()
        } else {
            format!(
                "Showing {}-{} of {} posts",
                self.start_index, self.end_index, self.total_filtered
            )
        }
    }
}

/// Everything needed to redraw the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInstruction {
    #[serde(flatten)]
    pub view: FilteredView,
    pub pagination: PaginationControls,
    pub results_text: String,
    pub show_no_results: bool,
    pub active_category: CategoryFilter,
    pub query: String,
    pub show_clear_search: bool,
}

/// Holds the catalog and the current [`FilterState`]
///
/// Every accepted event recomputes the view from scratch.
#[derive(Debug, Clone)]
pub struct ListingPresenter {
    posts: Arc<[PostRecord]>,
    page_size: usize,
    state: FilterState,
}

impl ListingPresenter {
    pub fn new(posts: Arc<[PostRecord]>, page_size: usize) -> Self {
        Self::restore(posts, page_size, FilterState::default())
    }

    /// Start from a known state, e.g. listing URL parameters
    pub fn restore(posts: Arc<[PostRecord]>, page_size: usize, state: FilterState) -> Self {
        let mut presenter = Self {
            posts,
            page_size: page_size.max(1),
            state,
        };
        presenter.state.query = normalize_query(&presenter.state.query);
        presenter.settle();
        presenter
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    fn total_pages(&self) -> usize {
        let count = filter::apply(&self.posts, &self.state.category, &self.state.query).len();
        total_pages(count, self.page_size)
    }

    /// Filtered and paginated posts for the current state
    pub fn view(&self) -> FilteredView {
        let filtered = filter::apply(&self.posts, &self.state.category, &self.state.query);
        let slice = paginate(&filtered, self.page_size, self.state.page);

        FilteredView {
            posts: slice.items.into_iter().cloned().collect(),
            current_page: slice.current_page,
            total_filtered: slice.total_items,
            total_pages: slice.total_pages,
            start_index: slice.start_index,
            end_index: slice.end_index,
        }
    }

    /// Render instruction for the current state
    pub fn render(&self) -> RenderInstruction {
        let view = self.view();
        let empty = view.is_empty();
        let pagination = if empty {
            PaginationControls::hidden()
        } else {
            PaginationControls::new(view.current_page, view.total_pages)
        };

        RenderInstruction {
            results_text: view.results_text(),
            show_no_results: empty,
            pagination,
            view,
            active_category: self.state.category.clone(),
            query: self.state.query.clone(),
            show_clear_search: !self.state.query.is_empty(),
        }
    }

    /// Render and keep the clamped page in the state
    fn settle(&mut self) -> RenderInstruction {
        let instruction = self.render();
        self.state.page = instruction.view.current_page;
        instruction
    }

    /// Apply an event; `None` when the event changes nothing (disabled
    /// navigation or the current page)
    pub fn handle(&mut self, event: ListingEvent) -> Option<RenderInstruction> {
        tracing::debug!("Listing event: {:?}", event);

        match event {
            ListingEvent::CategorySelected(category) => {
                self.state.category = category;
                self.state.page = 1;
            }
            ListingEvent::QueryChanged(query) => {
                self.state.query = normalize_query(&query);
                self.state.page = 1;
            }
            ListingEvent::ClearSearch => {
                self.state.query.clear();
                self.state.page = 1;
            }
            ListingEvent::Reset => {
                self.state = FilterState::default();
            }
            ListingEvent::PreviousPage => {
                if self.state.page <= 1 {
                    return None;
                }
                self.state.page -= 1;
            }
            ListingEvent::NextPage => {
                if self.state.page >= self.total_pages() {
                    return None;
                }
                self.state.page += 1;
            }
            ListingEvent::GoToPage(page) => {
                if page == self.state.page || page < 1 || page > self.total_pages() {
                    return None;
                }
                self.state.page = page;
            }
        }

        Some(self.settle())
    }
}
