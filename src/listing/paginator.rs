//! Page slicing and page-number controls

use serde::Serialize;

/// One page of a sequence, with its position in the whole
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// Page actually shown, after clamping
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based inclusive display range; both 0 when empty
    pub start_index: usize,
    pub end_index: usize,
}

/// Number of pages needed for `count` items; 0 when there are none
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamp a requested page into `[1, total_pages]`, or 1 when there are no pages
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice `items` for `current_page`
pub fn paginate<T: Clone>(items: &[T], page_size: usize, current_page: usize) -> PageSlice<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let current_page = clamp_page(current_page, total_pages);

    let start = ((current_page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);
    let items = items[start..end].to_vec();

    let (start_index, end_index) = if items.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };

    PageSlice {
        items,
        current_page,
        total_pages,
        total_items,
        start_index,
        end_index,
    }
}

/// A page-number control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageControl {
    Page { number: usize, current: bool },
    Ellipsis,
}

impl PageControl {
    fn page(number: usize, current_page: usize) -> Self {
        PageControl::Page {
            number,
            current: number == current_page,
        }
    }
}

/// Page-number window: first, last and the neighbours of the current page
///
/// Yields at most seven controls. Empty when `total_pages` is 0.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageControl> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut controls = vec![PageControl::page(1, current_page)];

    let range_start = current_page.saturating_sub(1).max(2);
    let range_end = (current_page + 1).min(total_pages - 1);

    if range_start > 2 {
        controls.push(PageControl::Ellipsis);
    }

    for number in range_start..=range_end {
        controls.push(PageControl::page(number, current_page));
    }

    if range_end < total_pages - 1 {
        controls.push(PageControl::Ellipsis);
    }

    if total_pages > 1 {
        controls.push(PageControl::page(total_pages, current_page));
    }

    controls
}

/// Pagination navigation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    /// Hidden entirely when there is at most one page
    pub visible: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub pages: Vec<PageControl>,
}

impl PaginationControls {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        if total_pages <= 1 {
            return Self::hidden();
        }

        Self {
            visible: true,
            prev_enabled: current_page > 1,
            next_enabled: current_page < total_pages,
            pages: page_window(current_page, total_pages),
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            prev_enabled: false,
            next_enabled: false,
            pages: Vec::new(),
        }
    }
}
