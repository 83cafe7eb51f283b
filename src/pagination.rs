//! Page navigation for list views.

use serde::Serialize;

/// Orders shown per list page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page links to render: both edges and a window around the current page,
/// with `None` marking a gap.
fn page_links(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    const EDGE: usize = 2;
    const BEFORE_CURRENT: usize = 2;
    const AFTER_CURRENT: usize = 4;

    if total_pages == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + EDGE).min(total_pages + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(BEFORE_CURRENT));
    let mid_end = current_page
        .saturating_add(AFTER_CURRENT + 1)
        .min(total_pages + 1);
    if mid_start > left_end && mid_start < mid_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(EDGE) + 1);
    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

/// One page of items plus the navigation around it.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total: usize, per_page: usize) -> Self {
        let page = current_page.max(1);
        let total_pages = total.div_ceil(per_page.max(1));

        Self {
            items,
            pages: page_links(total_pages, page),
            page,
            total,
        }
    }
}
