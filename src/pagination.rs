//! Page navigation metadata for offset-based listings.

use serde::Serialize;

use crate::domain::filter::PageWindow;

/// Link target for one page of the listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub number: i64,
    pub offset: i64,
}

/// Navigation data derived from a page window and the matching total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub total_items: usize,
    pub total_pages: i64,
    /// One entry per page, `1..=total_pages`.
    pub pages: Vec<PageLink>,
    pub current_page: i64,
    pub limit: i64,
    /// Negative when there is no previous page.
    pub previous_offset: i64,
    pub next_offset: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationView {
    pub fn new(total_items: usize, window: PageWindow) -> Self {
        let limit = window.limit.max(1);
        let total = i64::try_from(total_items).unwrap_or(i64::MAX);
        let total_pages = total / limit + i64::from(total % limit != 0);

        let pages = (1..=total_pages)
            .map(|number| PageLink {
                number,
                offset: (number - 1).saturating_mul(limit),
            })
            .collect();

        let previous_offset = window.offset.saturating_sub(limit);
        let next_offset = window.offset.saturating_add(limit);

        Self {
            total_items,
            total_pages,
            pages,
            current_page: (window.offset / limit).saturating_add(1),
            limit,
            previous_offset,
            next_offset,
            has_previous: previous_offset >= 0,
            has_next: next_offset < total,
        }
    }
}

/// A page of items together with its navigation data.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationView,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total_items: usize, window: PageWindow) -> Self {
        Self {
            items,
            pagination: PaginationView::new(total_items, window),
        }
    }
}
