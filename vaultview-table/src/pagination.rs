//! Pagination state and the pure page-math helpers.

use serde::{Deserialize, Serialize};

/// Default page size used before a preference store hydrates one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Current page position and size.
///
/// `page_index` is zero-based and always within `0..page_count` after a
/// view recompute; `page_size` is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl PaginationState {
    /// First page with the given size. A zero size falls back to the
    /// default rather than producing a degenerate pager.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

/// One entry of a rendered pager strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A real, navigable one-based page number.
    Page(usize),
    /// Marker for pages elided on either side of the window.
    Ellipsis,
}

/// Number of pages needed for `total_rows`, never less than one.
///
/// An empty result still renders a single (empty) page, so callers can
/// always show "page 1 of 1".
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_rows.div_ceil(page_size).max(1)
}

/// Clamp a zero-based page index into `0..page_count`.
pub fn clamp_page_index(page_index: usize, page_count: usize) -> usize {
    page_index.min(page_count.saturating_sub(1))
}

/// Pager strip around `active_page` (one-based): the active page plus
/// `window` neighbours each side, clipped to `1..=page_count`, with an
/// ellipsis marker on each side the clipped range does not reach.
pub fn visible_page_numbers(page_count: usize, active_page: usize, window: usize) -> Vec<PageItem> {
    if page_count == 0 {
        return Vec::new();
    }
    let active = active_page.clamp(1, page_count);
    let lo = active.saturating_sub(window).max(1);
    let hi = (active + window).min(page_count);

    let mut items = Vec::with_capacity(hi - lo + 3);
    if lo > 1 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((lo..=hi).map(PageItem::Page));
    if hi < page_count {
        items.push(PageItem::Ellipsis);
    }
    items
}
