//! Page arithmetic for the catalog view.
//!
//! `page_window` decides which page buttons the pagination control shows:
//! the first and last page are always present, a window of up to three pages
//! follows the current page, and gaps collapse into a single ellipsis.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Page buttons shown before the control collapses into ellipses.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLabel {
    Number(usize),
    Ellipsis,
}

impl PageLabel {
    pub fn number(&self) -> Option<usize> {
        match self {
            PageLabel::Number(page) => Some(*page),
            PageLabel::Ellipsis => None,
        }
    }
}

/// Number of pages needed for `total_items`. A zero page size yields no pages.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Clamp a 1-based page into `[1, total_pages]`. An empty catalog still has page 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of the items shown on the 1-based `page`.
pub fn page_range(total_items: usize, page_size: usize, page: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(total_items);
    let end = start.saturating_add(page_size).min(total_items);
    start..end
}

/// Labels for the pagination control.
///
/// `current_page` is expected to be clamped by the caller; out-of-range values
/// only shift the window, they never panic.
pub fn page_window(total_pages: usize, current_page: usize, max_visible: usize) -> Vec<PageLabel> {
    if total_pages <= max_visible {
        return (1..=total_pages).map(PageLabel::Number).collect();
    }

    let mut labels = vec![PageLabel::Number(1)];
    let last_inner = total_pages.saturating_sub(1);

    let mut start_page = current_page.saturating_sub(1).max(2);
    let mut end_page = current_page.saturating_add(1).min(last_inner);

    // Near either end the window stays anchored so the control keeps its width.
    if current_page <= 3 {
        end_page = last_inner.min(4);
    } else if current_page >= total_pages.saturating_sub(2) {
        start_page = total_pages.saturating_sub(3).max(2);
    }

    if start_page > 2 {
        labels.push(PageLabel::Ellipsis);
    }
    labels.extend((start_page..=end_page).map(PageLabel::Number));
    if end_page < last_inner {
        labels.push(PageLabel::Ellipsis);
    }
    if total_pages > 1 {
        labels.push(PageLabel::Number(total_pages));
    }
    labels
}
