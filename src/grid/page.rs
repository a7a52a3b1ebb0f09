//! Fixed-size pagination over a sorted view.

use std::ops::RangeInclusive;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 10;

/// Maximum page numbers shown in the navigation window.
pub const WINDOW: usize = 5;

/// Current page, 1-based. Navigation outside `[1, total_pages]` is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self { current: 1 }
    }
}

impl PageState {
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Back to page 1, as required whenever filters or sort change.
    pub fn reset(&mut self) {
        self.current = 1;
    }

    pub fn previous(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    pub fn next(&mut self, total_pages: usize) {
        if self.current < total_pages {
            self.current += 1;
        }
    }

    /// Jump to an absolute page; requests outside the valid range are
    /// ignored rather than clamped.
    pub fn jump(&mut self, page: usize, total_pages: usize) {
        if (1..=total_pages).contains(&page) {
            self.current = page;
        }
    }

    /// Pull the current page back into range after the view shrank.
    pub fn clamp(&mut self, total_pages: usize) {
        if self.current > total_pages {
            self.current = total_pages.max(1);
        }
    }
}

/// Number of pages needed for `len` rows; an empty view still presents one
/// page of empty content.
#[must_use]
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// The slice of the view visible on `page`.
#[must_use]
pub fn slice(view: &[usize], page: usize) -> &[usize] {
    let start = (page - 1) * PAGE_SIZE;
    if start >= view.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(view.len());
    &view[start..end]
}

/// Page numbers to offer in the navigation control: a window of at most
/// [`WINDOW`] pages around the current one.
#[must_use]
pub fn window(current: usize, total: usize) -> RangeInclusive<usize> {
    let start = current.saturating_sub(2).max(1);
    let end = (current + 2).min(total);
    start..=end
}
