//! Page windows over a result list.
//!
//! Pure arithmetic: nothing here touches the cache.

use std::ops::Range;

use serde::Serialize;

/// One slot of a navigation strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageSlot {
    /// A page number.
    Page(u32),
    /// Elided run of pages; serialized as `null`.
    Gap,
}

/// How many page numbers to keep around the edges and the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowShape {
    /// Pages always shown at the start.
    pub left_edge: u32,
    /// Pages shown before the current page.
    pub left_current: u32,
    /// Pages shown from the current page on (current page included).
    pub right_current: u32,
    /// Pages always shown at the end.
    pub right_edge: u32,
}

impl Default for WindowShape {
    fn default() -> Self {
        Self { left_edge: 2, left_current: 2, right_current: 5, right_edge: 2 }
    }
}

impl WindowShape {
    /// Whether page `n` is shown when `page` of `pages` is current.
    #[must_use]
    pub fn includes(&self, n: u32, page: u32, pages: u32) -> bool {
        let (n, page, pages) = (i64::from(n), i64::from(page), i64::from(pages));
        n <= i64::from(self.left_edge)
            || (page - i64::from(self.left_current) - 1 < n
                && n < page + i64::from(self.right_current))
            || pages - n < i64::from(self.right_edge)
    }
}

/// Page metadata for one listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    /// Current page, 1-based.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Items in the whole result list.
    pub total_count: usize,
}

impl PageWindow {
    /// Describe `page` of a list of `total_count` items.
    #[must_use]
    pub const fn new(page: u32, per_page: u32, total_count: usize) -> Self {
        Self { page, per_page, total_count }
    }

    /// `ceil(total_count / per_page)`; 0 for an empty list.
    #[must_use]
    pub fn pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.per_page as usize) as u32
    }

    /// A previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// A next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }

    /// Current page lies past the last page of a non-empty list.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        self.page == 0 || self.page > self.pages().max(1)
    }

    /// Indices of the items on the current page, clamped to the list.
    #[must_use]
    pub fn item_range(&self) -> Range<usize> {
        let per_page = self.per_page as usize;
        let start = (self.page.saturating_sub(1) as usize)
            .saturating_mul(per_page)
            .min(self.total_count);
        let end = start.saturating_add(per_page).min(self.total_count);
        start..end
    }

    /// Navigation strip with the given shape.
    #[must_use]
    pub fn window(&self, shape: WindowShape) -> PageNumbers {
        PageNumbers {
            shape,
            page: self.page,
            pages: self.pages(),
            next: 1,
            last: 0,
            pending: None,
        }
    }

    /// Navigation strip with the default shape (2, 2, 5, 2).
    #[must_use]
    pub fn default_window(&self) -> PageNumbers {
        self.window(WindowShape::default())
    }
}

/// Lazy, finite sequence of page numbers and gaps.
///
/// Emits every page `n` in `1..=pages` the shape includes. A gap comes
/// before `n` whenever the previously emitted page is not `n - 1`; page 0
/// counts as emitted before the start, so a strip that skips page 1
/// opens with a gap.
#[derive(Debug, Clone)]
pub struct PageNumbers {
    shape: WindowShape,
    page: u32,
    pages: u32,
    next: u32,
    last: u32,
    pending: Option<u32>,
}

impl Iterator for PageNumbers {
    type Item = PageSlot;

    fn next(&mut self) -> Option<PageSlot> {
        if let Some(n) = self.pending.take() {
            self.last = n;
            return Some(PageSlot::Page(n));
        }

        while self.next <= self.pages {
            let n = self.next;
            self.next += 1;

            if !self.shape.includes(n, self.page, self.pages) {
                continue;
            }

            if self.last + 1 != n {
                self.pending = Some(n);
                return Some(PageSlot::Gap);
            }

            self.last = n;
            return Some(PageSlot::Page(n));
        }

        None
    }
}

impl std::iter::FusedIterator for PageNumbers {}

/// Describe `page` of a list of `total_count` items.
#[must_use]
pub const fn paginate(page: u32, per_page: u32, total_count: usize) -> PageWindow {
    PageWindow::new(page, per_page, total_count)
}
