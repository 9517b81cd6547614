//! Page window derivation over the in-memory problem collection.

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Page(usize),
    Ellipsis,
}

/// Derived view of one page; never stored, recomputed from the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub total_pages: usize,
}

impl PageWindow {
    pub fn derive(current_page: usize, page_size: usize, total_count: usize) -> Self {
        let page_size = page_size.max(1);
        let start_index = current_page.saturating_sub(1).saturating_mul(page_size);
        Self {
            current_page,
            page_size,
            total_count,
            start_index,
            end_index: start_index.saturating_add(page_size),
            total_pages: total_count.div_ceil(page_size),
        }
    }

    /// Rows of this page, clipped to the collection.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start_index.min(items.len());
        let end = self.end_index.min(items.len());
        &items[start..end]
    }

    /// 1-based position of the first row shown, 0 when the page is empty.
    pub fn first_shown(&self) -> usize {
        if self.start_index >= self.total_count {
            0
        } else {
            self.start_index + 1
        }
    }

    pub fn last_shown(&self) -> usize {
        self.end_index.min(self.total_count)
    }

    pub fn has_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn controls(&self) -> Vec<PageControl> {
        page_controls(self.current_page, self.total_pages)
    }
}

/// First and last pages are always listed, along with the pages adjacent to
/// the current one. A page exactly two away from the current page stands in
/// for the gap as a single ellipsis.
pub fn page_controls(current_page: usize, total_pages: usize) -> Vec<PageControl> {
    let mut controls = Vec::new();
    for page in 1..=total_pages {
        let near_current = page + 1 >= current_page && page <= current_page.saturating_add(1);
        if page == 1 || page == total_pages || near_current {
            controls.push(PageControl::Page(page));
        } else if page + 2 == current_page || page == current_page.saturating_add(2) {
            controls.push(PageControl::Ellipsis);
        }
    }
    controls
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn window(&self, total_count: usize) -> PageWindow {
        PageWindow::derive(self.current_page, self.page_size, total_count)
    }

    /// Does not clamp; callers reject pages outside `1..=total_pages`.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn next(&mut self, total_count: usize) -> bool {
        if self.current_page < self.window(total_count).total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}
