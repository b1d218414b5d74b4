/// Card view page size
pub const CARD_PAGE_SIZE: usize = 30;
/// Magazine view page size
pub const MAGAZINE_PAGE_SIZE: usize = 24;

/// Growing window over an ordered result: the first `loaded_pages * page_size` items.
///
/// Loading more only extends the window; it never reorders or refilters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    loaded_pages: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1), loaded_pages: 1 }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn loaded_pages(&self) -> usize {
        self.loaded_pages
    }

    /// Number of items shown out of `total`
    pub fn visible_len(&self, total: usize) -> usize {
        total.min(self.loaded_pages.saturating_mul(self.page_size))
    }

    /// Visible prefix of `items`
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_len(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible_len(total) < total
    }

    /// Extend the window by one page; returns `false` (and does nothing) once
    /// the window already covers all `total` items
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.loaded_pages += 1;
        true
    }

    /// Back to the first page, for a freshly applied result set
    pub fn reset(&mut self) {
        self.loaded_pages = 1;
    }
}
