/// Number of pages needed for `len` items. Never less than one, so an empty
/// set still has a (blank) first page. A `page_size` of zero means a single
/// unbounded page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Page cursor over an active set whose length changes underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            current: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based current page.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Half-open `(start, end)` bounds of the current page over `len` items.
    pub fn window(&self, len: usize) -> (usize, usize) {
        if self.page_size == 0 {
            return (0, len);
        }
        let page = self.current.min(self.total(len) - 1);
        let start = (page * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        (start, end)
    }

    /// Advance one page. Returns whether the page changed.
    pub fn next(&mut self, len: usize) -> bool {
        if self.current + 1 < self.total(len) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns whether the page changed.
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Pull the cursor back inside the valid range after the set shrank.
    pub fn clamp(&mut self, len: usize) {
        self.current = self.current.min(self.total(len) - 1);
    }
}
