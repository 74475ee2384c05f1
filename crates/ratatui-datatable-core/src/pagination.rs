use crate::error::Result;
use crate::error::TableError;
use std::ops::Range;

/// The `(page index, page size)` cursor.
///
/// `page_size` is always positive. The page index is kept in range by [`Pagination::clamp`], which
/// the table calls after every change to the filtered row count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page_index: usize,
    page_size: usize,
}

/// Pagination facts a renderer needs, computed for a given filtered row count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationSummary {
    pub page_index: usize,
    pub page_size: usize,
    /// `ceil(row_count / page_size)`; zero when there are no rows.
    pub page_count: usize,
    /// Filtered row count.
    pub row_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

impl Pagination {
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page_index: 0,
            page_size,
        })
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size)
    }

    /// Changes the page size and clamps the index for `row_count`. Zero is rejected and leaves the
    /// cursor untouched.
    pub fn set_page_size(&mut self, page_size: usize, row_count: usize) -> Result<()> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        self.clamp(row_count);
        Ok(())
    }

    /// Moves to `index` if it names an existing page. Returns `true` if the cursor moved.
    pub fn set_page_index(&mut self, index: usize, row_count: usize) -> bool {
        if index >= self.page_count(row_count) || index == self.page_index {
            return false;
        }
        self.page_index = index;
        true
    }

    pub fn next_page(&mut self, row_count: usize) -> bool {
        self.set_page_index(self.page_index.saturating_add(1), row_count)
    }

    pub fn previous_page(&mut self, row_count: usize) -> bool {
        match self.page_index.checked_sub(1) {
            Some(index) => self.set_page_index(index, row_count),
            None => false,
        }
    }

    /// Pulls the index back to the last page, or to zero when there are no rows.
    pub fn clamp(&mut self, row_count: usize) {
        let last = self.page_count(row_count).saturating_sub(1);
        self.page_index = self.page_index.min(last);
    }

    /// Index range of the current page within `row_count` rows.
    pub fn slice(&self, row_count: usize) -> Range<usize> {
        let start = self.page_index.saturating_mul(self.page_size).min(row_count);
        let end = start.saturating_add(self.page_size).min(row_count);
        start..end
    }

    pub fn summary(&self, row_count: usize) -> PaginationSummary {
        let page_count = self.page_count(row_count);
        PaginationSummary {
            page_index: self.page_index,
            page_size: self.page_size,
            page_count,
            row_count,
            can_previous: self.page_index > 0,
            can_next: self.page_index + 1 < page_count,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}
