use serde::Serialize;

use super::PaginationError;

/// Position within a paged listing. `current_page` is taken as given and may
/// lie past the last page, which simply describes an empty page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    current_page: u64,
    per_page: u64,
    total_count: u64,
    total_pages: u64,
}

impl Pagination {
    pub fn new(current_page: u64, per_page: u64, total_count: u64) -> Result<Self, PaginationError> {
        if current_page == 0 {
            return Err(PaginationError::InvalidPage(current_page));
        }
        if per_page == 0 {
            return Err(PaginationError::InvalidPerPage(per_page));
        }
        Ok(Self {
            current_page,
            per_page,
            total_count,
            total_pages: total_count.div_ceil(per_page),
        })
    }

    /// Same page request, recounted against a new total.
    pub fn with_total_count(self, total_count: u64) -> Self {
        Self {
            total_count,
            total_pages: total_count.div_ceil(self.per_page),
            ..self
        }
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// `ceil(total_count / per_page)`; zero only for an empty listing.
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Rows to skip before the current page starts.
    pub fn offset(&self) -> u64 {
        (self.current_page - 1).saturating_mul(self.per_page)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
