use crate::storage::Row;

use super::Pagination;

/// One page of rows together with the pagination that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct PaginatedResult {
    pagination: Pagination,
    results: Vec<Row>,
}

impl PaginatedResult {
    pub fn new(pagination: Pagination, results: Vec<Row>) -> Self {
        Self {
            pagination,
            results,
        }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn results(&self) -> &[Row] {
        &self.results
    }

    pub fn into_parts(self) -> (Pagination, Vec<Row>) {
        (self.pagination, self.results)
    }
}
