mod page;
mod paginated_result;
mod pagination_error;

pub use page::Pagination;
pub use paginated_result::PaginatedResult;
pub use pagination_error::PaginationError;
