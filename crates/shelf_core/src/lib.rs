//! Core logic for the personal book catalog.
//! This crate owns every record invariant; callers only render results.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{ConfigError, ShelfConfig, DEFAULT_DATA_FILE};
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LoggingError,
};
pub use model::book::{
    next_book_id, validate_catalog, Book, BookId, BookStatus, CatalogValidationError, Year,
};
pub use repo::catalog_file::{CatalogBackend, JsonFileBackend, RepoError, RepoResult};
pub use search::{matches, SearchField};
pub use service::catalog_store::{CatalogStore, StatusChange, UsageError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
