//! Catalog Store: in-memory records mirrored to a backing file.
//!
//! # Responsibility
//! - Own the ordered catalog for the lifetime of the process.
//! - Rewrite the backing file after every successful mutation.
//! - Report usage errors and not-found outcomes as values.
//!
//! # Invariants
//! - Insertion order is display order.
//! - Ids are unique; the next id is `max(id) + 1`, or 1 when empty.
//! - Queries never touch the backing file.
//! - Mutations update memory first; a failed rewrite leaves memory ahead
//!   of disk and surfaces as `RepoError`.

use crate::model::book::{
    next_book_id, Book, BookId, BookStatus, CatalogValidationError, Year,
};
use crate::repo::catalog_file::{CatalogBackend, JsonFileBackend, RepoResult};
use crate::search::{matches, SearchField};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Rejected request caused by invalid input. Never changes state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Search field outside `title|author|year`.
    InvalidSearchField(String),
    /// Status outside `available|checked_out`.
    InvalidStatus(String),
}

impl Display for UsageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSearchField(value) => {
                write!(f, "invalid search field `{value}`; expected title|author|year")
            }
            Self::InvalidStatus(value) => {
                write!(f, "invalid status `{value}`; expected available|checked_out")
            }
        }
    }
}

impl Error for UsageError {}

/// Outcome of a status change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// Record found, status written and catalog persisted.
    Updated,
    /// No record with the requested id.
    NotFound,
    /// Requested status is not one of the accepted values.
    InvalidStatus(String),
}

/// Ordered catalog plus the backend it is mirrored to.
pub struct CatalogStore<B: CatalogBackend> {
    backend: B,
    books: Vec<Book>,
}

impl CatalogStore<JsonFileBackend> {
    /// Opens a store backed by the JSON file at `path`.
    ///
    /// A missing file yields an empty catalog; the file is created by the
    /// first successful mutation.
    pub fn open_file(path: impl Into<PathBuf>) -> RepoResult<Self> {
        Self::open(JsonFileBackend::new(path))
    }
}

impl<B: CatalogBackend> CatalogStore<B> {
    /// Loads the full catalog from `backend`.
    ///
    /// # Errors
    /// - Any backend load failure; there is no partial recovery.
    pub fn open(backend: B) -> RepoResult<Self> {
        let books = backend.load()?;
        debug!(
            "event=store_open module=store status=ok count={}",
            books.len()
        );
        Ok(Self { backend, books })
    }

    /// Adds a new `available` record at the end of the catalog.
    ///
    /// Returns the assigned id.
    ///
    /// # Errors
    /// - `RepoError::Validation(IdSpaceExhausted)` when the highest id is
    ///   `BookId::MAX`; the catalog is left unchanged.
    /// - Backend rewrite failures.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: Year,
    ) -> RepoResult<BookId> {
        let Some(id) = next_book_id(&self.books) else {
            error!("event=book_add module=store status=error reason=id_space_exhausted");
            return Err(CatalogValidationError::IdSpaceExhausted.into());
        };
        self.books.push(Book::new(id, title, author, year));
        self.persist("book_add", id)?;
        info!(
            "event=book_add module=store status=ok book_id={} count={}",
            id,
            self.books.len()
        );
        Ok(id)
    }

    /// Removes the record with `id`.
    ///
    /// Returns `false` without rewriting when no record matches.
    pub fn delete(&mut self, id: BookId) -> RepoResult<bool> {
        let Some(position) = self.position(id) else {
            info!("event=book_delete module=store status=not_found book_id={id}");
            return Ok(false);
        };

        self.books.remove(position);
        self.persist("book_delete", id)?;
        info!(
            "event=book_delete module=store status=ok book_id={} count={}",
            id,
            self.books.len()
        );
        Ok(true)
    }

    /// Case-insensitive substring search on a field named by the caller.
    ///
    /// # Errors
    /// - `UsageError::InvalidSearchField` when `field` is not
    ///   `title|author|year`; no matching is performed.
    pub fn search(&self, field: &str, value: &str) -> Result<Vec<Book>, UsageError> {
        match SearchField::parse(field) {
            Some(field) => Ok(self.search_by(field, value)),
            None => {
                warn!("event=book_search module=store status=rejected reason=invalid_field");
                Err(UsageError::InvalidSearchField(field.to_string()))
            }
        }
    }

    /// Typed search; result keeps catalog order.
    pub fn search_by(&self, field: SearchField, value: &str) -> Vec<Book> {
        let hits: Vec<Book> = self
            .books
            .iter()
            .filter(|book| matches(book, field, value))
            .cloned()
            .collect();
        debug!(
            "event=book_search module=store status=ok field={} hits={}",
            field.as_str(),
            hits.len()
        );
        hits
    }

    /// Whole catalog in insertion order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Changes the status of `id` from caller-provided text.
    ///
    /// Invalid status text is rejected before the id is looked up, so it
    /// never mutates any record.
    pub fn change_status(&mut self, id: BookId, status: &str) -> RepoResult<StatusChange> {
        match BookStatus::parse(status) {
            Some(status) => self.set_status(id, status),
            None => {
                warn!(
                    "event=book_status_change module=store status=rejected book_id={id} reason=invalid_status"
                );
                Ok(StatusChange::InvalidStatus(status.to_string()))
            }
        }
    }

    /// Typed status change. Re-setting the current status still rewrites.
    pub fn set_status(&mut self, id: BookId, status: BookStatus) -> RepoResult<StatusChange> {
        let Some(position) = self.position(id) else {
            info!("event=book_status_change module=store status=not_found book_id={id}");
            return Ok(StatusChange::NotFound);
        };

        self.books[position].status = status;
        self.persist("book_status_change", id)?;
        info!(
            "event=book_status_change module=store status=ok book_id={} new_status={}",
            id,
            status.as_str()
        );
        Ok(StatusChange::Updated)
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    fn persist(&self, event: &str, id: BookId) -> RepoResult<()> {
        self.backend.save(&self.books).map_err(|err| {
            error!("event={event} module=store status=error book_id={id} error={err}");
            err
        })
    }
}
