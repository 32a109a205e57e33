//! Book domain model.
//!
//! # Responsibility
//! - Define the single record type kept in the catalog.
//! - Provide id assignment and catalog-level validation helpers.
//!
//! # Invariants
//! - `id` is positive and unique within one catalog.
//! - `status` is always one of the two `BookStatus` values.
//! - Ids are assigned by the store, never by callers.

use crate::search::SearchField;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned record identifier. Always `>= 1`.
pub type BookId = u64;

/// Publication year. No range validation is applied.
pub type Year = i32;

/// Availability state of one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// On the shelf.
    #[serde(alias = "в наличии")]
    Available,
    /// Lent out.
    #[serde(alias = "выдана")]
    CheckedOut,
}

impl BookStatus {
    /// Parses the wire spelling (`available` / `checked_out`).
    ///
    /// Only the exact spellings match; anything else yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(Self::Available),
            "checked_out" => Some(Self::CheckedOut),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::CheckedOut => "checked_out",
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cataloged book.
///
/// Field declaration order is the field order of the backing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: Year,
    pub status: BookStatus,
}

impl Book {
    /// Creates a record in the `available` state.
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: Year,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status: BookStatus::Available,
        }
    }

    /// Textual rendering of one searchable field.
    pub fn field_text(&self, field: SearchField) -> String {
        match field {
            SearchField::Title => self.title.clone(),
            SearchField::Author => self.author.clone(),
            SearchField::Year => self.year.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }
}

/// Consistency violations found in a loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValidationError {
    /// A record carries id `0`.
    ZeroId { position: usize },
    /// Two records share one id.
    DuplicateId(BookId),
    /// The highest id is `BookId::MAX`, so no further id can be assigned.
    IdSpaceExhausted,
}

impl Display for CatalogValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroId { position } => {
                write!(f, "record at position {position} has id 0; ids must be positive")
            }
            Self::DuplicateId(id) => write!(f, "duplicate book id {id}"),
            Self::IdSpaceExhausted => write!(f, "no book id left after {}", BookId::MAX),
        }
    }
}

impl Error for CatalogValidationError {}

/// Checks id positivity and uniqueness over a whole catalog.
pub fn validate_catalog(books: &[Book]) -> Result<(), CatalogValidationError> {
    let mut seen = HashSet::with_capacity(books.len());
    for (position, book) in books.iter().enumerate() {
        if book.id == 0 {
            return Err(CatalogValidationError::ZeroId { position });
        }
        if !seen.insert(book.id) {
            return Err(CatalogValidationError::DuplicateId(book.id));
        }
    }
    Ok(())
}

/// Returns the id the next added record receives.
///
/// `max(id) + 1`, which restarts at 1 once the catalog is empty.
/// Returns `None` when the highest id is already `BookId::MAX`.
pub fn next_book_id(books: &[Book]) -> Option<BookId> {
    books.iter().map(|book| book.id).max().unwrap_or(0).checked_add(1)
}
