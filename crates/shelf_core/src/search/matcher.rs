//! Case-insensitive substring matching.
//!
//! # Invariants
//! - Matching never mutates records.
//! - An empty needle matches every record.

use crate::model::book::Book;

/// Record attribute a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Author,
    Year,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Author, SearchField::Year];

    /// Parses exactly `title`, `author` or `year`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Year => "year",
        }
    }
}

/// Returns whether `needle` occurs in the rendered `field` of `book`,
/// comparing Unicode-lowercased text.
pub fn matches(book: &Book, field: SearchField, needle: &str) -> bool {
    let haystack = book.field_text(field).to_lowercase();
    haystack.contains(needle.to_lowercase().as_str())
}
