//! Single-field substring search over in-memory records.
//!
//! # Responsibility
//! - Parse the searchable field names.
//! - Decide whether one record matches a query value.

pub mod matcher;

pub use matcher::{matches, SearchField};
