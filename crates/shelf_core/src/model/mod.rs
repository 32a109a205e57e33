//! Catalog domain model.
//!
//! # Responsibility
//! - Define the typed book record shared by storage, search and service.
//!
//! # Invariants
//! - Records are removed permanently; there are no tombstones.

pub mod book;
