//! Backing-file access for the catalog.
//!
//! # Responsibility
//! - Define the load/save contract the store persists through.
//! - Keep file format details out of the service layer.
//!
//! # Invariants
//! - `save` always writes the complete catalog.
//! - `load` rejects invalid persisted state instead of masking it.

pub mod catalog_file;
