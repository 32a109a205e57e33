//! Catalog use-case services.
//!
//! # Responsibility
//! - Keep the in-memory catalog and the backing file consistent.
//! - Keep the command surface decoupled from storage details.

pub mod catalog_store;
