//! Backing-file contract and JSON implementation.
//!
//! # Responsibility
//! - Read the full catalog at startup and rewrite it after mutations.
//! - Map file-system and decoding failures to typed repository errors.
//!
//! # Invariants
//! - A missing file is an empty catalog, and loading never creates it.
//! - `save` truncates and rewrites the whole file; there is no append path.
//! - Log events carry counts and timings only, never record text.

use crate::model::book::{validate_catalog, Book, CatalogValidationError};
use log::{error, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const JSON_INDENT: &[u8] = b"    ";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure. Always an environment problem, never a bad request.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: io::Error },
    InvalidData { path: PathBuf, message: String },
    Validation(CatalogValidationError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "catalog file `{}`: {source}", path.display())
            }
            Self::InvalidData { path, message } => {
                write!(f, "invalid catalog data in `{}`: {message}", path.display())
            }
            Self::Validation(err) => write!(f, "invalid catalog: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidData { .. } => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<CatalogValidationError> for RepoError {
    fn from(value: CatalogValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Durable mirror of the catalog.
pub trait CatalogBackend {
    /// Reads the complete ordered catalog.
    fn load(&self) -> RepoResult<Vec<Book>>;
    /// Replaces the persisted catalog with `books`.
    fn save(&self, books: &[Book]) -> RepoResult<()>;
}

/// Catalog stored as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_books(&self) -> RepoResult<Option<Vec<Book>>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        let books: Vec<Book> =
            serde_json::from_slice(&bytes).map_err(|err| RepoError::InvalidData {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        validate_catalog(&books)?;
        Ok(Some(books))
    }

    fn write_books(&self, books: &[Book]) -> RepoResult<()> {
        let file = File::create(&self.path).map_err(|err| self.io_error(err))?;
        let mut writer = BufWriter::new(file);
        let formatter = PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        books
            .serialize(&mut serializer)
            .map_err(|err| self.io_error(io::Error::from(err)))?;
        writer.flush().map_err(|err| self.io_error(err))?;
        Ok(())
    }
}

impl CatalogBackend for JsonFileBackend {
    fn load(&self) -> RepoResult<Vec<Book>> {
        let started_at = Instant::now();
        match self.read_books() {
            Ok(Some(books)) => {
                info!(
                    "event=catalog_load module=repo status=ok source=file count={} duration_ms={}",
                    books.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(books)
            }
            Ok(None) => {
                info!(
                    "event=catalog_load module=repo status=ok source=missing count=0 duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Vec::new())
            }
            Err(err) => {
                error!(
                    "event=catalog_load module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, books: &[Book]) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.write_books(books) {
            Ok(()) => {
                info!(
                    "event=catalog_save module=repo status=ok count={} duration_ms={}",
                    books.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=catalog_save module=repo status=error count={} duration_ms={} error={}",
                    books.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
