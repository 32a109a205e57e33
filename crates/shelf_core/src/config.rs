//! Runtime configuration for the catalog tool.
//!
//! # Responsibility
//! - Resolve the backing-file path and logging settings from optional
//!   overrides.
//!
//! # Invariants
//! - `log_dir` is always absolute after resolution.
//! - `log_level` is always a normalized level name.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Backing file used when no path is given, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "library.json";
/// Log directory name created next to the backing file.
pub const DEFAULT_LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    Logging(LoggingError),
    /// Path could not be made absolute.
    Path { path: PathBuf, source: std::io::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::Path { path, source } => {
                write!(f, "cannot resolve path `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Path { source, .. } => Some(source),
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    pub data_file: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl ShelfConfig {
    /// Resolves settings, filling unset values with defaults.
    ///
    /// # Errors
    /// - `log_level` is not a supported level.
    /// - A relative path cannot be made absolute.
    pub fn resolve(
        data_file: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let data_file = data_file.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let log_level = match log_level {
            Some(level) => normalize_level(level)?,
            None => default_log_level(),
        };
        let log_dir = match log_dir {
            Some(dir) => absolute(&dir)?,
            None => default_log_dir(&data_file)?,
        };

        Ok(Self {
            data_file,
            log_level,
            log_dir,
        })
    }
}

fn default_log_dir(data_file: &Path) -> Result<PathBuf, ConfigError> {
    let parent = data_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    absolute(&parent.join(DEFAULT_LOG_DIR_NAME))
}

fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path).map_err(|source| ConfigError::Path {
        path: path.to_path_buf(),
        source,
    })
}
