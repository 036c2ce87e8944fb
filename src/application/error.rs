//! Application-level errors (wraps matcher errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::MatchError;

/// Errors raised by selection operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("query '{selector}' failed")]
    Query {
        selector: String,
        #[source]
        source: MatchError,
    },

    #[error("index {index} out of bounds for selection of size {size}")]
    IndexOutOfBounds { index: isize, size: usize },

    #[error("reverse ranges not supported, range supplied is [{from}..{to})")]
    ReverseRange { from: isize, to: isize },

    #[error("negative range indexes not supported, range supplied is [{from}..{to})")]
    NegativeRange { from: isize, to: isize },

    #[error("range [{from}..{to}) exceeds selection of size {size}")]
    RangeOutOfBounds { from: isize, to: isize, size: usize },
}

/// Result type for selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid setting {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
