// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::types::TemplateId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("template root not found or unreadable: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("unknown template id: {0}")]
    UnknownTemplate(TemplateId),

    #[error("no template matches '{0}'")]
    UnknownPath(String),

    #[error("cannot walk {}: {source}", path.display())]
    Walk {
        source: walkdir::Error,
        path: PathBuf,
    },

    #[error("I/O error: {source} (path: {})", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("invalid template index: {0}")]
    InvalidIndex(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Error::Io {
            source,
            path: path.into(),
        }
    }

    /// True for the "not found" family (missing root, unknown id or path).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::RootNotFound { .. } | Error::UnknownTemplate(_) | Error::UnknownPath(_)
        )
    }
}
