//! Typed errors for document loading and section decoding

use std::path::PathBuf;

use thiserror::Error;

use crate::core::model::{ItemError, ResultItem};

/// A data document could not be used
#[derive(Debug, Error)]
pub enum DataError {
    /// The document is missing or unreadable
    #[error("data unavailable: cannot read {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or misses a required field
    #[error("malformed data in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DataError {
    /// Stable code used in result items
    pub fn code(&self) -> &'static str {
        match self {
            DataError::Unavailable { .. } => "DATA_UNAVAILABLE",
            DataError::Malformed { .. } => "DATA_MALFORMED",
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            DataError::Unavailable { path, .. } | DataError::Malformed { path, .. } => path,
        }
    }

    pub fn to_item_error(&self) -> ItemError {
        ItemError::new(self.code(), self.to_string())
    }

    pub fn to_result_item(&self) -> ResultItem {
        ResultItem::error(self.to_item_error())
            .with_source(crate::core::paths::normalize_path(self.path()))
    }
}

/// A guide section whose content does not fit its key
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("section '{0}' has no content")]
    MissingContent(String),

    #[error("section '{key}' has malformed content: {source}")]
    Content {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
