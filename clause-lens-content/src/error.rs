//! Error types for content loading and store access.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    /// The bundle text is not valid RON for [`crate::ContentBundle`].
    #[error("failed to parse content bundle: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to read content bundle: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing store could not answer a query.
    #[error("content store error: {message}")]
    Store { message: String },
}

impl ContentError {
    pub fn store(message: impl Into<String>) -> Self {
        ContentError::Store {
            message: message.into(),
        }
    }
}

pub type ContentResult<T> = Result<T, ContentError>;
