//! FileStore Error Types

use thiserror::Error;

/// Errors raised by [`FileStore`](super::FileStore) implementations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Document does not exist
    #[error("Document not found: {id}")]
    NotFound { id: String },

    /// A create call targeted a path that is already taken
    #[error("Document already exists: {path}")]
    AlreadyExists { path: String },

    /// Path escapes the store root or is otherwise unusable
    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    /// Store could not be accessed (poisoned lock, injected failure, ...)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Underlying filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an already exists error
    pub fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Whether this error means the document is missing
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io(err) => err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
