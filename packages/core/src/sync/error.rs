//! Synchronizer Error Types

use crate::graph::CanvasError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that stop a whole synchronization pass
#[derive(Error, Debug)]
pub enum SyncError {
    /// The canvas itself could not be read
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The canvas text is not a valid graph document
    #[error("Malformed graph document {id}: {message}")]
    MalformedGraphDocument { id: String, message: String },
}

impl SyncError {
    /// Create a malformed graph document error
    pub fn malformed(id: impl Into<String>, err: &CanvasError) -> Self {
        Self::MalformedGraphDocument {
            id: id.into(),
            message: err.to_string(),
        }
    }
}
