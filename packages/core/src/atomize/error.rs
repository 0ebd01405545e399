//! Atomizer Error Types

use crate::graph::CanvasError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors raised while planning or committing an extraction
#[derive(Error, Debug)]
pub enum AtomizeError {
    /// Heading line is not inside the document
    #[error("Heading line {line} is out of range (document has {line_count} lines)")]
    OutOfRange { line: usize, line_count: usize },

    /// Selection mask does not match the candidate list
    #[error("Selection has {actual} entries, plan has {expected} candidates")]
    SelectionMismatch { expected: usize, actual: usize },

    /// The source note changed after the plan was computed
    #[error("Source document {source_id} changed since the plan was computed")]
    StalePlan { source_id: String },

    /// Target folder does not exist and may not be created
    #[error("Notes folder does not exist: {folder}")]
    FolderMissing { folder: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),
}

impl AtomizeError {
    /// Create an out of range error
    pub fn out_of_range(line: usize, line_count: usize) -> Self {
        Self::OutOfRange { line, line_count }
    }

    /// Create a selection mismatch error
    pub fn selection_mismatch(expected: usize, actual: usize) -> Self {
        Self::SelectionMismatch { expected, actual }
    }

    /// Create a stale plan error
    pub fn stale_plan(source_id: impl Into<String>) -> Self {
        Self::StalePlan {
            source_id: source_id.into(),
        }
    }

    /// Create a folder missing error
    pub fn folder_missing(folder: impl Into<String>) -> Self {
        Self::FolderMissing {
            folder: folder.into(),
        }
    }
}
