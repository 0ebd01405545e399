//! Document Storage
//!
//! The host application owns every document. The core only sees it through the async
//! [`FileStore`] trait, and never caches text beyond a single read-modify-write.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryFileStore`] - `HashMap` backed store with write counting and failure injection
//! - [`FsFileStore`] - Vault directory on disk via `tokio::fs`

mod error;
mod fs;
mod memory;
mod paths;

pub use error::StoreError;
pub use fs::FsFileStore;
pub use memory::MemoryFileStore;
pub use paths::{document_basename, is_markdown, join_path, parent_folder, MARKDOWN_EXTENSION};

use async_trait::async_trait;

/// Vault-relative path identifying a document
pub type DocumentId = String;

/// Async access to the host's named text blobs.
///
/// Every mutation the core performs is a `read` followed by at most one `write` of the full
/// text. Implementations must make `write` a full overwrite of an existing document.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Full text of a document; [`StoreError::NotFound`] when it does not exist
    async fn read(&self, id: &str) -> Result<String, StoreError>;

    /// Overwrite an existing document
    async fn write(&self, id: &str, text: &str) -> Result<(), StoreError>;

    /// Create a new document, failing with [`StoreError::AlreadyExists`] if the path is taken
    async fn create(&self, path: &str, text: &str) -> Result<DocumentId, StoreError>;

    /// Whether a document exists at `path`
    async fn exists(&self, path: &str) -> Result<bool, StoreError>;

    /// Whether a folder exists at `path` (`""` is the vault root and always exists)
    async fn exists_folder(&self, path: &str) -> Result<bool, StoreError>;

    /// Create a folder and any missing parents
    async fn create_folder(&self, path: &str) -> Result<(), StoreError>;
}
