//! Filesystem-backed FileStore
//!
//! Documents live under a vault root directory and are addressed by `/`-separated relative
//! paths. Absolute paths and `..` components are rejected so a canvas can never point the
//! synchronizer outside the vault.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::io::AsyncWriteExt;

use super::{DocumentId, FileStore, StoreError};

/// [`FileStore`] over a vault directory on disk
#[derive(Debug, Clone)]
pub struct FsFileStore {
    root: PathBuf,
}

impl FsFileStore {
    /// Create a store rooted at `root` (the directory is not created or checked here)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Vault root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a vault-relative path onto the filesystem
    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(path.trim_start_matches("./"));

        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StoreError::invalid_path(path));
                }
            }
        }
        Ok(resolved)
    }
}

fn map_not_found(err: std::io::Error, id: &str) -> StoreError {
    if err.kind() == ErrorKind::NotFound {
        StoreError::not_found(id)
    } else {
        StoreError::Io(err)
    }
}

#[async_trait]
impl FileStore for FsFileStore {
    async fn read(&self, id: &str) -> Result<String, StoreError> {
        let path = self.resolve(id)?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| map_not_found(e, id))
    }

    async fn write(&self, id: &str, text: &str) -> Result<(), StoreError> {
        let path = self.resolve(id)?;

        // Writes only ever target existing documents
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| map_not_found(e, id))?;
        if !metadata.is_file() {
            return Err(StoreError::not_found(id));
        }

        tokio::fs::write(&path, text).await?;
        tracing::debug!("Wrote {} bytes to {}", text.len(), id);
        Ok(())
    }

    async fn create(&self, path: &str, text: &str) -> Result<DocumentId, StoreError> {
        let resolved = self.resolve(path)?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&resolved)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StoreError::already_exists(path),
                _ => map_not_found(e, path),
            })?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!("Created {}", path);
        Ok(path.to_string())
    }

    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        let resolved = self.resolve(path)?;
        match tokio::fs::metadata(&resolved).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn exists_folder(&self, path: &str) -> Result<bool, StoreError> {
        let resolved = self.resolve(path)?;
        match tokio::fs::metadata(&resolved).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        let resolved = self.resolve(path)?;
        tokio::fs::create_dir_all(&resolved).await?;
        Ok(())
    }
}
