use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::paths::parent_folder;
use super::{DocumentId, FileStore, StoreError};

#[derive(Default)]
struct MemoryState {
    documents: HashMap<String, String>,
    folders: HashSet<String>,
    failing: HashSet<String>,
}

/// In-memory implementation for tests and embedding hosts.
///
/// Clones share the same underlying documents, so a test can keep a handle while the
/// synchronizer owns another.
#[derive(Clone, Default)]
pub struct MemoryFileStore {
    state: Arc<Mutex<MemoryState>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `(path, text)` pairs
    pub fn with_documents<I, P, T>(documents: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<String>,
        T: Into<String>,
    {
        let store = Self::new();
        {
            let mut state = store.state_mut();
            for (path, text) in documents {
                state.documents.insert(path.into(), text.into());
            }
        }
        store
    }

    /// Insert or replace a document without counting a write
    pub fn insert(&self, path: impl Into<String>, text: impl Into<String>) {
        self.state_mut()
            .documents
            .insert(path.into(), text.into());
    }

    /// Current text of a document
    pub fn document(&self, path: &str) -> Option<String> {
        self.state_mut().documents.get(path).cloned()
    }

    /// Paths of every stored document, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.state_mut().documents.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Register an empty folder
    pub fn add_folder(&self, path: impl Into<String>) {
        self.state_mut()
            .folders
            .insert(path.into().trim_matches('/').to_string());
    }

    /// Make every read and write of `path` fail until cleared
    pub fn fail_on(&self, path: impl Into<String>) {
        self.state_mut().failing.insert(path.into());
    }

    /// Remove all injected failures
    pub fn clear_failures(&self) {
        self.state_mut().failing.clear();
    }

    /// Number of successful `write` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// State for the setup and inspection helpers, recovered even if a holder panicked
    fn state_mut(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::unavailable("Failed to acquire lock"))
    }
}

impl MemoryState {
    fn check_failure(&self, path: &str) -> Result<(), StoreError> {
        if self.failing.contains(path) {
            return Err(StoreError::unavailable(format!(
                "Injected failure for {}",
                path
            )));
        }
        Ok(())
    }

    fn has_folder(&self, folder: &str) -> bool {
        let folder = folder.trim_matches('/');
        if folder.is_empty() || self.folders.contains(folder) {
            return true;
        }

        let prefix = format!("{}/", folder);
        self.documents.keys().any(|path| path.starts_with(&prefix))
            || self.folders.iter().any(|known| known.starts_with(&prefix))
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn read(&self, id: &str) -> Result<String, StoreError> {
        let state = self.lock()?;
        state.check_failure(id)?;

        state
            .documents
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn write(&self, id: &str, text: &str) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        state.check_failure(id)?;

        match state.documents.get_mut(id) {
            Some(existing) => {
                *existing = text.to_string();
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            None => Err(StoreError::not_found(id)),
        }
    }

    async fn create(&self, path: &str, text: &str) -> Result<DocumentId, StoreError> {
        let mut state = self.lock()?;
        state.check_failure(path)?;

        if state.documents.contains_key(path) {
            return Err(StoreError::already_exists(path));
        }
        if !state.has_folder(parent_folder(path)) {
            return Err(StoreError::not_found(parent_folder(path)));
        }

        state.documents.insert(path.to_string(), text.to_string());
        Ok(path.to_string())
    }

    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.documents.contains_key(path))
    }

    async fn exists_folder(&self, path: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.has_folder(path))
    }

    async fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);
            state.folders.insert(current.clone());
        }
        Ok(())
    }
}
