//! Read-modify-write backlink mutations
//!
//! Every operation reads the whole document, applies one pure mutation from
//! [`text`](super::text) and writes the result back in a single call. When the mutation
//! reports nothing to do, or produces identical text, `write` is never called.

use std::sync::Arc;

use super::text;
use crate::store::{FileStore, StoreError};

/// Applies backlink mutations to documents in a [`FileStore`]
#[derive(Clone)]
pub struct BacklinkWriter {
    store: Arc<dyn FileStore>,
}

impl BacklinkWriter {
    /// Create a writer over `store`
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Replace a heading's body with a `[[link_target]]` pointer.
    ///
    /// # Returns
    ///
    /// `Ok(true)` when the document was rewritten, `Ok(false)` when the heading line is out of
    /// range or the section already holds exactly that pointer.
    pub async fn replace_section(
        &self,
        doc: &str,
        heading_line: usize,
        heading_level: usize,
        link_target: &str,
    ) -> Result<bool, StoreError> {
        self.mutate(doc, |current| {
            text::replace_section_text(current, heading_line, heading_level, link_target)
        })
        .await
    }

    /// Append `- [[link_target]]` to the `## {section_name}` section, creating it if needed.
    ///
    /// No-op when the document already links to `link_target` anywhere.
    pub async fn append_to_connections_section(
        &self,
        doc: &str,
        link_target: &str,
        section_name: &str,
    ) -> Result<bool, StoreError> {
        self.append_link_entry(doc, link_target, section_name, "")
            .await
    }

    /// Same as [`append_to_connections_section`](Self::append_to_connections_section) with a
    /// direction marker between the bullet and the link
    pub async fn append_link_entry(
        &self,
        doc: &str,
        link_target: &str,
        section_name: &str,
        marker: &str,
    ) -> Result<bool, StoreError> {
        self.mutate(doc, |current| {
            text::append_connection_text(current, link_target, section_name, marker)
        })
        .await
    }

    /// Inverse of [`append_to_connections_section`](Self::append_to_connections_section):
    /// remove the bullets linking to `link_target` from the connections section
    pub async fn remove_from_connections_section(
        &self,
        doc: &str,
        link_target: &str,
        section_name: &str,
    ) -> Result<bool, StoreError> {
        self.mutate(doc, |current| {
            text::remove_connection_text(current, link_target, section_name)
        })
        .await
    }

    async fn mutate<F>(&self, doc: &str, mutation: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&str) -> Option<String> + Send,
    {
        let current = self.store.read(doc).await?;

        match mutation(&current) {
            Some(updated) if updated != current => {
                self.store.write(doc, &updated).await?;
                tracing::debug!("Updated backlinks in {}", doc);
                Ok(true)
            }
            _ => {
                tracing::debug!("No backlink change needed in {}", doc);
                Ok(false)
            }
        }
    }
}
