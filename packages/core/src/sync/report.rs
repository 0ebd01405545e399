//! Outcome of one synchronization pass

use serde::{Deserialize, Serialize};

use crate::store::DocumentId;

/// A backlink mutation that failed for one edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeFailure {
    pub edge_id: String,
    pub document: DocumentId,
    pub message: String,
}

/// What a pass did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// The canvas could not be parsed; nothing else in the report is meaningful
    pub aborted: bool,
    /// Added edges seen by the differ
    pub edges_added: usize,
    /// Removed edges seen by the differ
    pub edges_removed: usize,
    /// Edges skipped because an endpoint had no backing document, or the pair is still linked
    pub skipped: usize,
    /// Documents rewritten, in write order (may repeat)
    pub documents_updated: Vec<DocumentId>,
    /// Per-edge failures; these never stop the pass
    pub failures: Vec<EdgeFailure>,
}

impl SyncReport {
    pub(crate) fn aborted() -> Self {
        Self {
            aborted: true,
            ..Default::default()
        }
    }

    /// Whether the host should surface a notification
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Whether the pass changed nothing
    pub fn is_noop(&self) -> bool {
        self.documents_updated.is_empty() && self.failures.is_empty()
    }
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.aborted {
            return write!(f, "aborted (malformed canvas)");
        }
        write!(
            f,
            "{} added, {} removed, {} skipped, {} documents updated, {} failures",
            self.edges_added,
            self.edges_removed,
            self.skipped,
            self.documents_updated.len(),
            self.failures.len()
        )
    }
}
