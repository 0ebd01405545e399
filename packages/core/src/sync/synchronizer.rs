//! Edge-driven backlink synchronizer

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::SyncError;
use super::report::{EdgeFailure, SyncReport};
use crate::backlinks::{BacklinkWriter, LinkDirection};
use crate::config::SyncConfig;
use crate::graph::{CanvasDocument, Graph, GraphEdge, GraphNode, GraphSnapshot};
use crate::store::{document_basename, is_markdown, DocumentId, FileStore, StoreError};

/// Keeps the connection sections of the notes on one canvas in step with its edges.
///
/// Owns the canvas snapshot; `&mut self` on every pass means at most one pass per canvas runs
/// at a time.
pub struct EdgeSynchronizer {
    canvas_id: DocumentId,
    store: Arc<dyn FileStore>,
    writer: BacklinkWriter,
    config: SyncConfig,
    snapshot: GraphSnapshot,
}

/// Both document endpoints of an edge
struct EdgeDocuments {
    from: DocumentId,
    to: DocumentId,
}

impl EdgeSynchronizer {
    /// Create a synchronizer for the canvas at `canvas_id` with an empty snapshot
    pub fn new(
        store: Arc<dyn FileStore>,
        canvas_id: impl Into<DocumentId>,
        config: SyncConfig,
    ) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            writer: BacklinkWriter::new(store.clone()),
            store,
            config,
            snapshot: GraphSnapshot::new(),
        }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Last committed graph
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    /// Forget the committed graph; the next pass treats every edge as added
    pub fn reset(&mut self) {
        self.snapshot.reset();
    }

    /// Seed the snapshot from the canvas without touching any note
    pub async fn initialize_from_canvas(&mut self) -> Result<(), SyncError> {
        let graph = self.load_graph().await?;
        self.snapshot.commit(&graph);
        info!(
            "Initialized snapshot for {} with {} edges",
            self.canvas_id,
            self.snapshot.edge_count()
        );
        Ok(())
    }

    /// Run one pass after the canvas changed.
    ///
    /// A malformed canvas yields an aborted report and leaves the snapshot as it was. An
    /// unreadable canvas is the only error returned.
    pub async fn on_graph_modified(&mut self) -> Result<SyncReport, SyncError> {
        let graph = match self.load_graph().await {
            Ok(graph) => graph,
            Err(SyncError::MalformedGraphDocument { id, message }) => {
                warn!("Skipping pass, malformed canvas {}: {}", id, message);
                return Ok(SyncReport::aborted());
            }
            Err(err) => return Err(err),
        };

        Ok(self.apply_graph(&graph).await)
    }

    /// Diff `graph` against the snapshot, mirror the changes into the notes, then commit it
    pub async fn apply_graph(&mut self, graph: &Graph) -> SyncReport {
        let mut report = SyncReport::default();

        let removed = self.snapshot.diff_removed(&graph.edges);
        let added = self.snapshot.diff_added(&graph.edges);
        report.edges_removed = removed.len();
        report.edges_added = added.len();

        for edge in &removed {
            self.handle_removed(edge, graph, &mut report).await;
        }

        let current_nodes = graph.nodes_by_id();
        for edge in &added {
            self.handle_added(edge, &current_nodes, &mut report).await;
        }

        self.snapshot.commit(graph);

        if report.has_failures() {
            warn!("Sync pass for {} finished with failures: {}", self.canvas_id, report);
        } else {
            debug!("Sync pass for {}: {}", self.canvas_id, report);
        }
        report
    }

    async fn load_graph(&self) -> Result<Graph, SyncError> {
        let text = self.store.read(&self.canvas_id).await?;
        let canvas = CanvasDocument::parse(&text)
            .map_err(|e| SyncError::malformed(self.canvas_id.clone(), &e))?;
        Ok(canvas.to_graph())
    }

    async fn handle_removed(&self, edge: &GraphEdge, graph: &Graph, report: &mut SyncReport) {
        // Removed edges only exist in the prior snapshot
        let Some(docs) = resolve_documents(edge, self.snapshot.nodes_by_id()) else {
            report.skipped += 1;
            return;
        };

        if graph.connects(&edge.from_node, &edge.to_node) {
            debug!(
                "Edge {} removed but {} and {} are still connected",
                edge.id, edge.from_node, edge.to_node
            );
            report.skipped += 1;
            return;
        }

        let result = self.unlink(&docs.from, &docs.to).await;
        record(report, &edge.id, &docs.from, result);

        let result = self.unlink(&docs.to, &docs.from).await;
        record(report, &edge.id, &docs.to, result);
    }

    async fn handle_added(
        &self,
        edge: &GraphEdge,
        current_nodes: &HashMap<String, GraphNode>,
        report: &mut SyncReport,
    ) {
        let Some(docs) = resolve_documents(edge, current_nodes) else {
            report.skipped += 1;
            return;
        };

        let result = self
            .link(&docs.from, &docs.to, LinkDirection::Outbound)
            .await;
        record(report, &edge.id, &docs.from, result);

        let result = self.link(&docs.to, &docs.from, LinkDirection::Inbound).await;
        record(report, &edge.id, &docs.to, result);
    }

    async fn link(
        &self,
        doc: &str,
        other: &str,
        direction: LinkDirection,
    ) -> Result<bool, StoreError> {
        if !is_markdown(doc) {
            return Ok(false);
        }
        self.writer
            .append_link_entry(
                doc,
                document_basename(other),
                &self.config.section_name,
                direction.marker(&self.config),
            )
            .await
    }

    async fn unlink(&self, doc: &str, other: &str) -> Result<bool, StoreError> {
        if !is_markdown(doc) {
            return Ok(false);
        }
        self.writer
            .remove_from_connections_section(
                doc,
                document_basename(other),
                &self.config.section_name,
            )
            .await
    }
}

/// Backing documents of both endpoints, or `None` when the edge cannot produce backlinks
fn resolve_documents(
    edge: &GraphEdge,
    nodes: &HashMap<String, GraphNode>,
) -> Option<EdgeDocuments> {
    let document_of = |node_id: &str| {
        let doc = nodes
            .get(node_id)
            .and_then(|node| node.document_ref())
            .map(str::to_string);
        if doc.is_none() {
            debug!("Edge {}: node {} has no backing document", edge.id, node_id);
        }
        doc
    };

    let from = document_of(&edge.from_node)?;
    let to = document_of(&edge.to_node)?;

    if from == to {
        debug!("Edge {} joins {} to itself", edge.id, from);
        return None;
    }

    Some(EdgeDocuments { from, to })
}

fn record(report: &mut SyncReport, edge_id: &str, doc: &str, result: Result<bool, StoreError>) {
    match result {
        Ok(true) => report.documents_updated.push(doc.to_string()),
        Ok(false) => {}
        Err(err) => {
            warn!("Edge {}: failed to update {}: {}", edge_id, doc, err);
            report.failures.push(EdgeFailure {
                edge_id: edge_id.to_string(),
                document: doc.to_string(),
                message: err.to_string(),
            });
        }
    }
}

// Include tests
#[cfg(test)]
#[path = "synchronizer_test.rs"]
mod synchronizer_test;
