//! Graph Snapshot and Edge Differ
//!
//! The snapshot is the synchronizer's last committed view of a canvas. Diffing is by edge id
//! against that baseline, never by event, so a pass that was skipped or failed is picked up
//! by the next one.
//!
//! # Lifecycle
//!
//! ```text
//! empty --initialize--> seeded --(diff, commit)*--> ... --reset--> empty
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use super::model::{Graph, GraphEdge, GraphNode};

/// Last committed edges and nodes of one canvas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSnapshot {
    /// Ordered by id so removal diffs are deterministic
    edges_by_id: BTreeMap<String, GraphEdge>,
    nodes_by_id: HashMap<String, GraphNode>,
}

impl GraphSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot holding exactly the nodes and edges of `graph`
    pub fn from_graph(graph: &Graph) -> Self {
        let mut snapshot = Self::new();
        snapshot.commit(graph);
        snapshot
    }

    /// Replace both maps wholesale
    pub fn set_snapshot(
        &mut self,
        edges: impl IntoIterator<Item = GraphEdge>,
        nodes_by_id: HashMap<String, GraphNode>,
    ) {
        self.edges_by_id = edges
            .into_iter()
            .map(|edge| (edge.id.clone(), edge))
            .collect();
        self.nodes_by_id = nodes_by_id;
    }

    /// Replace the snapshot with the nodes and edges of `graph`
    pub fn commit(&mut self, graph: &Graph) {
        self.set_snapshot(graph.edges.iter().cloned(), graph.nodes_by_id());
    }

    /// Edges in `current` whose id is not in the snapshot, in `current` order
    pub fn diff_added(&self, current: &[GraphEdge]) -> Vec<GraphEdge> {
        current
            .iter()
            .filter(|edge| !self.edges_by_id.contains_key(&edge.id))
            .cloned()
            .collect()
    }

    /// Snapshot edges whose id is missing from `current`, ordered by id
    pub fn diff_removed(&self, current: &[GraphEdge]) -> Vec<GraphEdge> {
        let current_ids: HashSet<&str> = current.iter().map(|edge| edge.id.as_str()).collect();

        self.edges_by_id
            .values()
            .filter(|edge| !current_ids.contains(edge.id.as_str()))
            .cloned()
            .collect()
    }

    /// Clear both maps
    pub fn reset(&mut self) {
        self.edges_by_id.clear();
        self.nodes_by_id.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.edges_by_id.is_empty() && self.nodes_by_id.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges_by_id.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes_by_id.len()
    }

    /// Node from the committed graph
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes_by_id.get(id)
    }

    /// Committed node lookup table
    pub fn nodes_by_id(&self) -> &HashMap<String, GraphNode> {
        &self.nodes_by_id
    }

    /// Edge from the committed graph
    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges_by_id.get(id)
    }

    /// Committed edges ordered by id
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges_by_id.values()
    }
}

// Include tests
#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;
