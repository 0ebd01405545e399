//! Graph nodes and edges as seen by the synchronizer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::store::DocumentId;

/// What a canvas node stands for.
///
/// Only [`NodeKind::File`] is backed by a document; every other kind is graph-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    /// Node embedding a vault document
    File { path: DocumentId },
    /// Free-form text card
    Text,
    /// Web link card
    Link,
    /// Visual group around other nodes
    Group,
    /// Node type this crate does not know about
    Other { node_type: String },
}

/// A canvas node reduced to identity and kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Node backed by the document at `path`
    pub fn file(id: impl Into<String>, path: impl Into<DocumentId>) -> Self {
        Self::new(id, NodeKind::File { path: path.into() })
    }

    /// Graph-only text node
    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Text)
    }

    /// Backing document, if this node has one
    pub fn document_ref(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { path } => Some(path.as_str()),
            _ => None,
        }
    }
}

/// A directed canvas edge; direction is cosmetic for backlink purposes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub from_node: String,
    pub to_node: String,
}

impl GraphEdge {
    pub fn new(
        id: impl Into<String>,
        from_node: impl Into<String>,
        to_node: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_node: from_node.into(),
            to_node: to_node.into(),
        }
    }

    /// Whether this edge joins `a` and `b` in either direction
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from_node == a && self.to_node == b) || (self.from_node == b && self.to_node == a)
    }
}

/// Whether any edge in `edges` joins `a` and `b` in either direction
pub fn is_connected(edges: &[GraphEdge], a: &str, b: &str) -> bool {
    edges.iter().any(|edge| edge.connects(a, b))
}

/// Nodes and edges parsed from one canvas
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Node lookup table keyed by id (later duplicates win)
    pub fn nodes_by_id(&self) -> HashMap<String, GraphNode> {
        self.nodes
            .iter()
            .map(|node| (node.id.clone(), node.clone()))
            .collect()
    }

    /// Whether any edge joins `a` and `b` in either direction
    pub fn connects(&self, a: &str, b: &str) -> bool {
        is_connected(&self.edges, a, b)
    }
}
