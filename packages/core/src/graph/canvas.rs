//! JSON Canvas wire format
//!
//! Only the fields the core reads are typed. Everything else (colors, labels, sides, card
//! text, urls, top-level metadata) is kept in flattened `extra` maps and written back
//! untouched, and coordinates stay as [`serde_json::Number`] so integers are not rewritten as
//! floats.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::model::{Graph, GraphEdge, GraphNode, NodeKind};

/// Canvas parsing and serialization errors
#[derive(Error, Debug)]
pub enum CanvasError {
    /// The canvas text is not a valid canvas JSON document
    #[error("Malformed canvas: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The canvas could not be turned back into text
    #[error("Canvas serialization failed: {0}")]
    Serialize(String),
}

/// A whole canvas file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    #[serde(default)]
    pub nodes: Vec<CanvasNode>,
    #[serde(default)]
    pub edges: Vec<CanvasEdge>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One canvas node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub x: Number,
    pub y: Number,
    pub width: Number,
    pub height: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One canvas edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasEdge {
    pub id: String,
    pub from_node: String,
    pub to_node: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanvasNode {
    /// New file node at the given position
    pub fn file(
        id: impl Into<String>,
        path: impl Into<String>,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Self {
        Self {
            id: id.into(),
            node_type: "file".to_string(),
            file: Some(path.into()),
            x: Number::from(x),
            y: Number::from(y),
            width: Number::from(width),
            height: Number::from(height),
            extra: Map::new(),
        }
    }

    /// Graph kind of this node
    pub fn kind(&self) -> NodeKind {
        match (self.node_type.as_str(), &self.file) {
            ("file", Some(path)) => NodeKind::File { path: path.clone() },
            ("text", _) => NodeKind::Text,
            ("link", _) => NodeKind::Link,
            ("group", _) => NodeKind::Group,
            (other, _) => NodeKind::Other {
                node_type: other.to_string(),
            },
        }
    }

    /// `(x, y, width, height)` as floats for layout math
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let float = |n: &Number| n.as_f64().unwrap_or_default();
        (
            float(&self.x),
            float(&self.y),
            float(&self.width),
            float(&self.height),
        )
    }
}

impl CanvasEdge {
    pub fn new(
        id: impl Into<String>,
        from_node: impl Into<String>,
        to_node: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_node: from_node.into(),
            to_node: to_node.into(),
            extra: Map::new(),
        }
    }
}

impl CanvasDocument {
    /// Parse canvas text; an empty or whitespace-only file is an empty canvas
    pub fn parse(text: &str) -> Result<Self, CanvasError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize as tab-indented JSON
    pub fn to_json_string(&self) -> Result<String, CanvasError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| CanvasError::Serialize(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| CanvasError::Serialize(e.to_string()))
    }

    /// Node by id
    pub fn node(&self, id: &str) -> Option<&CanvasNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// First file node showing the document at `path`
    pub fn file_node(&self, path: &str) -> Option<&CanvasNode> {
        self.nodes
            .iter()
            .find(|node| node.node_type == "file" && node.file.as_deref() == Some(path))
    }

    /// Graph projection used for diffing
    pub fn to_graph(&self) -> Graph {
        let nodes = self
            .nodes
            .iter()
            .map(|node| GraphNode::new(node.id.clone(), node.kind()))
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|edge| {
                GraphEdge::new(
                    edge.id.clone(),
                    edge.from_node.clone(),
                    edge.to_node.clone(),
                )
            })
            .collect();
        Graph::new(nodes, edges)
    }
}
