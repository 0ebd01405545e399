//! Graph Model
//!
//! The canvas is a JSON document of nodes and edges. This module splits it into three layers:
//!
//! - [`canvas`] - Wire format with lossless pass-through of fields the core does not use
//! - [`model`] - Minimal graph view: nodes as a sum type, edges as endpoint pairs
//! - [`snapshot`] - Last committed graph and the edge differ used by the synchronizer

pub mod canvas;
pub mod model;
pub mod snapshot;

pub use canvas::{CanvasDocument, CanvasEdge, CanvasError, CanvasNode};
pub use model::{Graph, GraphEdge, GraphNode, NodeKind};
pub use snapshot::GraphSnapshot;
