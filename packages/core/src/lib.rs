//! Canvas Atomizer Core
//!
//! This crate turns long markdown documents into linked atomic notes laid out on a JSON canvas,
//! and keeps a textual backlink record in every note in step with the canvas edges.
//!
//! # Architecture
//!
//! - **Line-based heading structure**: Sections are computed from heading lines, not a markdown AST
//! - **Fence aware**: Headings inside fenced code blocks are never structural
//! - **Snapshot diffing**: Edge changes are detected by diffing against the last committed graph,
//!   so missed events self-heal on the next pass
//! - **Host-owned storage**: All document I/O goes through the async [`store::FileStore`] trait
//!
//! # Modules
//!
//! - [`sections`] - Heading boundaries, section content and section trees
//! - [`backlinks`] - Idempotent backlink text mutations and the read-modify-write writer
//! - [`graph`] - Canvas wire format, graph model and the edge snapshot/differ
//! - [`sync`] - Edge synchronizer orchestrating diff passes
//! - [`atomize`] - Two-phase extraction of sections into their own notes
//! - [`store`] - FileStore trait plus in-memory and filesystem implementations
//! - [`config`] - Serializable configuration for sync and atomize behaviour

pub mod atomize;
pub mod backlinks;
pub mod config;
pub mod graph;
pub mod sections;
pub mod store;
pub mod sync;
pub mod utils;

// Re-export commonly used types
pub use atomize::{
    AtomizeError, AtomizeOutcome, AtomizePlan, CreatedNote, NoteAtomizer, Placement,
};
pub use backlinks::{BacklinkWriter, LinkDirection};
pub use config::{AtomizeConfig, AtomizerConfig, SyncConfig};
pub use graph::{CanvasDocument, GraphEdge, GraphNode, GraphSnapshot, NodeKind};
pub use sections::{ExtractedSection, Heading, SectionRange};
pub use store::{DocumentId, FileStore, FsFileStore, MemoryFileStore, StoreError};
pub use sync::{EdgeFailure, EdgeSynchronizer, SyncError, SyncReport};
