//! Canvas-to-backlink synchronization
//!
//! One [`EdgeSynchronizer`] per canvas keeps the backlink sections of the notes on that canvas
//! in step with its edges. A pass loads the canvas, diffs its edges against the last committed
//! snapshot, mirrors removals and additions into the notes and commits the new graph.
//!
//! # Failure Model
//!
//! - Malformed canvas: the pass is aborted and the snapshot is left untouched
//! - Store failure on one edge: logged, recorded in the [`SyncReport`], other edges continue
//! - Edge endpoint without a backing document: skipped
//! - Canvas unreadable: surfaced as [`SyncError::Store`]

mod error;
mod report;
mod synchronizer;

pub use error::SyncError;
pub use report::{EdgeFailure, SyncReport};
pub use synchronizer::EdgeSynchronizer;
