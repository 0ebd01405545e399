//! Backlink Maintenance
//!
//! Textual side of the graph: every edge between two notes is mirrored by a bullet
//! `- [[Other Note]]` under a `## {section}` heading in each note, and an extracted section is
//! replaced by a bare `[[New Note]]` pointer under its original heading.
//!
//! # Layers
//!
//! - [`text`] - Pure `&str -> Option<String>` mutations, `None` meaning "nothing to do"
//! - [`BacklinkWriter`] - Read-modify-write of those mutations against a [`FileStore`]
//!
//! [`FileStore`]: crate::store::FileStore

pub mod text;
mod writer;

pub use writer::BacklinkWriter;

use crate::config::SyncConfig;
use serde::{Deserialize, Serialize};

/// Which end of an edge a backlink is written from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkDirection {
    /// Written into the edge's `fromNode` document, pointing at `toNode`
    Outbound,
    /// Written into the edge's `toNode` document, pointing at `fromNode`
    Inbound,
}

impl LinkDirection {
    /// Marker placed between the bullet and the link for this direction
    pub fn marker<'c>(&self, config: &'c SyncConfig) -> &'c str {
        match self {
            LinkDirection::Outbound => &config.outbound_marker,
            LinkDirection::Inbound => &config.inbound_marker,
        }
    }
}
