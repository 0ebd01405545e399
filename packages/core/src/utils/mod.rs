//! Utility functions for Canvas Atomizer Core
//!
//! This module provides text helpers shared by the atomizer and the backlink writer.

mod markdown;

pub use markdown::{note_file_stem, strip_markdown, wiki_link};
