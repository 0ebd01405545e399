//! Note Atomizer
//!
//! Splits a heading section out of a note into new notes of their own. The work happens in
//! two phases so a host can show a preview between them:
//!
//! 1. [`AtomizePlan::compute`] - Pure. Builds the section tree under a heading and lists every
//!    section as a candidate, root first, in document order.
//! 2. [`NoteAtomizer::commit`] - Takes the plan and one `bool` per candidate, creates a note
//!    for each selected section and replaces the source section with a `[[link]]` to the root
//!    note.
//!
//! [`NoteAtomizer::place_on_canvas`] then lays the new notes out on a canvas and connects them
//! with edges, which the synchronizer turns into backlinks on its next pass.

mod atomizer;
mod error;
mod placement;
mod plan;

pub use atomizer::{AtomizeOutcome, CreatedNote, NoteAtomizer};
pub use error::AtomizeError;
pub use placement::{layout_notes, short_id, Placement};
pub use plan::{AtomizePlan, SectionCandidate};
