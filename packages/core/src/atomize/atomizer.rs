//! Committing extraction plans against a store

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::AtomizeError;
use super::placement::{layout_notes, short_id, Placement};
use super::plan::AtomizePlan;
use crate::backlinks::BacklinkWriter;
use crate::config::AtomizeConfig;
use crate::graph::CanvasDocument;
use crate::sections::{extract_section_tree, ExtractedSection};
use crate::store::{
    document_basename, join_path, parent_folder, DocumentId, FileStore, StoreError,
};
use crate::utils::{note_file_stem, wiki_link};

/// Upper bound on ` N` suffixes tried for one note name
const MAX_NAME_SUFFIX: usize = 1000;

/// A note created by [`NoteAtomizer::commit`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedNote {
    /// Candidate index in the plan
    pub candidate: usize,
    pub document: DocumentId,
    pub heading_text: String,
    /// Nesting depth among the created notes (the root note is 0)
    pub depth: usize,
    /// Index into [`AtomizeOutcome::notes`] of the note linking to this one
    pub parent: Option<usize>,
}

/// Result of a committed extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomizeOutcome {
    pub source: DocumentId,
    /// Created notes in pre-order, root first
    pub notes: Vec<CreatedNote>,
}

impl AtomizeOutcome {
    /// Note that replaced the source section
    pub fn root(&self) -> Option<&CreatedNote> {
        self.notes.first()
    }
}

/// Turns section plans into notes.
///
/// # Examples
///
/// ```no_run
/// # use std::sync::Arc;
/// # use canvas_atomizer_core::{AtomizeConfig, MemoryFileStore, NoteAtomizer};
/// # async fn run() -> Result<(), canvas_atomizer_core::AtomizeError> {
/// let atomizer = NoteAtomizer::new(Arc::new(MemoryFileStore::new()), AtomizeConfig::default());
/// let plan = atomizer.plan("Project.md", 4, 2).await?;
/// let outcome = atomizer.commit(&plan, &plan.select_all()).await?;
/// atomizer.place_on_canvas("Board.canvas", None, &outcome).await?;
/// # Ok(())
/// # }
/// ```
pub struct NoteAtomizer {
    store: Arc<dyn FileStore>,
    writer: BacklinkWriter,
    config: AtomizeConfig,
}

impl NoteAtomizer {
    pub fn new(store: Arc<dyn FileStore>, config: AtomizeConfig) -> Self {
        Self {
            writer: BacklinkWriter::new(store.clone()),
            store,
            config,
        }
    }

    pub fn config(&self) -> &AtomizeConfig {
        &self.config
    }

    /// Read `source` and plan the extraction of the section at `heading_line`
    pub async fn plan(
        &self,
        source: &str,
        heading_line: usize,
        heading_level: usize,
    ) -> Result<AtomizePlan, AtomizeError> {
        let text = self.store.read(source).await?;
        AtomizePlan::compute(source, &text, heading_line, heading_level)
    }

    /// Create the selected notes and point the source section at the root note.
    ///
    /// `selection` needs one entry per candidate. The root is always extracted, whatever its
    /// entry says. A selected child appears in its parent note as its heading followed by a
    /// link; an unselected child stays inline in the nearest selected ancestor.
    ///
    /// Notes are created before the source is rewritten, so a failing `create` leaves the
    /// source untouched.
    pub async fn commit(
        &self,
        plan: &AtomizePlan,
        selection: &[bool],
    ) -> Result<AtomizeOutcome, AtomizeError> {
        if selection.len() != plan.candidates.len() {
            return Err(AtomizeError::selection_mismatch(
                plan.candidates.len(),
                selection.len(),
            ));
        }

        let mut selected = selection.to_vec();
        if let Some(root) = selected.first_mut() {
            *root = true;
        }

        self.ensure_fresh(plan).await?;
        let folder = self.resolve_folder(&plan.source).await?;

        // Reserve every name before creating anything so pointers can be rendered
        let sections = plan.sections();
        let mut reserved = HashSet::new();
        let mut paths: Vec<Option<DocumentId>> = Vec::with_capacity(sections.len());
        for (section, is_selected) in sections.iter().zip(&selected) {
            if *is_selected {
                let path = self
                    .unique_path(&folder, &section.heading_text, &reserved)
                    .await?;
                reserved.insert(path.clone());
                paths.push(Some(path));
            } else {
                paths.push(None);
            }
        }

        let mut notes: Vec<CreatedNote> = Vec::new();
        for (index, section) in sections.iter().enumerate() {
            let Some(path) = &paths[index] else {
                continue;
            };

            let body = render_note(section, index, &paths);
            let document = self.store.create(path, &body).await?;
            debug!("Created note {} from '{}'", document, section.heading_text);

            let parent = nearest_selected_ancestor(plan, index, &selected).and_then(|ancestor| {
                notes.iter().position(|note| note.candidate == ancestor)
            });
            let depth = parent.map_or(0, |p| notes[p].depth + 1);

            notes.push(CreatedNote {
                candidate: index,
                document,
                heading_text: section.heading_text.clone(),
                depth,
                parent,
            });
        }

        if let Some(root) = notes.first() {
            self.writer
                .replace_section(
                    &plan.source,
                    plan.heading_line,
                    plan.heading_level,
                    document_basename(&root.document),
                )
                .await?;
        }

        info!(
            "Extracted {} notes from {} at line {}",
            notes.len(),
            plan.source,
            plan.heading_line
        );

        Ok(AtomizeOutcome {
            source: plan.source.clone(),
            notes,
        })
    }

    /// Add one file node per created note to a canvas and connect them.
    ///
    /// Nodes go in a grid to the right of `anchor_node` (or the canvas origin), one column
    /// per nesting depth. Edges run parent to child, and from the anchor to the root note.
    /// Every existing canvas field is written back unchanged.
    pub async fn place_on_canvas(
        &self,
        canvas_id: &str,
        anchor_node: Option<&str>,
        outcome: &AtomizeOutcome,
    ) -> Result<Placement, AtomizeError> {
        let text = self.store.read(canvas_id).await?;
        let mut canvas = CanvasDocument::parse(&text)?;

        let anchor = anchor_node.and_then(|id| {
            let node = canvas.node(id);
            if node.is_none() {
                warn!("Anchor node {} not found in {}, placing at origin", id, canvas_id);
            }
            node
        });

        let placement = layout_notes(outcome, anchor, &self.config, short_id);
        canvas.nodes.extend(placement.nodes.iter().cloned());
        canvas.edges.extend(placement.edges.iter().cloned());

        self.store.write(canvas_id, &canvas.to_json_string()?).await?;
        info!(
            "Placed {} notes and {} edges on {}",
            placement.nodes.len(),
            placement.edges.len(),
            canvas_id
        );
        Ok(placement)
    }

    async fn ensure_fresh(&self, plan: &AtomizePlan) -> Result<(), AtomizeError> {
        let text = self.store.read(&plan.source).await?;
        let current = extract_section_tree(&text, plan.heading_line, plan.heading_level);

        if current.as_ref() != Some(&plan.root) {
            return Err(AtomizeError::stale_plan(plan.source.clone()));
        }
        Ok(())
    }

    async fn resolve_folder(&self, source: &str) -> Result<String, AtomizeError> {
        let folder = match &self.config.notes_folder {
            Some(folder) => folder.trim_matches('/').to_string(),
            None => parent_folder(source).to_string(),
        };

        if !self.store.exists_folder(&folder).await? {
            if !self.config.create_missing_folder {
                return Err(AtomizeError::folder_missing(folder));
            }
            self.store.create_folder(&folder).await?;
            debug!("Created notes folder {}", folder);
        }
        Ok(folder)
    }

    /// `{folder}/{stem}.md`, or `{stem} 2.md`, `{stem} 3.md`, ... when taken
    async fn unique_path(
        &self,
        folder: &str,
        heading_text: &str,
        reserved: &HashSet<String>,
    ) -> Result<String, AtomizeError> {
        let stem = note_file_stem(heading_text);

        for suffix in 1..=MAX_NAME_SUFFIX {
            let file_name = if suffix == 1 {
                format!("{}.md", stem)
            } else {
                format!("{} {}.md", stem, suffix)
            };
            let path = join_path(folder, &file_name);
            if !reserved.contains(&path) && !self.store.exists(&path).await? {
                return Ok(path);
            }
        }

        Err(StoreError::already_exists(join_path(folder, &format!("{}.md", stem))).into())
    }
}

/// Body of the note for the section at candidate `index`
fn render_note(section: &ExtractedSection, index: usize, paths: &[Option<DocumentId>]) -> String {
    let mut blocks = vec![section.heading_markdown()];
    if !section.content.is_empty() {
        blocks.push(section.content.clone());
    }

    // Pre-order: a child's index follows its parent and all earlier siblings' subtrees
    let mut child_index = index + 1;
    for child in &section.children {
        match paths.get(child_index).and_then(Option::as_ref) {
            Some(path) => blocks.push(format!(
                "{}\n\n{}",
                child.heading_markdown(),
                wiki_link(document_basename(path))
            )),
            None => blocks.push(render_note(child, child_index, paths)),
        }
        child_index += child.section_count();
    }

    blocks.join("\n\n")
}

fn nearest_selected_ancestor(plan: &AtomizePlan, index: usize, selected: &[bool]) -> Option<usize> {
    let mut current = plan.candidates.get(index)?.parent;
    while let Some(candidate) = current {
        if selected[candidate] {
            return Some(candidate);
        }
        current = plan.candidates[candidate].parent;
    }
    None
}

// Include tests
#[cfg(test)]
#[path = "atomizer_test.rs"]
mod atomizer_test;
