//! Extraction plans

use serde::{Deserialize, Serialize};

use super::error::AtomizeError;
use crate::sections::{extract_section_tree, ExtractedSection, SectionScanner};
use crate::store::DocumentId;

/// One section that can become a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCandidate {
    /// Position in [`AtomizePlan::candidates`], pre-order
    pub index: usize,
    /// Nesting depth below the root section
    pub depth: usize,
    /// Index of the enclosing section's candidate, `None` for the root
    pub parent: Option<usize>,
    pub heading_text: String,
    pub heading_level: usize,
    /// Zero-based line of the heading in the source document
    pub heading_line: usize,
}

/// Result of the pure planning phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomizePlan {
    pub source: DocumentId,
    pub heading_line: usize,
    pub heading_level: usize,
    /// Section tree as it was when the plan was computed
    pub root: ExtractedSection,
    pub candidates: Vec<SectionCandidate>,
}

impl AtomizePlan {
    /// Plan the extraction of the section headed at `heading_line` in `text`
    pub fn compute(
        source: impl Into<DocumentId>,
        text: &str,
        heading_line: usize,
        heading_level: usize,
    ) -> Result<Self, AtomizeError> {
        let root = extract_section_tree(text, heading_line, heading_level).ok_or_else(|| {
            AtomizeError::out_of_range(heading_line, SectionScanner::new(text).line_count())
        })?;
        let candidates = candidates_of(&root);

        Ok(Self {
            source: source.into(),
            heading_line,
            heading_level,
            root,
            candidates,
        })
    }

    /// Mask selecting every candidate
    pub fn select_all(&self) -> Vec<bool> {
        vec![true; self.candidates.len()]
    }

    /// Mask selecting only the root section; children stay inline in the root note
    pub fn root_only(&self) -> Vec<bool> {
        let mut mask = vec![false; self.candidates.len()];
        if let Some(root) = mask.first_mut() {
            *root = true;
        }
        mask
    }

    /// Sections in candidate order
    pub fn sections(&self) -> Vec<&ExtractedSection> {
        self.root
            .flatten()
            .into_iter()
            .map(|(_, section)| section)
            .collect()
    }
}

fn candidates_of(root: &ExtractedSection) -> Vec<SectionCandidate> {
    let mut candidates = Vec::with_capacity(root.section_count());
    push_candidates(root, 0, None, &mut candidates);
    candidates
}

fn push_candidates(
    section: &ExtractedSection,
    depth: usize,
    parent: Option<usize>,
    out: &mut Vec<SectionCandidate>,
) {
    let index = out.len();
    out.push(SectionCandidate {
        index,
        depth,
        parent,
        heading_text: section.heading_text.clone(),
        heading_level: section.heading_level,
        heading_line: section.heading_line,
    });

    for child in &section.children {
        push_candidates(child, depth + 1, Some(index), out);
    }
}
