//! Recursive section trees
//!
//! A section tree is rebuilt from scratch on every call. Each recursive step receives its own
//! `(start, end)` sub-range and walks it with a local cursor, so no iterator state is shared
//! between levels. Recursion depth is bounded by [`MAX_HEADING_LEVEL`] because every child is
//! strictly deeper than its parent.

use super::extractor::{parse_heading, SectionScanner};
use serde::{Deserialize, Serialize};

/// Deepest markdown heading level
pub const MAX_HEADING_LEVEL: usize = 6;

/// One node of a section tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSection {
    /// Heading text without markers
    pub heading_text: String,
    /// Heading level, 1 through 6
    pub heading_level: usize,
    /// Zero-based line of the heading in the source document
    pub heading_line: usize,
    /// Trimmed body lines that are not part of any child section
    pub content: String,
    /// Directly nested subsections in document order
    pub children: Vec<ExtractedSection>,
}

impl ExtractedSection {
    /// Sections in pre-order (self first), each paired with its depth below `self`
    pub fn flatten(&self) -> Vec<(usize, &ExtractedSection)> {
        let mut out = Vec::new();
        self.collect_preorder(0, &mut out);
        out
    }

    fn collect_preorder<'s>(&'s self, depth: usize, out: &mut Vec<(usize, &'s ExtractedSection)>) {
        out.push((depth, self));
        for child in &self.children {
            child.collect_preorder(depth + 1, out);
        }
    }

    /// Total number of sections in this subtree, including `self`
    pub fn section_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ExtractedSection::section_count)
            .sum::<usize>()
    }

    /// The heading line as markdown, e.g. `## Title`
    pub fn heading_markdown(&self) -> String {
        format!("{} {}", "#".repeat(self.heading_level), self.heading_text)
    }

    /// Render the subtree back to markdown: heading, content and children separated by one
    /// blank line each
    pub fn render(&self) -> String {
        let mut blocks = vec![self.heading_markdown()];
        if !self.content.is_empty() {
            blocks.push(self.content.clone());
        }
        blocks.extend(self.children.iter().map(ExtractedSection::render));
        blocks.join("\n\n")
    }
}

/// Build the nested section tree for the heading at `heading_line`.
///
/// Lines between the heading and its boundary are walked once. A structural heading deeper
/// than the current level starts a child whose subtree is extracted recursively; the cursor
/// then resumes at that child's own boundary. Every other line goes into the current node's
/// flat content.
///
/// Returns `None` when `heading_line` is outside the document.
///
/// # Examples
///
/// ```
/// use canvas_atomizer_core::sections::extract_section_tree;
///
/// let text = "# Book\nPreface\n## Ch 1\nOne\n### 1.1\nDeep\n## Ch 2\nTwo";
/// let tree = extract_section_tree(text, 0, 1).unwrap();
///
/// assert_eq!(tree.content, "Preface");
/// assert_eq!(tree.children.len(), 2);
/// assert_eq!(tree.children[0].children[0].heading_text, "1.1");
/// ```
pub fn extract_section_tree(
    text: &str,
    heading_line: usize,
    heading_level: usize,
) -> Option<ExtractedSection> {
    let scanner = SectionScanner::new(text);
    let range = scanner.range(heading_line, heading_level)?;

    Some(build_section(
        &scanner,
        heading_line,
        heading_level,
        range.content_start,
        range.content_end,
    ))
}

fn build_section(
    scanner: &SectionScanner<'_>,
    heading_line: usize,
    heading_level: usize,
    start: usize,
    end: usize,
) -> ExtractedSection {
    let mut content_lines: Vec<&str> = Vec::new();
    let mut children = Vec::new();
    let mut cursor = start;

    while cursor < end {
        if let Some(level) = scanner.structural_level(cursor) {
            if level > heading_level {
                // The parent's boundary already stops at any heading <= heading_level,
                // so the child's boundary can never run past it
                let child_end = scanner.section_end(cursor + 1, level).min(end);
                children.push(build_section(scanner, cursor, level, cursor + 1, child_end));
                cursor = child_end;
                continue;
            }
        }

        if let Some(line) = scanner.line(cursor) {
            content_lines.push(line);
        }
        cursor += 1;
    }

    let raw_heading = scanner.line(heading_line).unwrap_or_default();
    let heading_text = parse_heading(raw_heading)
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| raw_heading.trim().to_string());

    ExtractedSection {
        heading_text,
        heading_level,
        heading_line,
        content: content_lines.join("\n").trim().to_string(),
        children,
    }
}
