//! Heading boundaries and section content

use super::fence::FenceMask;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// 1-6 `#`, exactly one space, then text containing at least one non-whitespace character
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) (.*\S.*)$").unwrap());

/// Half-open body of a heading: `[content_start, content_end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRange {
    /// First line after the heading
    pub content_start: usize,
    /// Next structural heading at the same or a lower level, or the line count
    pub content_end: usize,
}

impl SectionRange {
    /// Whether the section has no lines at all
    pub fn is_empty(&self) -> bool {
        self.content_start >= self.content_end
    }

    /// Number of lines in the section body
    pub fn len(&self) -> usize {
        self.content_end.saturating_sub(self.content_start)
    }
}

/// A structural heading found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    /// Heading level, 1 through 6
    pub level: usize,
    /// Zero-based line index of the heading
    pub line: usize,
    /// Heading text without the `#` markers, trimmed
    pub text: String,
}

/// Parse a single line as a heading, returning `(level, text)`
///
/// # Examples
///
/// ```
/// use canvas_atomizer_core::sections::parse_heading;
///
/// assert_eq!(parse_heading("## Ideas"), Some((2, "Ideas")));
/// assert_eq!(parse_heading("##Ideas"), None);
/// assert_eq!(parse_heading("####### Too deep"), None);
/// ```
pub fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let captures = HEADING_RE.captures(line)?;
    let level = captures.get(1)?.as_str().len();
    let text = captures.get(2)?.as_str().trim();
    Some((level, text))
}

/// A document split into lines together with its fence mask.
///
/// Building a scanner costs one pass over the text; every query after that is a single
/// forward scan. Scanners hold no mutable state and may be shared freely.
#[derive(Debug, Clone)]
pub struct SectionScanner<'a> {
    lines: Vec<&'a str>,
    mask: FenceMask,
}

impl<'a> SectionScanner<'a> {
    /// Split `text` on `\n` and compute its fence mask
    pub fn new(text: &'a str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let mask = FenceMask::compute(&lines);
        Self { lines, mask }
    }

    /// Number of lines (an empty document has one empty line)
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines of the document
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Line at `index`, if any
    pub fn line(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    /// Fence mask of the document
    pub fn mask(&self) -> &FenceMask {
        &self.mask
    }

    /// Level of the line at `index` when it is a structural (non-fenced) heading
    pub fn structural_level(&self, index: usize) -> Option<usize> {
        if self.mask.is_masked(index) {
            return None;
        }
        self.line(index)
            .and_then(parse_heading)
            .map(|(level, _)| level)
    }

    /// Boundary scan: first structural heading at or after `start` whose level is at most
    /// `level`, or the line count when none follows
    pub fn section_end(&self, start: usize, level: usize) -> usize {
        (start..self.lines.len())
            .find(|index| {
                self.structural_level(*index)
                    .is_some_and(|found| found <= level)
            })
            .unwrap_or(self.lines.len())
    }

    /// Section range for the heading at `heading_line`
    pub fn range(&self, heading_line: usize, heading_level: usize) -> Option<SectionRange> {
        if heading_line >= self.lines.len() {
            return None;
        }

        let content_start = heading_line + 1;
        Some(SectionRange {
            content_start,
            content_end: self.section_end(content_start, heading_level),
        })
    }

    /// Join the lines in `[start, end)` and trim the result
    pub fn join_trimmed(&self, start: usize, end: usize) -> String {
        let end = end.min(self.lines.len());
        if start >= end {
            return String::new();
        }
        self.lines[start..end].join("\n").trim().to_string()
    }

    /// Every structural heading in document order
    pub fn headings(&self) -> Vec<Heading> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.mask.is_masked(*index))
            .filter_map(|(index, line)| {
                parse_heading(line).map(|(level, text)| Heading {
                    level,
                    line: index,
                    text: text.to_string(),
                })
            })
            .collect()
    }
}

/// Compute the half-open body range of the heading at `heading_line`.
///
/// Returns `None` when `heading_line` is outside `[0, line_count)`. The heading line itself is
/// not re-validated: callers supply heading metadata and only the boundary is derived here.
///
/// A heading of the *same* level ends the section, not just a lower one, so sibling headings
/// never nest.
pub fn get_section_range(
    text: &str,
    heading_line: usize,
    heading_level: usize,
) -> Option<SectionRange> {
    SectionScanner::new(text).range(heading_line, heading_level)
}

/// Trimmed body of a section, sub-headings included verbatim.
///
/// Out-of-range headings yield an empty string.
pub fn extract_content(text: &str, heading_line: usize, heading_level: usize) -> String {
    let scanner = SectionScanner::new(text);
    match scanner.range(heading_line, heading_level) {
        Some(range) => scanner.join_trimmed(range.content_start, range.content_end),
        None => String::new(),
    }
}

/// Trimmed section including its heading line as the first line.
pub fn extract_content_with_heading(
    text: &str,
    heading_line: usize,
    heading_level: usize,
) -> String {
    let scanner = SectionScanner::new(text);
    match scanner.range(heading_line, heading_level) {
        Some(range) => scanner.join_trimmed(heading_line, range.content_end),
        None => String::new(),
    }
}

/// Every structural heading in `text`, skipping headings inside code fences
pub fn headings(text: &str) -> Vec<Heading> {
    SectionScanner::new(text).headings()
}

// Include tests
#[cfg(test)]
#[path = "extractor_test.rs"]
mod extractor_test;
