//! Pure backlink text mutations
//!
//! Each function takes the full document text and returns `Some(new_text)` when there is
//! something to change, or `None` when the document is already in the requested state.

use crate::sections::SectionScanner;
use crate::utils::wiki_link;

/// Blank lines in a row that get collapsed to a single blank line
const COLLAPSE_BLANK_RUN: usize = 3;

/// Replace the body of a section with a pointer to the note it was extracted into.
///
/// The heading line stays, followed by one blank line, `[[link_target]]` and one blank line.
/// Runs of three or more blank lines anywhere in the result collapse to one, and trailing
/// whitespace is trimmed. Applying it again with the same target yields the same text.
///
/// Returns `None` when `heading_line` is outside the document.
pub fn replace_section_text(
    text: &str,
    heading_line: usize,
    heading_level: usize,
    link_target: &str,
) -> Option<String> {
    let scanner = SectionScanner::new(text);
    let range = scanner.range(heading_line, heading_level)?;
    let lines = scanner.lines();
    let link = wiki_link(link_target);

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 3);
    out.extend_from_slice(&lines[..range.content_start]);
    out.extend(["", link.as_str(), ""]);
    out.extend_from_slice(&lines[range.content_end..]);

    Some(collapse_blank_runs(&out).trim_end().to_string())
}

/// Add `- {marker}[[link_target]]` to the `## {section_name}` section.
///
/// The duplicate guard is whole-document: if `[[link_target]]` appears anywhere the text is
/// left alone. A missing section is appended at the end after one blank line. An existing
/// section gets the bullet right after its last non-blank line, so blank lines separating it
/// from the next heading stay below the new entry.
pub fn append_connection_text(
    text: &str,
    link_target: &str,
    section_name: &str,
    marker: &str,
) -> Option<String> {
    let link = wiki_link(link_target);
    if text.contains(&link) {
        return None;
    }

    let bullet = format!("- {}{}", marker, link);
    let heading = section_heading(section_name);
    let scanner = SectionScanner::new(text);

    let Some(heading_index) = find_section_heading(&scanner, &heading) else {
        let body = text.trim_end();
        return Some(if body.is_empty() {
            format!("{}\n\n{}", heading, bullet)
        } else {
            format!("{}\n\n{}\n\n{}", body, heading, bullet)
        });
    };

    let lines = scanner.lines();
    let end = connections_section_end(&scanner, heading_index);
    let last_content =
        (heading_index + 1..end).rev().find(|index| !lines[*index].trim().is_empty());

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 2);
    match last_content {
        Some(last) => {
            out.extend_from_slice(&lines[..=last]);
            out.push(&bullet);
            out.extend_from_slice(&lines[last + 1..]);
        }
        None => {
            // Empty section: normalize to heading, blank, bullet
            out.extend_from_slice(&lines[..=heading_index]);
            out.extend(["", bullet.as_str()]);
            if end < lines.len() {
                out.push("");
                out.extend_from_slice(&lines[end..]);
            }
        }
    }

    Some(out.join("\n"))
}

/// Remove every bullet in `## {section_name}` that links to `link_target`.
///
/// Both `[[target]]` and aliased `[[target|alias]]` bullets are removed. When the section is
/// left without any content its heading goes too. Returns `None` when the section is missing
/// or holds no matching bullet.
pub fn remove_connection_text(text: &str, link_target: &str, section_name: &str) -> Option<String> {
    let heading = section_heading(section_name);
    let scanner = SectionScanner::new(text);
    let heading_index = find_section_heading(&scanner, &heading)?;

    let lines = scanner.lines();
    let end = connections_section_end(&scanner, heading_index);
    let plain = wiki_link(link_target);
    let aliased = format!("[[{}|", link_target);

    let (removed, kept): (Vec<&str>, Vec<&str>) = lines[heading_index + 1..end]
        .iter()
        .copied()
        .partition(|line| is_bullet(line) && (line.contains(&plain) || line.contains(&aliased)));
    if removed.is_empty() {
        return None;
    }

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    if kept.iter().any(|line| !line.trim().is_empty()) {
        out.extend_from_slice(&lines[..=heading_index]);
        out.extend(kept);
        out.extend_from_slice(&lines[end..]);
        return Some(out.join("\n"));
    }

    // Section is now empty: drop its heading and the blank lines around it
    out.extend_from_slice(&lines[..heading_index]);
    while out.last().is_some_and(|line| line.trim().is_empty()) {
        out.pop();
    }
    if end < lines.len() {
        if !out.is_empty() {
            out.push("");
        }
        out.extend_from_slice(&lines[end..]);
        Some(out.join("\n"))
    } else {
        Some(out.join("\n").trim_end().to_string())
    }
}

/// Collapse every run of [`COLLAPSE_BLANK_RUN`] or more blank lines into one blank line
pub fn collapse_blank_runs(lines: &[&str]) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut index = 0;

    while index < lines.len() {
        if !lines[index].trim().is_empty() {
            out.push(lines[index]);
            index += 1;
            continue;
        }

        let run_end = (index..lines.len())
            .find(|i| !lines[*i].trim().is_empty())
            .unwrap_or(lines.len());
        if run_end - index >= COLLAPSE_BLANK_RUN {
            out.push("");
        } else {
            out.extend_from_slice(&lines[index..run_end]);
        }
        index = run_end;
    }

    out.join("\n")
}

/// Heading line of a connections section
pub fn section_heading(section_name: &str) -> String {
    format!("## {}", section_name)
}

/// Structural line equal to `heading` (trailing whitespace ignored)
fn find_section_heading(scanner: &SectionScanner<'_>, heading: &str) -> Option<usize> {
    scanner
        .lines()
        .iter()
        .enumerate()
        .find(|(index, line)| !scanner.mask().is_masked(*index) && line.trim_end() == heading)
        .map(|(index, _)| index)
}

/// End of a connections section: the next level-1 or level-2 heading, or end of document
fn connections_section_end(scanner: &SectionScanner<'_>, heading_index: usize) -> usize {
    let lines = scanner.lines();
    (heading_index + 1..lines.len())
        .find(|index| {
            !scanner.mask().is_masked(*index)
                && (lines[*index].starts_with("# ") || lines[*index].starts_with("## "))
        })
        .unwrap_or(lines.len())
}

fn is_bullet(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("+ ")
}

// Include tests
#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;
