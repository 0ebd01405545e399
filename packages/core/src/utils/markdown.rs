//! Markdown stripping utilities for note naming
//!
//! Headings become file names when a section is extracted into its own note. This module
//! strips inline formatting from heading text and removes characters that are not allowed in
//! file names or that would break a `[[wiki link]]`.

use regex::Regex;
use std::sync::LazyLock;

/// Compiled regex patterns for markdown stripping
///
/// The order of these patterns matters:
/// 1. Images first (to not conflict with links or italic)
/// 2. Wiki links (alias wins over target)
/// 3. Links (before italic since links use brackets)
/// 4. Bold (before italic since ** conflicts with *)
/// 5. Other inline styles
static MARKDOWN_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // Remove images FIRST: ![alt](url) -> alt
        (Regex::new(r"!\[([^\]]*)\]\([^)]+\)").unwrap(), "$1"),
        // Aliased wiki links: [[target|alias]] -> alias
        (Regex::new(r"\[\[[^\]|]+\|([^\]]+)\]\]").unwrap(), "$1"),
        // Plain wiki links: [[target]] -> target
        (Regex::new(r"\[\[([^\]]+)\]\]").unwrap(), "$1"),
        // Remove markdown links, keeping link text: [text](url) -> text
        (Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap(), "$1"),
        // Remove inline code: `code` -> code
        (Regex::new(r"`([^`]+)`").unwrap(), "$1"),
        // Remove bold: **text** or __text__ -> text (process before italic)
        (Regex::new(r"\*\*([^*]+)\*\*").unwrap(), "$1"),
        (Regex::new(r"__([^_]+)__").unwrap(), "$1"),
        // Remove strikethrough: ~~text~~ -> text
        (Regex::new(r"~~([^~]+)~~").unwrap(), "$1"),
        // Remove highlight: ==text== -> text
        (Regex::new(r"==([^=]+)==").unwrap(), "$1"),
        // Remove italic: *text* or _text_ -> text
        (Regex::new(r"\*([^*]+)\*").unwrap(), "$1"),
        (Regex::new(r"_([^_]+)_").unwrap(), "$1"),
        // Remove headers: # Header -> Header (up to 6 levels)
        (Regex::new(r"^#{1,6}\s+").unwrap(), ""),
        // Remove HTML tags
        (Regex::new(r"<[^>]+>").unwrap(), ""),
    ]
});

/// Compiled regex for whitespace normalization
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Characters that cannot appear in a note file name or inside a wiki link target
const FORBIDDEN_NAME_CHARS: &[char] = &[
    '\\', '/', ':', '*', '?', '"', '<', '>', '|', '#', '^', '[', ']',
];

/// Fallback stem when a heading sanitizes to nothing
const UNTITLED_STEM: &str = "Untitled";

/// Strip markdown formatting from content to produce plain text
///
/// # Examples
///
/// ```
/// use canvas_atomizer_core::utils::strip_markdown;
///
/// assert_eq!(strip_markdown("## **Bold** idea"), "Bold idea");
/// assert_eq!(strip_markdown("See [[Other Note|other]]"), "See other");
/// ```
pub fn strip_markdown(content: &str) -> String {
    let mut result = content.to_string();

    for (pattern, replacement) in MARKDOWN_PATTERNS.iter() {
        // For line-start patterns, process line by line
        if replacement.is_empty() && pattern.as_str().starts_with('^') {
            result = result
                .lines()
                .map(|line| pattern.replace_all(line, *replacement).to_string())
                .collect::<Vec<_>>()
                .join("\n");
        } else {
            result = pattern.replace_all(&result, *replacement).to_string();
        }
    }

    // Clean up multiple whitespace and trim
    result = WHITESPACE_RE.replace_all(&result, " ").to_string();
    result.trim().to_string()
}

/// File stem for a note created from a heading
///
/// Inline markdown is stripped, forbidden characters are dropped, whitespace is collapsed and
/// leading dots are removed so the note is never hidden.
pub fn note_file_stem(heading_text: &str) -> String {
    let plain = strip_markdown(heading_text);
    let cleaned: String = plain
        .chars()
        .filter(|c| !FORBIDDEN_NAME_CHARS.contains(c) && !c.is_control())
        .collect();
    let collapsed = WHITESPACE_RE.replace_all(&cleaned, " ");
    let stem = collapsed.trim().trim_start_matches('.').trim();

    if stem.is_empty() {
        UNTITLED_STEM.to_string()
    } else {
        stem.to_string()
    }
}

/// Wiki-style reference to a note, e.g. `[[My Note]]`
pub fn wiki_link(target: &str) -> String {
    format!("[[{}]]", target)
}
