//! Section Extraction
//!
//! Line-based heading structure for markdown documents. This is deliberately not a markdown
//! parser: a heading is any line of 1-6 `#` characters, a single space and non-empty text,
//! unless that line sits inside a fenced code block.
//!
//! # Coordinates
//!
//! Text is addressed by zero-based line index after splitting on `\n`, and every range is
//! half-open `[start, end)`. A section is the body owned by one heading: the lines strictly
//! after it up to the next structural heading of the same or a lower level.
//!
//! # Cost
//!
//! Each public call makes two linear passes: one to build the [`FenceMask`] and one to scan
//! for the section boundary. Tree extraction reuses the same mask for every level of recursion.

mod extractor;
mod fence;
mod tree;

pub use extractor::{
    extract_content, extract_content_with_heading, get_section_range, headings, parse_heading,
    Heading, SectionRange, SectionScanner,
};
pub use fence::FenceMask;
pub use tree::{extract_section_tree, ExtractedSection, MAX_HEADING_LEVEL};
