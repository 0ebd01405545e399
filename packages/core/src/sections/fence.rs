//! Code fence detection

/// Minimum run of backticks or tildes that opens a fence
const MIN_FENCE_LENGTH: usize = 3;

/// Most leading spaces a fence line may carry; four or more make it indented text
const MAX_FENCE_INDENT: usize = 3;

/// Set of line indices lying inside a fenced code block.
///
/// The opening and closing fence lines are part of the mask. A fence that is never closed
/// masks every remaining line of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceMask {
    masked: Vec<bool>,
}

/// An open fence: the fence character and the length of its opening run
#[derive(Debug, Clone, Copy)]
struct OpenFence {
    marker: char,
    length: usize,
}

impl FenceMask {
    /// Compute the mask for a document already split into lines
    pub fn compute(lines: &[&str]) -> Self {
        let mut masked = vec![false; lines.len()];
        let mut open: Option<OpenFence> = None;

        for (index, line) in lines.iter().enumerate() {
            match open {
                Some(fence) => {
                    masked[index] = true;
                    if closes_fence(line, fence) {
                        open = None;
                    }
                }
                None => {
                    if let Some(fence) = opening_fence(line) {
                        masked[index] = true;
                        open = Some(fence);
                    }
                }
            }
        }

        Self { masked }
    }

    /// Whether the line at `index` is inside a fence (out-of-range lines are not)
    pub fn is_masked(&self, index: usize) -> bool {
        self.masked.get(index).copied().unwrap_or(false)
    }

    /// Number of masked lines
    pub fn masked_count(&self) -> usize {
        self.masked.iter().filter(|m| **m).count()
    }
}

/// Length of the leading run of `marker` in `text`
fn run_length(text: &str, marker: char) -> usize {
    text.chars().take_while(|c| *c == marker).count()
}

/// Line without its indentation, or `None` when it is indented too far to be a fence
fn strip_fence_indent(line: &str) -> Option<&str> {
    let indent = line.chars().take_while(|c| *c == ' ').count();
    let rest = &line[indent..];
    (indent <= MAX_FENCE_INDENT && !rest.starts_with('\t')).then_some(rest)
}

fn opening_fence(line: &str) -> Option<OpenFence> {
    let trimmed = strip_fence_indent(line)?;
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let length = run_length(trimmed, marker);

    (length >= MIN_FENCE_LENGTH).then_some(OpenFence { marker, length })
}

fn closes_fence(line: &str, fence: OpenFence) -> bool {
    let Some(trimmed) = strip_fence_indent(line) else {
        return false;
    };
    let length = run_length(trimmed, fence.marker);
    if length < fence.length {
        return false;
    }

    // Fence characters are single-byte ASCII, so the run length is also a byte offset
    trimmed[length..].trim().is_empty()
}
