//! Context assembly
//!
//! Packs ranked chunks into a single bounded text blob for prompting. The
//! packing is greedy and order-preserving: chunks are taken from the front
//! until the first one that would blow the budget, and nothing after that is
//! considered. Prompts stay reproducible because the same ranked input
//! always yields the same context.

use crate::chunk::Chunk;

/// Render one chunk as a tagged context line.
///
/// Embedded newlines are flattened to spaces so a chunk occupies a single
/// line of the prompt.
pub fn tag_line(chunk: &Chunk) -> String {
    format!(
        "[{} - p.{}] {}",
        chunk.source,
        chunk.page_num,
        chunk.text.replace('\n', " ")
    )
}

/// Assemble chunks into one context string within a character budget.
///
/// Chunks are taken in the given order; the first tagged line that would
/// push the running total past `max_chars` stops the scan, even if a later
/// shorter line could still have fit. The budget counts the characters of
/// the tagged lines; the blank-line separators joining them are not
/// counted. Returns an empty string when no line fits.
pub fn assemble<'a, I>(chunks: I, max_chars: usize) -> String
where
    I: IntoIterator<Item = &'a Chunk>,
{
    let mut parts = Vec::new();
    let mut total = 0;

    for chunk in chunks {
        let line = tag_line(chunk);
        let len = line.chars().count();
        if total + len > max_chars {
            break;
        }
        total += len;
        parts.push(line);
    }

    parts.join("\n\n")
}
