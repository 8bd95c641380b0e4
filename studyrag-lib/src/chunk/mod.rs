//! Page chunking
//!
//! Splits extracted pages into overlapping fixed-size character windows so
//! each piece fits an embedding model's input while neighbouring windows
//! share enough text to keep sentences intact across a boundary.
//!
//! # Usage
//!
//! ```ignore
//! use studyrag_lib::chunk::PageChunker;
//!
//! let chunker = PageChunker::new(800, 200)?;
//! let chunks = chunker.chunk("notes.pdf", &doc.pages);
//! ```

use serde::{Deserialize, Serialize};

use crate::extract::{Document, Page};
use crate::{Error, Result};

/// Default window width in characters.
pub const DEFAULT_MAX_CHARS: usize = 800;

/// Default overlap between adjacent windows in characters.
pub const DEFAULT_OVERLAP: usize = 200;

/// A window of page text with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Chunk {
    /// Position in emission order, unique across one ingestion batch
    pub chunk_id: u64,
    /// 1-based page the text was taken from
    pub page_num: u32,
    /// Identifier of the source document
    pub source: String,
    /// The window of page text
    pub text: String,
}

/// Fixed-size sliding-window chunker.
///
/// Window arithmetic is in characters, not bytes, so a window never splits a
/// multi-byte character. Each page is chunked independently; the final window
/// of a page may be shorter than `max_chars`.
pub struct PageChunker {
    max_chars: usize,
    overlap: usize,
}

impl PageChunker {
    /// Create a chunker with the given window width and overlap.
    ///
    /// Fails when `overlap >= max_chars`: the window would then advance by
    /// zero or fewer characters and never terminate.
    pub fn new(max_chars: usize, overlap: usize) -> Result<Self> {
        if max_chars == 0 {
            return Err(Error::InvalidInput("max_chars must be positive".into()));
        }
        if overlap >= max_chars {
            return Err(Error::InvalidInput(format!(
                "overlap ({overlap}) must be smaller than max_chars ({max_chars})"
            )));
        }
        Ok(Self { max_chars, overlap })
    }

    /// Chunk one document's pages, with `chunk_id` starting at 0.
    pub fn chunk(&self, source: &str, pages: &[Page]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut next_id = 0;
        for page in pages {
            self.chunk_page_into(source, page, &mut next_id, &mut chunks);
        }
        chunks
    }

    /// Chunk a batch of documents into one flat list.
    ///
    /// Chunks keep document order and carry their document's name as
    /// `source`; `chunk_id` runs continuously across the whole batch.
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut next_id = 0;
        for doc in documents {
            for page in &doc.pages {
                self.chunk_page_into(&doc.name, page, &mut next_id, &mut chunks);
            }
        }
        chunks
    }

    fn chunk_page_into(
        &self,
        source: &str,
        page: &Page,
        next_id: &mut u64,
        out: &mut Vec<Chunk>,
    ) {
        if page.text.chars().all(char::is_whitespace) {
            return;
        }

        // Byte offset of every char boundary, including the end of the text.
        let bounds: Vec<usize> = page
            .text
            .char_indices()
            .map(|(i, _)| i)
            .chain([page.text.len()])
            .collect();
        let n_chars = bounds.len() - 1;

        let stride = self.max_chars - self.overlap;
        let mut start = 0;
        while start < n_chars {
            let end = usize::min(start + self.max_chars, n_chars);
            out.push(Chunk {
                chunk_id: *next_id,
                page_num: page.page_num,
                source: source.to_string(),
                text: page.text[bounds[start]..bounds[end]].to_string(),
            });
            *next_id += 1;
            start += stride;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page_num: u32, text: &str) -> Page {
        Page {
            page_num,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_rejects_degenerate_parameters() {
        assert!(PageChunker::new(0, 0).is_err());
        assert!(PageChunker::new(100, 100).is_err());
        assert!(PageChunker::new(100, 150).is_err());
        assert!(PageChunker::new(100, 99).is_ok());
    }

    #[test]
    fn test_basic_chunking() {
        let chunker = PageChunker::new(10, 0).unwrap();
        let chunks = chunker.chunk("doc", &[page(1, "0123456789abcdefghij")]);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "0123456789");
        assert_eq!(chunks[1].text, "abcdefghij");
    }

    #[test]
    fn test_overlap_windows() {
        let chunker = PageChunker::new(10, 5).unwrap();
        let chunks = chunker.chunk("doc", &[page(1, "0123456789abcdefghij")]);

        // stride=5, so window starts: 0, 5, 10, 15
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].text, "0123456789");
        assert_eq!(chunks[1].text, "56789abcde");
        assert_eq!(chunks[2].text, "abcdefghij");
        assert_eq!(chunks[3].text, "fghij");
    }

    #[test]
    fn test_default_parameters_on_long_page() {
        let text: String = "abcdefghij".repeat(200); // 2000 chars
        let chunker = PageChunker::new(DEFAULT_MAX_CHARS, DEFAULT_OVERLAP).unwrap();
        let chunks = chunker.chunk("doc", &[page(1, &text)]);

        // window starts: 0, 600, 1200, 1800
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].text.len(), 800);
        assert_eq!(chunks[1].text.len(), 800);
        assert_eq!(chunks[2].text.len(), 800);
        assert_eq!(chunks[3].text.len(), 200);
        assert_eq!(chunks[3].text, text[1800..]);
    }

    #[test]
    fn test_windows_cover_whole_page() {
        let text: String = ('a'..='z').cycle().take(1234).collect();
        let chunker = PageChunker::new(100, 30).unwrap();
        let chunks = chunker.chunk("doc", &[page(1, &text)]);

        // Rebuild the page by skipping each window's overlap with its
        // predecessor; the result must be the original text.
        let mut rebuilt: String = chunks[0].text.clone();
        for c in &chunks[1..] {
            rebuilt.extend(c.text.chars().skip(30));
        }
        assert_eq!(rebuilt, text);

        for c in &chunks {
            assert!(c.text.chars().count() <= 100);
        }
    }

    #[test]
    fn test_short_page_single_chunk() {
        let chunker = PageChunker::new(800, 200).unwrap();
        let chunks = chunker.chunk("doc", &[page(1, "a short page")]);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "a short page");
    }

    #[test]
    fn test_whitespace_page_skipped() {
        let chunker = PageChunker::new(800, 200).unwrap();
        let chunks = chunker.chunk("doc", &[page(1, "  \n\t "), page(2, "real text")]);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].page_num, 2);
    }

    #[test]
    fn test_unicode_boundaries() {
        // 4-byte emoji mixed into the window; slicing must stay on char
        // boundaries and the window width must count characters.
        let text = "ab👋cd👋ef👋gh";
        let chunker = PageChunker::new(5, 2).unwrap();
        let chunks = chunker.chunk("doc", &[page(1, text)]);

        assert!(!chunks.is_empty());
        assert_eq!(chunks[0].text, "ab👋cd");
        for c in &chunks {
            assert!(c.text.chars().count() <= 5);
        }
    }

    #[test]
    fn test_ids_increment_across_pages() {
        let chunker = PageChunker::new(10, 0).unwrap();
        let chunks = chunker.chunk(
            "doc",
            &[page(1, "0123456789abcdefghij"), page(2, "0123456789")],
        );

        assert_eq!(chunks.len(), 3);
        let ids: Vec<u64> = chunks.iter().map(|c| c.chunk_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(chunks[2].page_num, 2);
    }

    #[test]
    fn test_ids_increment_across_documents() {
        let chunker = PageChunker::new(10, 0).unwrap();
        let docs = vec![
            Document {
                name: "a.txt".to_string(),
                pages: vec![page(1, "0123456789abcdefghij")],
            },
            Document {
                name: "b.txt".to_string(),
                pages: vec![page(1, "0123456789")],
            },
        ];
        let chunks = chunker.chunk_documents(&docs);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].source, "a.txt");
        assert_eq!(chunks[2].source, "b.txt");
        assert_eq!(chunks[2].chunk_id, 2);
    }

    #[test]
    fn test_empty_pages() {
        let chunker = PageChunker::new(10, 0).unwrap();
        assert!(chunker.chunk("doc", &[]).is_empty());
        assert!(chunker.chunk("doc", &[page(1, "")]).is_empty());
    }
}
