//! Source document extraction
//!
//! Turns files on disk into per-page text ready for chunking. Extraction is
//! deliberately tolerant: pages with no extractable text are dropped here so
//! the rest of the pipeline only ever sees non-empty pages.
//!
//! # Usage
//!
//! ```ignore
//! use studyrag_lib::extract::load_document;
//!
//! let doc = load_document("lecture-notes.pdf".as_ref())?;
//! for page in &doc.pages {
//!     println!("p.{}: {} chars", page.page_num, page.text.len());
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single page of extracted text.
///
/// `page_num` is 1-based and reflects the page's position in the source
/// document, even when earlier pages were dropped as empty.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Page {
    /// 1-based page number in the source document
    pub page_num: u32,
    /// Extracted text, trimmed, never empty
    pub text: String,
}

/// A source document: an identifier plus its extracted pages.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Document {
    /// Document identifier, tagged onto every chunk as its source
    pub name: String,
    /// Non-empty pages in document order
    pub pages: Vec<Page>,
}

mod pdf;
mod text;

pub use pdf::*;
pub use text::*;

/// Load a file into a [`Document`], picking the extractor by extension.
///
/// `.pdf` files go through per-page PDF extraction; everything else is read
/// as plain text. The document name is the file name.
pub fn load_document(path: &Path) -> Result<Document> {
    let name = path
        .file_name()
        .ok_or_else(|| Error::Extraction(format!("not a file: {}", path.display())))?
        .to_string_lossy()
        .into_owned();

    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let pages = if is_pdf {
        extract_pdf(path)?
    } else {
        extract_text_file(path)?
    };

    Ok(Document { name, pages })
}
