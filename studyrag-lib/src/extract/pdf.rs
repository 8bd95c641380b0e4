use std::path::Path;

use lopdf::Document as PdfFile;

use crate::extract::Page;
use crate::{Error, Result};

/// Extract per-page text from a PDF file.
///
/// Page numbers are 1-based. Pages whose text cannot be extracted, or whose
/// text is empty after trimming, are dropped while their numbering is kept
/// for the remaining pages.
pub fn extract_pdf(path: &Path) -> Result<Vec<Page>> {
    let doc = PdfFile::load(path)
        .map_err(|e| Error::Extraction(format!("{}: {e}", path.display())))?;

    let mut pages = Vec::new();
    for (page_num, _) in doc.get_pages() {
        // A page that fails text extraction contributes nothing.
        let text = doc.extract_text(&[page_num]).unwrap_or_default();
        let text = text.trim();
        if !text.is_empty() {
            pages.push(Page {
                page_num,
                text: text.to_string(),
            });
        }
    }

    Ok(pages)
}
