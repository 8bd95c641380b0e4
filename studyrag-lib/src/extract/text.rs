use std::fs;
use std::path::Path;

use crate::extract::Page;
use crate::{Error, Result};

/// Extract pages from a plain-text file.
///
/// Form feed characters split the file into pages; most files have none and
/// become a single page 1.
pub fn extract_text_file(path: &Path) -> Result<Vec<Page>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::Extraction(format!("{}: {e}", path.display())))?;
    Ok(pages_from_str(&raw))
}

fn pages_from_str(raw: &str) -> Vec<Page> {
    raw.split('\u{0c}')
        .enumerate()
        .filter_map(|(i, text)| {
            let text = text.trim();
            (!text.is_empty()).then(|| Page {
                page_num: (i + 1) as u32,
                text: text.to_string(),
            })
        })
        .collect()
}
