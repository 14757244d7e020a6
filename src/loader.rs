//! Document loading for binary and plain-text sources.
//!
//! Loaders are external collaborators to the core: anything that can
//! produce `{content, metadata}` documents can feed the splitter. The two
//! built-in loaders cover the common cases:
//!
//! - [`load_pdf`] — one [`Document`] per page, with `source`, `page`, and
//!   `total_pages` metadata, so chunk provenance survives retrieval.
//! - [`load_text_file`] — whole-file plain text with `source` metadata.

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Document, Metadata};

/// Load a PDF as one document per page.
///
/// Pages that extract to empty text are kept (with empty content) so page
/// numbers in metadata stay aligned with the source file; the splitter
/// produces zero chunks for them anyway.
pub fn load_pdf(path: &Path) -> Result<Vec<Document>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read PDF file: {}", path.display()))?;
    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
        .with_context(|| format!("Failed to extract text from PDF: {}", path.display()))?;

    let total_pages = pages.len();
    Ok(pages
        .into_iter()
        .enumerate()
        .map(|(page, content)| {
            let mut metadata = Metadata::new();
            metadata.insert("source".to_string(), path.display().to_string().into());
            metadata.insert("page".to_string(), page.into());
            metadata.insert("total_pages".to_string(), total_pages.into());
            Document::new(content, metadata)
        })
        .collect())
}

/// Load a plain-text file as a single document.
pub fn load_text_file(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read text file: {}", path.display()))?;
    let mut metadata = Metadata::new();
    metadata.insert("source".to_string(), path.display().to_string().into());
    Ok(Document::new(content, metadata))
}

/// Load a file by extension: `.pdf` goes through the PDF extractor,
/// everything else is treated as plain text.
pub fn load_path(path: &Path) -> Result<Vec<Document>> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        load_pdf(path)
    } else {
        Ok(vec![load_text_file(path)?])
    }
}
