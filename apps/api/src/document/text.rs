//! Page text extraction via `pdf-extract`.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::document::{DocumentError, TextExtractor};

/// What to do with a page that yields no text (scanned pages, image-only pages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageTextPolicy {
    /// Abort the whole document.
    #[default]
    Strict,
    /// Keep an empty page and continue.
    Lenient,
}

/// Pure-Rust PDF text extractor.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn page_texts(&self, path: &Path) -> Result<Vec<String>, DocumentError> {
        let owned = path.to_path_buf();

        let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_by_pages(&owned))
            .await
            // pdf-extract panics on some malformed files; treat that as unreadable
            .map_err(|e| DocumentError::Read {
                path: path.to_path_buf(),
                detail: format!("parser aborted: {e}"),
            })?
            .map_err(|e| DocumentError::Read {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;

        debug!("Extracted text from {} page(s) of {}", pages.len(), path.display());
        Ok(pages)
    }
}

/// Joins page texts in order, each page followed by a newline.
pub fn concat_pages(pages: &[String], policy: PageTextPolicy) -> Result<String, DocumentError> {
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());

    for (idx, page) in pages.iter().enumerate() {
        if page.trim().is_empty() {
            match policy {
                PageTextPolicy::Strict => return Err(DocumentError::EmptyPage { page: idx + 1 }),
                PageTextPolicy::Lenient => warn!("Page {} has no extractable text", idx + 1),
            }
        }
        text.push_str(page);
        text.push('\n');
    }

    Ok(text)
}
