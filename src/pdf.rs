//! PDF text extraction
//!
//! Extracts the full text of an uploaded PDF held in memory. Whitespace is
//! normalized downstream by the chunker, so pages are joined with plain
//! newlines.

use crate::errors::AppError;
use tracing::{debug, warn};

/// Extract text content from PDF bytes.
///
/// Pages that fail to decode are skipped with a warning; a document with
/// no extractable text at all is an extraction error, which is fatal to
/// the request (the question pipeline never runs).
pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| AppError::ExtractionError(format!("failed to load PDF: {e}")))?;

    let pages = doc.get_pages();
    debug!(page_count = pages.len(), "Extracting text from PDF");

    let mut text = String::new();
    for (&page_number, _) in pages.iter() {
        match doc.extract_text(&[page_number]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => {
                warn!(page = page_number, error = %e, "Failed to extract text from page, skipping");
            }
        }
    }

    if text.trim().is_empty() {
        return Err(AppError::ExtractionError(
            "no text content extracted from PDF".to_string(),
        ));
    }

    debug!(text_len = text.len(), "Text extraction complete");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_an_extraction_error() {
        let result = extract_text(b"this is not a pdf");
        assert!(matches!(result, Err(AppError::ExtractionError(_))));
    }

    #[test]
    fn empty_input_is_an_extraction_error() {
        assert!(matches!(extract_text(b""), Err(AppError::ExtractionError(_))));
    }
}
