//! PDF text extraction.
//!
//! `pdf-extract` gives the best text layout but fails (or panics) on a whole
//! document when a single page has a broken font or content stream. `lopdf`
//! is used to establish the page list, and as the per-page fallback so one bad
//! page degrades to an empty segment instead of losing the resume.
//!
//! A panic inside `pdf-extract` is caught and logged through `tracing`, but the
//! process-wide panic hook still prints its own line to stderr first.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, warn};

use super::ExtractionError;

/// Text of a PDF plus the number of pages it was assembled from.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfText {
    pub text: String,
    pub page_count: usize,
}

pub fn extract_pdf_text(bytes: &[u8]) -> Result<PdfText, ExtractionError> {
    let document =
        Document::load_mem(bytes).map_err(|e| ExtractionError::InvalidPdf(e.to_string()))?;
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();

    let pages = match extract_with_layout(bytes) {
        Some(pages) if pages.len() == page_numbers.len() => pages,
        Some(pages) => {
            warn!(
                "pdf-extract returned {} pages, document has {}; falling back to per-page extraction",
                pages.len(),
                page_numbers.len()
            );
            extract_per_page(&document, &page_numbers)
        }
        None => extract_per_page(&document, &page_numbers),
    };

    Ok(PdfText {
        page_count: pages.len(),
        text: join_pages(&pages),
    })
}

/// Whole-document extraction; `None` on any failure, including panics inside
/// the font decoder.
fn extract_with_layout(bytes: &[u8]) -> Option<Vec<String>> {
    match panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    })) {
        Ok(Ok(pages)) => Some(pages),
        Ok(Err(e)) => {
            debug!("pdf-extract failed: {e}");
            None
        }
        Err(payload) => {
            warn!(
                "pdf-extract panicked while decoding the document: {}",
                panic_message(&*payload)
            );
            None
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}

fn extract_per_page(document: &Document, page_numbers: &[u32]) -> Vec<String> {
    page_numbers
        .iter()
        .map(|&page| {
            document.extract_text(&[page]).unwrap_or_else(|e| {
                warn!("Could not extract text from page {page}: {e}");
                String::new()
            })
        })
        .collect()
}

/// Joins page texts in document order, one newline between pages.
pub fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}
