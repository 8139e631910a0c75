use std::any::Any;
use std::panic;

use super::ExtractionError;

pub struct PdfExtractor;

impl PdfExtractor {
    /// Concatenate the text layer of every page, in page order.
    ///
    /// Pages without a text layer contribute an empty string. pdf-extract
    /// panics on some malformed documents; that is reported as an error for
    /// this file only.
    pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
        let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
            .map_err(|payload| {
                ExtractionError::Pdf(format!(
                    "PDF extraction panicked: {}",
                    panic_message(payload.as_ref())
                ))
            })?
            .map_err(|e| ExtractionError::Pdf(format!("PDF extraction failed: {e}")))?;

        tracing::debug!(pages = pages.len(), "Extracted PDF text layer");
        Ok(pages.concat())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
