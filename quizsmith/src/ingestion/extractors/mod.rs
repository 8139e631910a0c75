use thiserror::Error;

pub mod docx;
pub mod pdf;
pub mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::TextExtractor;

/// Failure while turning one file's bytes into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Encoding issue - {0}")]
    Encoding(String),

    #[error("{0}")]
    Docx(String),

    #[error("{0}")]
    Pdf(String),
}
