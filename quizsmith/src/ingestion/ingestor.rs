use std::fs;
use std::io;
use std::time::Instant;

use super::extractors::{DocxExtractor, ExtractionError, PdfExtractor, TextExtractor};
use super::types::{ExtractionOutcome, ExtractionResult, FileFormat, FileReference, IngestReport};

/// Reads a batch of files into one report.
///
/// A failure on one file never stops the batch: every input gets exactly one
/// result, in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ingestor;

impl Ingestor {
    pub fn new() -> Self {
        Self
    }

    pub fn ingest(&self, files: &[FileReference]) -> IngestReport {
        tracing::info!(
            files = ?files.iter().map(FileReference::display_path).collect::<Vec<_>>(),
            "Ingesting files"
        );
        let started = Instant::now();
        let results: Vec<ExtractionResult> = files
            .iter()
            .map(|file| ExtractionResult::new(file.clone(), self.extract_one(file)))
            .collect();

        let report = IngestReport { results };
        tracing::info!(
            files = files.len(),
            succeeded = report.success_count(),
            failed = report.failure_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Ingestion finished"
        );
        report
    }

    /// Unsupported extensions are decided before the file is touched, so a
    /// missing `.csv` reports as unsupported, not missing.
    fn extract_one(&self, file: &FileReference) -> ExtractionOutcome {
        let path = file.display_path();

        let Some(format) = file.format() else {
            tracing::warn!(path = %path, "Skipping unsupported file type");
            return ExtractionOutcome::Unsupported;
        };

        let bytes = match fs::read(file.path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path, "Input file does not exist");
                return ExtractionOutcome::Missing;
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to open input file");
                return ExtractionOutcome::Failed(e.to_string());
            }
        };

        let extracted = match format {
            FileFormat::Txt => TextExtractor::extract(&bytes),
            FileFormat::Docx => DocxExtractor::extract(&bytes),
            FileFormat::Pdf => PdfExtractor::extract(&bytes),
        };

        match extracted {
            Ok(text) => {
                tracing::debug!(path = %path, format = format.extension(), chars = text.len(), "Extracted text");
                ExtractionOutcome::Content(text)
            }
            Err(ExtractionError::Encoding(detail)) => {
                tracing::warn!(path = %path, detail = %detail, "Text file is not valid UTF-8");
                ExtractionOutcome::Encoding(detail)
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to extract text");
                ExtractionOutcome::ReadError(e.to_string())
            }
        }
    }
}
