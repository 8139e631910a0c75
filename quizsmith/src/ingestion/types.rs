use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Formats the ingestor knows how to read, keyed by lowercased extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Txt,
    Docx,
    Pdf,
}

impl FileFormat {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 3] = ["txt", "docx", "pdf"];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(FileFormat::Txt),
            "docx" => Some(FileFormat::Docx),
            "pdf" => Some(FileFormat::Pdf),
            _ => None,
        }
    }

    /// Only the extension decides; file contents are never sniffed.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Txt => "txt",
            FileFormat::Docx => "docx",
            FileFormat::Pdf => "pdf",
        }
    }
}

/// One input file. The ingestor never checks existence up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    path: PathBuf,
}

impl FileReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_path(&self.path)
    }

    /// Path as it appears in section headers.
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

impl From<PathBuf> for FileReference {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for FileReference {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Content(String),
    Encoding(String),
    ReadError(String),
    Unsupported,
    Missing,
    Failed(String),
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Content(_))
    }

    /// Stable machine-readable status.
    pub fn status(&self) -> &'static str {
        match self {
            ExtractionOutcome::Content(_) => "ok",
            ExtractionOutcome::Encoding(_) => "encoding_error",
            ExtractionOutcome::ReadError(_) => "read_error",
            ExtractionOutcome::Unsupported => "unsupported",
            ExtractionOutcome::Missing => "missing",
            ExtractionOutcome::Failed(_) => "error",
        }
    }

    /// Human-readable detail for anything other than success.
    pub fn message(&self) -> Option<String> {
        match self {
            ExtractionOutcome::Content(_) => None,
            ExtractionOutcome::Encoding(detail) => Some(format!("Encoding issue - {detail}")),
            ExtractionOutcome::ReadError(detail) | ExtractionOutcome::Failed(detail) => {
                Some(detail.clone())
            }
            ExtractionOutcome::Unsupported => Some(format!(
                "Unsupported file type. Only .{} are supported.",
                FileFormat::SUPPORTED_EXTENSIONS.join(", .")
            )),
            ExtractionOutcome::Missing => Some("The file does not exist.".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub source: FileReference,
    pub outcome: ExtractionOutcome,
}

impl ExtractionResult {
    pub fn new(source: FileReference, outcome: ExtractionOutcome) -> Self {
        Self { source, outcome }
    }

    /// Append this file's section, delimiter lines included.
    pub fn render_into(&self, out: &mut String) {
        let path = self.source.display_path();
        // writing into a String cannot fail
        let _ = match &self.outcome {
            ExtractionOutcome::Content(text) => {
                write!(out, "\n--- Content from {path} ---\n{text}\n")
            }
            ExtractionOutcome::Encoding(detail) => {
                write!(out, "\n--- Error reading {path}: Encoding issue - {detail}\n")
            }
            ExtractionOutcome::ReadError(detail) => {
                write!(out, "\n--- Error reading {path}: {detail}\n")
            }
            ExtractionOutcome::Unsupported => write!(
                out,
                "\n--- File '{path}' has an unsupported file type. Only .txt, .docx, and .pdf are supported.\n"
            ),
            ExtractionOutcome::Missing => {
                write!(out, "\n--- Error: The file '{path}' does not exist.\n")
            }
            ExtractionOutcome::Failed(detail) => {
                write!(out, "\n--- An error occurred with file '{path}': {detail}\n")
            }
        };
    }
}

/// Per-file results in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub results: Vec<ExtractionResult>,
}

impl IngestReport {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.len() - self.success_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ExtractionResult> {
        self.results.iter().filter(|r| !r.outcome.is_success())
    }

    /// Concatenate every section in order. Failures are rendered inline, so
    /// the result is only empty when there were no inputs at all.
    pub fn render(&self) -> AggregatedText {
        let mut out = String::new();
        for result in &self.results {
            result.render_into(&mut out);
        }
        AggregatedText(out)
    }
}

/// The text handed to the fact-extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedText(String);

impl AggregatedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for AggregatedText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for AggregatedText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for AggregatedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
