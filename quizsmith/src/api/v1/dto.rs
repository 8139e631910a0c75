use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ingestion::ExtractionResult;
use crate::quiz::Difficulty;

/// Result of `POST /api/v1/quizzes:generate`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizResponse {
    /// Raw model output, typically a `Questions:` block followed by `Answers:`.
    pub mcqs: String,
    pub difficulty: Difficulty,
    /// One entry per accepted upload, in upload order.
    pub files: Vec<FileStatus>,
    pub generated_at: DateTime<Utc>,
}

/// How one uploaded file fared during ingestion.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FileStatus {
    /// Sanitized file name as stored for this request.
    pub path: String,
    /// `ok`, `encoding_error`, `read_error`, `unsupported`, `missing` or `error`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&ExtractionResult> for FileStatus {
    fn from(result: &ExtractionResult) -> Self {
        let path = result
            .source
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| result.source.display_path());

        Self {
            path,
            status: result.outcome.status().to_string(),
            message: result.outcome.message(),
        }
    }
}
