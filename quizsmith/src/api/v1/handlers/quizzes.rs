use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use chrono::Utc;

use crate::api::state::AppState;
use crate::api::uploads::{allowed_file, UploadBatch};
use crate::api::v1::dto::{FileStatus, GenerateQuizResponse};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::error::{QuizError, Result};
use crate::quiz::{Difficulty, GenerationParameters};

/// Form fields other than the files themselves.
#[derive(Debug, Default)]
struct QuizForm {
    num_quest: Option<String>,
    num_ops: Option<String>,
    difficulty: Option<String>,
}

/// The body limit surfaces as a multipart error; report it as an oversize
/// upload rather than a malformed form.
fn multipart_error(context: &str, error: MultipartError, body_limit: usize) -> QuizError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        QuizError::Upload(format!(
            "Request body too large: uploads may total at most {body_limit} bytes"
        ))
    } else {
        QuizError::Upload(format!("{context}: {}", error.body_text()))
    }
}

fn parse_count(field: &str, value: Option<&str>, default: u32) -> Result<u32> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            QuizError::Validation(format!("{field} must be a positive integer, got {raw:?}"))
        }),
    }
}

/// `POST /api/v1/quizzes:generate`
///
/// Multipart form with repeated `files` fields plus optional `num_quest`,
/// `num_ops` and `difficulty` (`easy`, `medium`, `hard`). Files with other
/// extensions are dropped before ingestion. Files that fail to read are
/// reported in `files` and inlined into the model input as error notes.
#[utoipa::path(
    post,
    path = "/api/v1/quizzes:generate",
    tag = "quizzes",
    operation_id = "quizzes.generate",
    request_body(content_type = "multipart/form-data", content = String, description = "Repeated `files` fields plus optional num_quest, num_ops and difficulty"),
    responses(
        (status = 200, description = "Quiz generated", body = GenerateQuizResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 500, description = "Model call failed", body = ApiError),
        (status = 501, description = "No language model configured", body = ApiError),
    )
)]
pub async fn generate_quiz(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResponse<GenerateQuizResponse> {
    let mut batch = match state.uploads.begin_request().await {
        Ok(batch) => batch,
        Err(e) => return e.into(),
    };

    let result = run(&state, &mut batch, multipart).await;
    batch.finish().await;

    match result {
        Ok(response) => ApiResponse::success(response),
        Err(e) => {
            tracing::warn!(error = %e, "Quiz generation request failed");
            e.into()
        }
    }
}

async fn run(
    state: &AppState,
    batch: &mut UploadBatch,
    mut multipart: Multipart,
) -> Result<GenerateQuizResponse> {
    let mut form = QuizForm::default();
    let body_limit = state.uploads.request_body_limit();

    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error("Malformed multipart body", e, body_limit))?;
        let Some(field) = field else { break };
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "files" => {
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                if !allowed_file(&file_name) {
                    tracing::info!(file = %file_name, "Dropping upload with disallowed extension");
                    continue;
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read file", e, body_limit))?;
                batch.save(&file_name, &bytes).await?;
            }
            "num_quest" | "num_ops" | "difficulty" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&format!("Failed to read {name}"), e, body_limit))?;
                match name.as_str() {
                    "num_quest" => form.num_quest = Some(value),
                    "num_ops" => form.num_ops = Some(value),
                    _ => form.difficulty = Some(value),
                }
            }
            _ => {}
        }
    }

    let defaults = &state.config.quiz;
    let params = GenerationParameters::new(
        parse_count("num_quest", form.num_quest.as_deref(), defaults.question_count)?,
        parse_count("num_ops", form.num_ops.as_deref(), defaults.options_per_question)?,
        form.difficulty
            .as_deref()
            .map(Difficulty::from_label)
            .unwrap_or_default(),
    )?;

    if batch.files().is_empty() {
        return Err(QuizError::Validation(
            "No .txt, .docx or .pdf files were uploaded".to_string(),
        ));
    }

    let files = batch.files().to_vec();
    let ingestor = state.ingestor;
    let report = tokio::task::spawn_blocking(move || ingestor.ingest(&files))
        .await
        .map_err(|e| QuizError::Internal(format!("Ingestion task failed: {e}")))?;

    let quiz = state
        .pipeline
        .generate_quiz(&report.render(), &params)
        .await?;

    Ok(GenerateQuizResponse {
        mcqs: quiz.into_string(),
        difficulty: params.difficulty(),
        files: report.results.iter().map(FileStatus::from).collect(),
        generated_at: Utc::now(),
    })
}
