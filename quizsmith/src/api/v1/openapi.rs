use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quizsmith API",
        version = "1.0.0",
        description = "Upload txt, docx or pdf files and get back a multiple-choice quiz.",
    ),
    paths(
        handlers::health::health_check,
        handlers::quizzes::generate_quiz,
    ),
    components(schemas(
        response::ErrorCode,
        response::ApiError,
        crate::quiz::Difficulty,
        dto::GenerateQuizResponse,
        dto::FileStatus,
        handlers::health::HealthData,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "quizzes", description = "Quiz generation from uploaded documents"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
