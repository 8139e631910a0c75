mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use quizsmith::api::{create_router, AppState};
use quizsmith::config::{Config, UploadConfig};
use quizsmith::llm::LlmProvider;

use common::{docx_bytes, sample_quiz, ScriptedGenerator};

const BOUNDARY: &str = "quizsmith-test-boundary";

/// Large enough for the DOCX fixtures, which carry a full package of parts.
const TEST_MAX_FILE_SIZE: usize = 64 * 1024;

enum Part<'a> {
    File(&'a str, &'a [u8]),
    Text(&'a str, &'a str),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File(name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn generate_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn test_config(upload_dir: &TempDir, max_file_size: usize) -> Config {
    Config {
        upload: UploadConfig {
            dir: upload_dir.path().to_path_buf(),
            max_file_size,
            retain: false,
        },
        ..Config::default()
    }
}

fn app_with_limit(
    upload_dir: &TempDir,
    generator: Arc<ScriptedGenerator>,
    max_file_size: usize,
) -> Router {
    let state = AppState::with_generator(
        test_config(upload_dir, max_file_size),
        LlmProvider::unavailable("not used in tests"),
        generator,
    );
    create_router(state)
}

fn app(upload_dir: &TempDir, generator: Arc<ScriptedGenerator>) -> Router {
    app_with_limit(upload_dir, generator, TEST_MAX_FILE_SIZE)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn upload_dir_is_empty(dir: &TempDir) -> bool {
    std::fs::read_dir(dir.path()).unwrap().next().is_none()
}

#[tokio::test]
async fn health_reports_llm_status() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir, ScriptedGenerator::new(vec![]))
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["llm"]["status"], "unavailable");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn openapi_json_is_valid() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir, ScriptedGenerator::new(vec![]))
        .oneshot(
            Request::builder()
                .uri("/api/v1/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let version = json["openapi"]
        .as_str()
        .expect("openapi field should be a string");
    assert!(version.starts_with('3'), "unexpected OpenAPI version {version}");
    assert!(json["paths"]["/api/v1/quizzes:generate"].is_object());
}

#[tokio::test]
async fn index_page_is_served() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir, ScriptedGenerator::new(vec![]))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn generate_returns_quiz_and_file_statuses() {
    let dir = TempDir::new().unwrap();
    let generator = ScriptedGenerator::quiz("Paris is the capital of France.");
    let docx = docx_bytes(&["The Seine flows through Paris."]);

    let response = app(&dir, generator.clone())
        .oneshot(generate_request(
            "/api/v1/quizzes:generate",
            &[
                Part::File("france notes.txt", b"Paris is the capital of France."),
                Part::File("river.docx", &docx),
                Part::File("ignored.csv", b"a,b"),
                Part::Text("num_quest", "3"),
                Part::Text("num_ops", "4"),
                Part::Text("difficulty", "medium"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["mcqs"], sample_quiz());
    assert_eq!(data["difficulty"], "Medium");
    assert!(data["generatedAt"].is_string());

    let files = data["files"].as_array().unwrap();
    assert_eq!(files.len(), 2, "disallowed extensions are dropped before ingestion");
    assert_eq!(files[0]["path"], "france_notes.txt");
    assert_eq!(files[0]["status"], "ok");
    assert_eq!(files[1]["path"], "river.docx");
    assert_eq!(files[1]["status"], "ok");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("Paris is the capital of France."));
    assert!(prompts[0].contains("The Seine flows through Paris."));
    assert!(!prompts[0].contains("ignored.csv"));
    assert!(prompts[1].contains("create 3 multiple choice questions"));
    assert!(prompts[1].contains("give 4 options per question"));
    assert!(prompts[1].contains("Medium level"));

    assert!(upload_dir_is_empty(&dir), "request directory should be removed");
}

#[tokio::test]
async fn docx_upload_within_limit_is_ingested() {
    let dir = TempDir::new().unwrap();
    let generator = ScriptedGenerator::quiz("summary");
    let docx = docx_bytes(&["Mitochondria produce ATP.", "Ribosomes build proteins."]);
    assert!(docx.len() > 8 * 1024, "fixture should exceed the old 8 KiB body limit");
    assert!(docx.len() < TEST_MAX_FILE_SIZE);

    let response = app(&dir, generator.clone())
        .oneshot(generate_request(
            "/api/v1/quizzes:generate",
            &[Part::File("cells.docx", &docx)],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["files"][0]["path"], "cells.docx");
    assert_eq!(json["data"]["files"][0]["status"], "ok");

    let prompts = generator.prompts();
    assert!(prompts[0].contains("Mitochondria produce ATP.\nRibosomes build proteins."));
}

#[tokio::test]
async fn legacy_route_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let generator = ScriptedGenerator::quiz("summary");

    let response = app(&dir, generator.clone())
        .oneshot(generate_request(
            "/generate_mcqs",
            &[Part::File("a.txt", b"Some facts.")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["difficulty"], "Easy");

    let prompts = generator.prompts();
    assert!(prompts[1].contains("create 6 multiple choice questions"));
    assert!(prompts[1].contains("give 4 options per question"));
}

#[tokio::test]
async fn unreadable_file_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let generator = ScriptedGenerator::quiz("summary");

    let response = app(&dir, generator.clone())
        .oneshot(generate_request(
            "/api/v1/quizzes:generate",
            &[
                Part::File("latin1.txt", &[0x63, 0x61, 0x66, 0xE9]),
                Part::File("fine.txt", b"Readable."),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let files = json["data"]["files"].as_array().unwrap();
    assert_eq!(files[0]["status"], "encoding_error");
    assert!(files[0]["message"]
        .as_str()
        .unwrap()
        .starts_with("Encoding issue - "));
    assert_eq!(files[1]["status"], "ok");
    assert!(files[1].get("message").is_none());

    assert!(generator.prompts()[0].contains("Encoding issue - "));
}

#[tokio::test]
async fn invalid_counts_are_rejected() {
    for (field, value) in [("num_quest", "three"), ("num_quest", "0"), ("num_ops", "-2")] {
        let dir = TempDir::new().unwrap();
        let generator = ScriptedGenerator::quiz("summary");

        let response = app(&dir, generator.clone())
            .oneshot(generate_request(
                "/api/v1/quizzes:generate",
                &[Part::File("a.txt", b"text"), Part::Text(field, value)],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{field}={value}");
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_request");
        assert!(json.get("data").is_none());
        assert!(generator.prompts().is_empty(), "model must not be called");
        assert!(upload_dir_is_empty(&dir));
    }
}

#[tokio::test]
async fn no_supported_files_is_rejected() {
    let dir = TempDir::new().unwrap();
    let generator = ScriptedGenerator::quiz("summary");

    let response = app(&dir, generator.clone())
        .oneshot(generate_request(
            "/api/v1/quizzes:generate",
            &[Part::File("sheet.xlsx", b"PK"), Part::Text("num_quest", "2")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn oversize_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let generator = ScriptedGenerator::quiz("summary");
    let big = vec![b'a'; 2048];

    let response = app_with_limit(&dir, generator.clone(), 1024)
        .oneshot(generate_request(
            "/api/v1/quizzes:generate",
            &[Part::File("big.txt", &big)],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("File too large"));
    assert!(upload_dir_is_empty(&dir));
}

#[tokio::test]
async fn body_over_request_limit_is_reported_as_too_large() {
    let dir = TempDir::new().unwrap();
    let generator = ScriptedGenerator::quiz("summary");
    // 1 KiB per file allows an 8 KiB body in total.
    let huge = vec![b'a'; 16 * 1024];

    let response = app_with_limit(&dir, generator.clone(), 1024)
        .oneshot(generate_request(
            "/api/v1/quizzes:generate",
            &[Part::File("huge.txt", &huge)],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "invalid_request");
    let message = json["error"]["message"].as_str().unwrap();
    assert!(
        message.starts_with("Request body too large"),
        "unexpected message {message}"
    );
    assert!(generator.prompts().is_empty());
    assert!(upload_dir_is_empty(&dir));
}

#[tokio::test]
async fn model_failure_maps_to_internal_error() {
    let dir = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(vec![Err(quizsmith::error::QuizError::Llm(
        "upstream said no".to_string(),
    ))]);

    let response = app(&dir, generator)
        .oneshot(generate_request(
            "/api/v1/quizzes:generate",
            &[Part::File("a.txt", b"text")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["message"], "An internal error occurred");
}

#[tokio::test]
async fn unavailable_model_maps_to_not_implemented() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(
        test_config(&dir, TEST_MAX_FILE_SIZE),
        LlmProvider::unavailable("no model configured"),
    );

    let response = create_router(state)
        .oneshot(generate_request(
            "/api/v1/quizzes:generate",
            &[Part::File("a.txt", b"text")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "not_implemented");
}
