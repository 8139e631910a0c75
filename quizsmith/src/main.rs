use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quizsmith::api::{create_router, AppState};
use quizsmith::config::Config;
use quizsmith::ingestion::{FileReference, Ingestor};
use quizsmith::llm::{LlmProvider, TextGenerator};
use quizsmith::quiz::{Difficulty, GenerationParameters, QuizPipeline};

#[derive(Parser)]
#[command(name = "quizsmith")]
#[command(about = "Turn txt, docx and pdf documents into multiple-choice quizzes")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Generate a quiz from local files and print it
    Generate {
        /// Input files (.txt, .docx, .pdf)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Number of questions (defaults to QUIZ_DEFAULT_QUESTIONS)
        #[arg(long)]
        questions: Option<u32>,
        /// Options per question (defaults to QUIZ_DEFAULT_OPTIONS)
        #[arg(long)]
        options: Option<u32>,
        /// easy, medium or hard
        #[arg(long, default_value = "easy")]
        difficulty: String,
        /// Print the aggregated document text before the quiz
        #[arg(long)]
        show_text: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizsmith=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();

    tracing::info!("Initializing LLM provider: {}...", config.llm.model);
    let llm = LlmProvider::new(&config.llm);
    if !llm.is_available() {
        tracing::warn!("LLM unavailable - quiz generation requests will fail");
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, llm).await,
        Command::Generate {
            files,
            questions,
            options,
            difficulty,
            show_text,
        } => {
            let params = GenerationParameters::new(
                questions.unwrap_or(config.quiz.question_count),
                options.unwrap_or(config.quiz.options_per_question),
                Difficulty::from_label(&difficulty),
            )?;
            generate(files, params, llm, show_text).await
        }
    }
}

async fn serve(config: Config, llm: LlmProvider) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = create_router(AppState::new(config, llm));

    tracing::info!("Quizsmith starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn generate(
    files: Vec<PathBuf>,
    params: GenerationParameters,
    llm: LlmProvider,
    show_text: bool,
) -> anyhow::Result<()> {
    let files: Vec<FileReference> = files.into_iter().map(FileReference::new).collect();
    let report = tokio::task::spawn_blocking(move || Ingestor::new().ingest(&files)).await?;

    for failure in report.failures() {
        tracing::warn!(
            path = %failure.source.display_path(),
            status = failure.outcome.status(),
            "File was not ingested"
        );
    }

    let text = report.render();
    if show_text {
        println!("{text}");
        println!("==========");
    }

    let generator: Arc<dyn TextGenerator> = Arc::new(llm);
    let quiz = QuizPipeline::new(generator)
        .generate_quiz(&text, &params)
        .await?;
    println!("{quiz}");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
