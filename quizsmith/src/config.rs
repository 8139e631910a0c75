use std::env;
use std::path::PathBuf;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub llm: LlmConfig,
    pub quiz: QuizDefaults,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where uploaded files land before ingestion.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_file_size: usize,
    /// Keep per-request upload directories instead of removing them after the response.
    pub retain: bool,
}

/// LLM configuration for the chat/completion model behind the quiz pipeline
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    // None means calls block until the model answers
    pub timeout_secs: Option<u64>,
    pub max_retries: u32,
}

/// Generation parameters used when a request leaves them out.
#[derive(Debug, Clone)]
pub struct QuizDefaults {
    pub question_count: u32,
    pub options_per_question: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "ollama/llama3.1:8b".to_string(),
            api_key: None,
            base_url: None,
            temperature: 0.12,
            max_tokens: 1000,
            timeout_secs: None,
            max_retries: 0,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_file_size: 25 * 1024 * 1024,
            retain: false,
        }
    }
}

impl Default for QuizDefaults {
    fn default() -> Self {
        Self {
            question_count: 6,
            options_per_question: 4,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let upload_defaults = UploadConfig::default();
        let llm_defaults = LlmConfig::default();
        let quiz_defaults = QuizDefaults::default();

        Self {
            server: ServerConfig {
                host: env::var("QUIZSMITH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("QUIZSMITH_PORT", 5000),
            },
            upload: UploadConfig {
                dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(upload_defaults.dir),
                max_file_size: parse_env_or("UPLOAD_MAX_FILE_SIZE", upload_defaults.max_file_size),
                retain: parse_env_or("UPLOAD_RETAIN", upload_defaults.retain),
            },
            llm: LlmConfig {
                model: env::var("LLM_MODEL").unwrap_or(llm_defaults.model),
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                temperature: parse_env_or("LLM_TEMPERATURE", llm_defaults.temperature),
                max_tokens: parse_env_or("LLM_MAX_TOKENS", llm_defaults.max_tokens),
                timeout_secs: parse_env_opt("LLM_TIMEOUT"),
                max_retries: parse_env_or("LLM_MAX_RETRIES", llm_defaults.max_retries),
            },
            quiz: QuizDefaults {
                question_count: parse_env_or(
                    "QUIZ_DEFAULT_QUESTIONS",
                    quiz_defaults.question_count,
                ),
                options_per_question: parse_env_or(
                    "QUIZ_DEFAULT_OPTIONS",
                    quiz_defaults.options_per_question,
                ),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
