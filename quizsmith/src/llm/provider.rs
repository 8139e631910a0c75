use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{QuizError, Result};
use crate::llm::api::LlmApiClient;

/// Text-to-text model boundary used by the quiz pipeline.
///
/// Implementors receive a fully rendered prompt and return the generated text
/// unmodified. Errors are fatal for the request that issued the call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

impl LlmBackend {
    pub fn name(&self) -> &'static str {
        match self {
            LlmBackend::OpenAI => "openai",
            LlmBackend::OpenRouter => "openrouter",
            LlmBackend::Ollama => "ollama",
            LlmBackend::LmStudio => "lmstudio",
            LlmBackend::OpenAICompatible { .. } => "openai-compatible",
            LlmBackend::Unavailable { .. } => "unavailable",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionOptions {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            temperature: Some(config.temperature),
            max_tokens: Some(config.max_tokens),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Option<Arc<LlmConfig>>,
}

impl LlmProvider {
    pub fn new(config: &LlmConfig) -> Self {
        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        Self {
            backend,
            config: Some(Arc::new(config.clone())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_deref()
    }

    pub async fn complete(
        &self,
        prompt: &str,
        options: Option<&CompletionOptions>,
    ) -> Result<String> {
        if !self.is_available() {
            return Err(QuizError::LlmUnavailable(self.unavailable_reason()));
        }

        let config = self
            .config()
            .ok_or_else(|| QuizError::LlmUnavailable("No config available".to_string()))?;

        let client = LlmApiClient::new(config)?;
        client.complete(prompt, options).await
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "LLM completion is not available".to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for LlmProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let options = self.config().map(CompletionOptions::from_config);
        self.complete(prompt, options.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(model: &str, base_url: Option<&str>) -> LlmConfig {
        LlmConfig {
            model: model.to_string(),
            base_url: base_url.map(String::from),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_default_model_selects_ollama() {
        let provider = LlmProvider::new(&LlmConfig::default());
        assert_eq!(provider.backend(), &LlmBackend::Ollama);
        assert!(provider.is_available());
    }

    #[test]
    fn test_unknown_provider_without_base_url_is_unavailable() {
        let provider = LlmProvider::new(&config("mystery-model", None));
        assert!(!provider.is_available());
        assert_eq!(provider.backend().name(), "unavailable");
    }

    #[test]
    fn test_unknown_provider_with_base_url_is_compatible() {
        let provider = LlmProvider::new(&config("mystery-model", Some("http://llm.local/v1")));
        assert_eq!(
            provider.backend(),
            &LlmBackend::OpenAICompatible {
                base_url: "http://llm.local/v1".to_string()
            }
        );
    }

    #[test]
    fn test_completion_options_follow_config() {
        let options = CompletionOptions::from_config(&LlmConfig::default());
        assert_eq!(options.temperature, Some(0.12));
        assert_eq!(options.max_tokens, Some(1000));
    }

    #[tokio::test]
    async fn test_generate_on_unavailable_provider_fails() {
        let provider = LlmProvider::unavailable("no model configured");
        let err = provider.generate("prompt").await.unwrap_err();
        assert!(matches!(err, QuizError::LlmUnavailable(ref msg) if msg == "no model configured"));
    }
}
