use std::sync::Arc;

use crate::config::Config;
use crate::ingestion::Ingestor;
use crate::llm::{LlmProvider, TextGenerator};
use crate::quiz::QuizPipeline;

use super::uploads::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: LlmProvider,
    pub ingestor: Ingestor,
    pub pipeline: QuizPipeline,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(config: Config, llm: LlmProvider) -> Self {
        let generator: Arc<dyn TextGenerator> = Arc::new(llm.clone());
        Self::with_generator(config, llm, generator)
    }

    /// Build state around an arbitrary generator, keeping `llm` for status reporting.
    pub fn with_generator(
        config: Config,
        llm: LlmProvider,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let config = Arc::new(config);
        let uploads = UploadStore::new(&config.upload);

        Self {
            config,
            llm,
            ingestor: Ingestor::new(),
            pipeline: QuizPipeline::new(generator),
            uploads,
        }
    }
}
