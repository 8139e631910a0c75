use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::ingestion::AggregatedText;
use crate::llm::prompts::{fact_extraction_prompt, mcq_generation_prompt};
use crate::llm::TextGenerator;

use super::{GenerationParameters, QuizText};

/// Two-pass prompt chain: summarize the aggregated text, then write the quiz
/// from the summary.
///
/// The passes run strictly one after the other and the second pass only ever
/// sees the first pass's output. Model errors are returned as-is; there is no
/// retry and no partial result at this level.
#[derive(Clone)]
pub struct QuizPipeline {
    generator: Arc<dyn TextGenerator>,
}

impl QuizPipeline {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate_quiz(
        &self,
        text: &AggregatedText,
        params: &GenerationParameters,
    ) -> Result<QuizText> {
        tracing::info!(
            question_count = params.question_count(),
            options_per_question = params.options_per_question(),
            difficulty = %params.difficulty(),
            difficulty_level = params.difficulty().level(),
            input_len = text.len(),
            "Generating quiz"
        );

        let started = Instant::now();
        let summary = self
            .generator
            .generate(&fact_extraction_prompt(text.as_str()))
            .await?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            summary_len = summary.len(),
            "Fact extraction pass finished"
        );

        let started = Instant::now();
        let quiz = self
            .generator
            .generate(&mcq_generation_prompt(&summary, params))
            .await?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            quiz_len = quiz.len(),
            "MCQ pass finished"
        );

        let quiz = QuizText::new(quiz);
        if !quiz.has_expected_shape() {
            tracing::warn!("Model output is missing the Questions:/Answers: layout, returning it unchanged");
        }

        tracing::info!("Quiz generation finished");
        Ok(quiz)
    }
}
