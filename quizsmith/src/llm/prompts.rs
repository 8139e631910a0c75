//! Prompt templates for the two quiz-generation passes
//!
//! These templates use basic `format!()` interpolation for type safety.
//! Missing variables will cause compile-time errors.

use crate::quiz::GenerationParameters;

/// Generate the fact-extraction prompt (first pass)
///
/// Instructs the model to summarize the aggregated document text without
/// inventing anything and to weight every source file equally, so the largest
/// upload does not crowd out the others.
///
/// # Example
/// ```
/// use quizsmith::llm::prompts::fact_extraction_prompt;
///
/// let prompt = fact_extraction_prompt("Paris is the capital of France.");
/// assert!(prompt.starts_with("Input text: Paris is the capital of France.\n"));
/// ```
pub fn fact_extraction_prompt(text: &str) -> String {
    format!(
        "Input text: {text}\n\
         Extract relevant information from the given text, don't create information out of \
         nowhere and return your complete and detailed summary of the given text. MAKE SURE to \
         give equal importance to each file data so that your summary has equal weightage of \
         all topics in the data."
    )
}

/// Generate the multiple-choice question prompt (second pass)
///
/// `summary` is the output of the extraction pass. The requested shape is all
/// questions first, then all answers, with the correct option position varying
/// between questions. The shape is requested, not enforced.
///
/// # Example
/// ```
/// use quizsmith::llm::prompts::mcq_generation_prompt;
/// use quizsmith::quiz::{Difficulty, GenerationParameters};
///
/// let params = GenerationParameters::new(3, 4, Difficulty::Medium).unwrap();
/// let prompt = mcq_generation_prompt("Paris is in France.", &params);
/// assert!(prompt.contains("create 3 multiple choice questions"));
/// assert!(prompt.contains("Medium level"));
/// ```
pub fn mcq_generation_prompt(summary: &str, params: &GenerationParameters) -> String {
    let question_count = params.question_count();
    let options_per_question = params.options_per_question();
    let difficulty = params.difficulty().as_str();

    format!(
        "Input text: {summary}\n\
         Based on information of the input text, create {question_count} multiple choice \
         questions based on the text, give {options_per_question} options per question. The \
         difficulty level of the questions should be {difficulty} level. FORMATTING: 1] Make \
         sure to generate the questions FIRST. AFTER generating all the questions, write all \
         the answers. Example:\n\
         Questions:\n\
         `generated questions`\n\
         Answers:\n\
         `ordered and numbered answers to the questions`. Make sure the correct option number \
         always fluctuates."
    )
}
