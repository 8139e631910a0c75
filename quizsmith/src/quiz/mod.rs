mod pipeline;
mod types;

pub use pipeline::QuizPipeline;
pub use types::{Difficulty, GenerationParameters, QuizSections, QuizText};
