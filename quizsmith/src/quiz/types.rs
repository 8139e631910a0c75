use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

/// Difficulty level named in the MCQ prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Tough,
}

impl Difficulty {
    /// Map a user-facing label onto a level.
    ///
    /// Accepts `easy`, `medium` and `hard` (case-insensitive, surrounding
    /// whitespace ignored). Anything else falls back to [`Difficulty::Easy`].
    pub fn from_label(label: &str) -> Self {
        let level = match label.trim().to_lowercase().as_str() {
            "medium" => 2,
            "hard" => 3,
            _ => 1,
        };
        Self::from_level(level).unwrap_or_default()
    }

    /// Numeric levels 1..=3.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Tough),
            _ => None,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Tough => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Tough => "Tough",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the requested quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParameters {
    question_count: u32,
    options_per_question: u32,
    difficulty: Difficulty,
}

impl GenerationParameters {
    /// Both counts must be positive.
    pub fn new(question_count: u32, options_per_question: u32, difficulty: Difficulty) -> Result<Self> {
        if question_count == 0 {
            return Err(QuizError::Validation(
                "Question count must be a positive integer".to_string(),
            ));
        }
        if options_per_question == 0 {
            return Err(QuizError::Validation(
                "Options per question must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            question_count,
            options_per_question,
            difficulty,
        })
    }

    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn options_per_question(&self) -> u32 {
        self.options_per_question
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

/// Raw model output of the MCQ pass, passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizText(String);

/// Borrowed view of the `Questions:` / `Answers:` halves of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSections<'a> {
    pub questions: &'a str,
    pub answers: &'a str,
}

const QUESTIONS_MARKER: &str = "Questions:";
const ANSWERS_MARKER: &str = "Answers:";

impl QuizText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Locate the requested output shape without enforcing it.
    ///
    /// Returns `None` unless a `Questions:` marker is followed somewhere later
    /// by an `Answers:` marker.
    pub fn sections(&self) -> Option<QuizSections<'_>> {
        let questions_at = self.0.find(QUESTIONS_MARKER)?;
        let body_start = questions_at + QUESTIONS_MARKER.len();
        let answers_offset = self.0[body_start..].find(ANSWERS_MARKER)?;
        let answers_at = body_start + answers_offset;

        Some(QuizSections {
            questions: self.0[body_start..answers_at].trim(),
            answers: self.0[answers_at + ANSWERS_MARKER.len()..].trim(),
        })
    }

    pub fn has_expected_shape(&self) -> bool {
        self.sections().is_some()
    }
}

impl std::fmt::Display for QuizText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
