//! Document-to-quiz generation.
//!
//! Uploaded `.txt`, `.docx` and `.pdf` files are read into one aggregated text
//! ([`ingestion`]), condensed by a fact-extraction prompt and turned into a
//! multiple-choice quiz by a second prompt ([`quiz`]). Both prompts go through
//! the [`llm::TextGenerator`] boundary.

pub mod api;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod llm;
pub mod quiz;
