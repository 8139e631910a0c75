#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quizsmith::error::{QuizError, Result};
use quizsmith::llm::TextGenerator;

/// Write `content` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap_or_else(|e| panic!("Failed to write '{name}': {e}"));
    path
}

/// A DOCX with one body paragraph per entry. Empty strings make empty paragraphs.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::*;

    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        if text.is_empty() {
            docx.add_paragraph(Paragraph::new())
        } else {
            docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
        }
    });

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack DOCX");
    buffer.into_inner()
}

/// A PDF with one page per entry, each drawing its text in Courier.
/// Empty strings make pages with no text layer.
pub fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 14.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("Failed to encode PDF content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("Failed to write PDF");
    buffer
}

/// Lines that open a per-file section.
pub fn section_markers(text: &str) -> Vec<&str> {
    text.lines().filter(|line| line.starts_with("--- ")).collect()
}

/// Model stand-in that replays canned replies and records every prompt.
pub struct ScriptedGenerator {
    replies: Mutex<Vec<Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Summary on the first call, a well-formed quiz on the second.
    pub fn quiz(summary: &str) -> Arc<Self> {
        Self::new(vec![Ok(summary.to_string()), Ok(sample_quiz().to_string())])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());
        self.replies
            .lock()
            .expect("replies lock")
            .pop()
            .unwrap_or_else(|| Err(QuizError::Llm("no scripted reply left".to_string())))
    }
}

pub fn sample_quiz() -> &'static str {
    "Questions:\n\
     1. What is the capital of France?\n\
     A) Berlin\nB) Paris\nC) Rome\nD) Madrid\n\
     2. Which continent is France in?\n\
     A) Asia\nB) Africa\nC) Europe\nD) Oceania\n\
     3. Paris is a ...?\n\
     A) Capital\nB) River\nC) Mountain\nD) Island\n\n\
     Answers:\n\
     1. B\n2. C\n3. A"
}
