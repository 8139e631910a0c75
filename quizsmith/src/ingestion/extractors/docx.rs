use super::ExtractionError;

pub struct DocxExtractor;

impl DocxExtractor {
    /// Text of every top-level body paragraph, newline-joined in document order.
    ///
    /// Empty paragraphs are kept as empty lines. Tables, headers and footers
    /// are not part of the body paragraph list and are skipped.
    pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ExtractionError::Docx(format!("DOCX parse error: {e}")))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    Some(Self::paragraph_text(paragraph))
                }
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }

    fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
        let mut content = String::new();
        Self::collect_children(&paragraph.children, &mut content);
        content
    }

    fn collect_children(children: &[docx_rs::ParagraphChild], content: &mut String) {
        for child in children {
            match child {
                docx_rs::ParagraphChild::Run(run) => Self::collect_run(run, content),
                docx_rs::ParagraphChild::Hyperlink(link) => {
                    Self::collect_children(&link.children, content)
                }
                _ => {}
            }
        }
    }

    fn collect_run(run: &docx_rs::Run, content: &mut String) {
        for run_child in &run.children {
            match run_child {
                docx_rs::RunChild::Text(text) => content.push_str(&text.text),
                docx_rs::RunChild::Tab(_) => content.push('\t'),
                docx_rs::RunChild::Break(_) => content.push('\n'),
                _ => {}
            }
        }
    }
}
