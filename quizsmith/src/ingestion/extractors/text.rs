use super::ExtractionError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct TextExtractor;

impl TextExtractor {
    /// Decode a plain-text upload as UTF-8.
    ///
    /// A leading byte-order mark is dropped and `\r\n` / `\r` line endings are
    /// normalized to `\n`. Invalid UTF-8 is reported as an encoding error.
    pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let text = std::str::from_utf8(body)
            .map_err(|e| ExtractionError::Encoding(format!("invalid UTF-8: {e}")))?;

        if text.contains('\r') {
            Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
        } else {
            Ok(text.to_string())
        }
    }
}
