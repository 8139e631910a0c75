//! Scratch storage for uploaded files.
//!
//! Every request gets its own `<UPLOAD_DIR>/<nanoid>/` directory, so two
//! concurrent uploads of `notes.txt` never see each other's bytes.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use nanoid::nanoid;
use regex::Regex;

use crate::config::UploadConfig;
use crate::error::{QuizError, Result};
use crate::ingestion::{FileFormat, FileReference};

/// Upper bound on the number of files one multipart request is expected to carry.
const MAX_FILES_PER_REQUEST: usize = 8;

/// True when `name` carries one of the accepted extensions.
pub fn allowed_file(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| FileFormat::from_extension(ext).is_some())
        .unwrap_or(false)
}

fn unsafe_chars() -> &'static Regex {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("static regex is valid"))
}

/// Reduce a client-supplied name to something safe to create on disk.
///
/// Returns `None` when nothing usable is left (e.g. `"../.."` or `"文件"`).
pub fn secure_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let ascii: String = base.chars().filter(char::is_ascii).collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = unsafe_chars().replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_file_size: usize,
    retain: bool,
}

impl UploadStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: config.dir.clone(),
            max_file_size: config.max_file_size,
            retain: config.retain,
        }
    }

    /// Largest multipart body accepted for one request.
    pub fn request_body_limit(&self) -> usize {
        self.max_file_size.saturating_mul(MAX_FILES_PER_REQUEST)
    }

    /// Create the directory that holds one request's files.
    pub async fn begin_request(&self) -> Result<UploadBatch> {
        let dir = self.root.join(nanoid!());
        tokio::fs::create_dir_all(&dir).await?;
        tracing::debug!(dir = %dir.display(), "Created upload directory");

        Ok(UploadBatch {
            dir,
            max_file_size: self.max_file_size,
            retain: self.retain,
            files: Vec::new(),
        })
    }
}

/// Files saved for a single request, in arrival order.
#[derive(Debug)]
pub struct UploadBatch {
    dir: PathBuf,
    max_file_size: usize,
    retain: bool,
    files: Vec<FileReference>,
}

impl UploadBatch {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[FileReference] {
        &self.files
    }

    /// Write one upload under its sanitized name and remember it.
    pub async fn save(&mut self, original_name: &str, bytes: &[u8]) -> Result<FileReference> {
        if bytes.len() > self.max_file_size {
            return Err(QuizError::Upload(format!(
                "File too large: {} bytes (max {} bytes)",
                bytes.len(),
                self.max_file_size
            )));
        }

        let name = secure_filename(original_name).ok_or_else(|| {
            QuizError::Upload(format!("Unusable file name: {original_name:?}"))
        })?;

        let path = self.unique_path(&name);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Saved upload");

        let file = FileReference::new(path);
        self.files.push(file.clone());
        Ok(file)
    }

    // same name twice in one request: suffix the later copy instead of overwriting
    fn unique_path(&self, name: &str) -> PathBuf {
        let candidate = self.dir.join(name);
        if !self.files.iter().any(|f| f.path() == candidate) {
            return candidate;
        }

        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) => (stem, format!(".{ext}")),
            None => (name, String::new()),
        };
        (1..)
            .map(|n| self.dir.join(format!("{stem}-{n}{ext}")))
            .find(|p| !self.files.iter().any(|f| f.path() == p))
            .unwrap_or(candidate)
    }

    /// Remove the request directory unless uploads are retained.
    pub async fn finish(self) {
        if self.retain {
            return;
        }
        if let Err(e) = tokio::fs::remove_dir_all(&self.dir).await {
            tracing::warn!(dir = %self.dir.display(), error = %e, "Failed to remove upload directory");
        }
    }
}
