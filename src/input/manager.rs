//! Input manager for handling different file types

use crate::error::{Result, ResumeRankerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::processing::document::{ResumeFile, SkippedFile};
use chrono::Local;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

/// Per-file outcome of extracting a batch of resume files. Extraction
/// failures never abort sibling files; they are collected as skips.
#[derive(Debug, Default)]
pub struct BatchExtraction {
    pub resumes: Vec<ResumeFile>,
    pub skipped: Vec<SkippedFile>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        // Check cache first
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        // Validate file exists
        if !path.exists() {
            return Err(ResumeRankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        // Detect file type
        let file_type = self.detect_file_type(path)?;

        // Route to appropriate extractor
        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeRankerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        // Cache the result
        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract every resume in the batch, converting per-file failures
    /// and empty documents into skips instead of aborting the run.
    /// `on_file` is invoked once per path after its outcome is known.
    pub async fn load_batch(
        &mut self,
        paths: &[impl AsRef<Path>],
        mut on_file: impl FnMut(&Path),
    ) -> BatchExtraction {
        let mut batch = BatchExtraction::default();

        for path in paths {
            let path = path.as_ref();
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());

            match self.extract_text(path).await {
                Ok(text) if text.trim().is_empty() => {
                    let err = ResumeRankerError::EmptyDocument {
                        filename: filename.clone(),
                    };
                    warn!("{}", err);
                    batch.skipped.push(SkippedFile {
                        filename,
                        reason: err.to_string(),
                    });
                }
                Ok(text) => {
                    batch.resumes.push(ResumeFile {
                        filename,
                        text,
                        loaded_at: Local::now(),
                    });
                }
                Err(err) => {
                    warn!("Skipping {}: {}", filename, err);
                    batch.skipped.push(SkippedFile {
                        filename,
                        reason: err.to_string(),
                    });
                }
            }

            on_file(path);
        }

        batch
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path.extension().and_then(|ext| ext.to_str()).ok_or_else(|| {
            ResumeRankerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
