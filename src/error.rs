//! Error handling for the resume ranker application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeRankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not extract text from {filename}: {reason}")]
    Extraction { filename: String, reason: String },

    #[error("no usable text in {filename}")]
    EmptyDocument { filename: String },

    #[error("invalid rank range: min_rank must be >= 1 and max_rank must not be below it (got min {min_rank}, max {max_rank:?})")]
    InvalidRange {
        min_rank: usize,
        max_rank: Option<usize>,
    },

    #[error("no resumes survived extraction and preprocessing")]
    NoResumes,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("file format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("processing error: {0}")]
    Processing(String),

    #[error("output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeRankerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeRankerError {
    fn from(err: anyhow::Error) -> Self {
        ResumeRankerError::Processing(err.to_string())
    }
}
