//! Document structures and analysis result types

use crate::processing::text_processor::TextPreprocessor;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A piece of text together with its canonical preprocessed form.
///
/// The preprocessed text is computed exactly once at construction and
/// is a deterministic function of the raw text and the preprocessor
/// configuration; it is never recomputed implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub raw_text: String,
    pub preprocessed_text: String,
}

impl Document {
    pub fn new(raw_text: impl Into<String>, preprocessor: &TextPreprocessor) -> Self {
        let raw_text = raw_text.into();
        let preprocessed_text = preprocessor.preprocess(&raw_text);
        Self {
            raw_text,
            preprocessed_text,
        }
    }

    /// True when no usable tokens survived preprocessing.
    pub fn is_empty(&self) -> bool {
        self.preprocessed_text.is_empty()
    }
}

/// An extracted resume file, ready for scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeFile {
    pub filename: String,
    pub text: String,
    pub loaded_at: DateTime<Local>,
}

/// A resume scored against one job description. Immutable value type;
/// holds no reference back to the batch it was produced in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResume {
    pub id: String,
    pub filename: String,
    pub raw_text: String,
    pub preprocessed_text: String,
    /// Cosine similarity in [0, 1].
    pub score: f64,
    /// `score * 100`, rounded to one decimal place.
    pub match_percentage: f64,
    pub skill_count: usize,
    /// Unique skill terms shared with the job description, ordered by
    /// descending frequency in the job description.
    pub key_skills: Vec<String>,
    pub is_ats_friendly: bool,
    pub loaded_at: DateTime<Local>,
}

/// One entry of a ranked batch; rank is 1-based and dense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResume {
    pub rank: usize,
    pub resume: ScoredResume,
}

/// The ordered result of ranking one set of resumes against one job
/// description. Constructed once per analysis run and not mutated
/// afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankedBatch {
    pub entries: Vec<RankedResume>,
}

impl RankedBatch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedResume> {
        self.entries.iter()
    }
}

/// A file dropped from the batch with the reason it was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

/// Result of one full analysis run: the ranked batch plus every file
/// that was skipped along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub batch: RankedBatch,
    pub skipped: Vec<SkippedFile>,
}
