//! TF-IDF similarity scoring between a resume and a job description

use crate::processing::document::Document;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Similarity between one resume and one job description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// Cosine similarity of the TF-IDF vectors, in [0, 1].
    pub score: f64,
    /// `score * 100`, rounded to one decimal place.
    pub match_percentage: f64,
}

impl MatchScore {
    pub const ZERO: MatchScore = MatchScore {
        score: 0.0,
        match_percentage: 0.0,
    };
}

/// Score a preprocessed resume against a preprocessed job description.
pub fn score(resume: &Document, job: &Document) -> MatchScore {
    score_texts(&resume.preprocessed_text, &job.preprocessed_text)
}

/// Both texts become term-frequency vectors over their combined
/// vocabulary, weighted by smoothed inverse document frequency
/// (`ln((1 + N) / (1 + df)) + 1` with N = 2) so terms present in both
/// documents keep positive weight. The result is the cosine of the two
/// weighted vectors.
///
/// Scoring is a pure function of the two texts: the corpus is always
/// exactly this pair, so batch composition cannot change a pair's
/// score, and the vocabulary is walked in sorted order so the
/// floating-point accumulation order is fixed.
pub fn score_texts(resume_text: &str, job_text: &str) -> MatchScore {
    let resume_tf = term_frequencies(resume_text);
    let job_tf = term_frequencies(job_text);

    if resume_tf.is_empty() || job_tf.is_empty() {
        return MatchScore::ZERO;
    }

    const CORPUS_SIZE: f64 = 2.0;

    let vocabulary: BTreeSet<&str> = resume_tf.keys().chain(job_tf.keys()).copied().collect();

    let mut dot = 0.0_f64;
    let mut resume_norm = 0.0_f64;
    let mut job_norm = 0.0_f64;

    for term in vocabulary {
        let resume_count = resume_tf.get(term).copied().unwrap_or(0) as f64;
        let job_count = job_tf.get(term).copied().unwrap_or(0) as f64;

        let df = (resume_count > 0.0) as u32 + (job_count > 0.0) as u32;
        let idf = ((1.0 + CORPUS_SIZE) / (1.0 + f64::from(df))).ln() + 1.0;

        let resume_weight = resume_count * idf;
        let job_weight = job_count * idf;

        dot += resume_weight * job_weight;
        resume_norm += resume_weight * resume_weight;
        job_norm += job_weight * job_weight;
    }

    if resume_norm == 0.0 || job_norm == 0.0 {
        return MatchScore::ZERO;
    }

    let cosine = (dot / (resume_norm.sqrt() * job_norm.sqrt())).clamp(0.0, 1.0);

    MatchScore {
        score: cosine,
        match_percentage: round_percentage(cosine),
    }
}

fn term_frequencies(text: &str) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for term in text.split_whitespace() {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

fn round_percentage(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}
