//! Batch analysis engine coordinating scoring, skill analysis, and ranking

use crate::config::Config;
use crate::error::{Result, ResumeRankerError};
use crate::processing::ats_matcher::{SkillAnalysis, SkillMatcher};
use crate::processing::document::{
    BatchOutcome, Document, ResumeFile, ScoredResume, SkippedFile,
};
use crate::processing::ranker;
use crate::processing::scorer;
use crate::processing::text_processor::TextPreprocessor;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

/// Runs one analysis request: every resume in the batch is scored
/// against the shared job description, analyzed for skills and ATS
/// friendliness, and the results ranked.
///
/// Resumes are independent, so scoring fans out across blocking tasks
/// bounded by the configured worker count; the ranking step waits for
/// every score before ordering the batch.
pub struct AnalysisEngine {
    preprocessor: TextPreprocessor,
    skill_matcher: Arc<SkillMatcher>,
    workers: usize,
}

enum ScoreOutcome {
    Scored(Box<ScoredResume>),
    Unusable(SkippedFile),
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Result<Self> {
        let skill_matcher = SkillMatcher::new(&config.analysis)?;
        debug!("Skill vocabulary: {} terms", skill_matcher.vocabulary_size());

        Ok(Self {
            preprocessor: TextPreprocessor::new(&config.preprocessing),
            skill_matcher: Arc::new(skill_matcher),
            workers: config.scoring.workers.max(1),
        })
    }

    /// Skill analysis for a single resume, used by the rewrite flow.
    pub fn analyze_skills(&self, resume_text: &str, job_text: &str) -> SkillAnalysis {
        self.skill_matcher.analyze_skills(resume_text, job_text)
    }

    /// Score, analyze, and rank a batch of extracted resumes against
    /// one job description.
    ///
    /// Resumes with no usable text after preprocessing are reported as
    /// skipped; `NoResumes` is returned when nothing survives.
    pub async fn analyze_batch(
        &self,
        job_text: &str,
        resumes: Vec<ResumeFile>,
    ) -> Result<BatchOutcome> {
        if resumes.is_empty() {
            return Err(ResumeRankerError::NoResumes);
        }

        let job = Arc::new(Document::new(job_text, &self.preprocessor));
        info!(
            "Scoring {} resumes against the job description ({} workers)",
            resumes.len(),
            self.workers
        );

        let mut outcomes = Vec::with_capacity(resumes.len());
        let mut pending = resumes.into_iter();

        loop {
            let chunk: Vec<ResumeFile> = pending.by_ref().take(self.workers).collect();
            if chunk.is_empty() {
                break;
            }

            let mut handles = Vec::with_capacity(chunk.len());
            for file in chunk {
                let job = Arc::clone(&job);
                let matcher = Arc::clone(&self.skill_matcher);
                let preprocessor = self.preprocessor.clone();
                handles.push(tokio::task::spawn_blocking(move || {
                    score_one(file, &job, &matcher, &preprocessor)
                }));
            }

            for handle in handles {
                let outcome = handle.await.map_err(|e| {
                    ResumeRankerError::Processing(format!("scoring task failed: {}", e))
                })?;
                outcomes.push(outcome);
            }
        }

        let mut scored = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                ScoreOutcome::Scored(resume) => scored.push(*resume),
                ScoreOutcome::Unusable(file) => skipped.push(file),
            }
        }

        if scored.is_empty() {
            return Err(ResumeRankerError::NoResumes);
        }

        Ok(BatchOutcome {
            batch: ranker::rank(scored),
            skipped,
        })
    }
}

fn score_one(
    file: ResumeFile,
    job: &Document,
    matcher: &SkillMatcher,
    preprocessor: &TextPreprocessor,
) -> ScoreOutcome {
    let ResumeFile {
        filename,
        text,
        loaded_at,
    } = file;

    let doc = Document::new(text, preprocessor);
    if doc.is_empty() {
        return ScoreOutcome::Unusable(SkippedFile {
            filename,
            reason: "no usable text after preprocessing".to_string(),
        });
    }

    let match_score = scorer::score(&doc, job);
    let skills = matcher.analyze_skills(&doc.raw_text, &job.raw_text);
    let is_ats_friendly = matcher.is_ats_friendly(&doc.raw_text);

    debug!(
        "{}: score {:.4}, {} key skills",
        filename, match_score.score, skills.skill_count
    );

    ScoreOutcome::Scored(Box::new(ScoredResume {
        id: Uuid::new_v4().to_string(),
        filename,
        raw_text: doc.raw_text,
        preprocessed_text: doc.preprocessed_text,
        score: match_score.score,
        match_percentage: match_score.match_percentage,
        skill_count: skills.skill_count,
        key_skills: skills.key_skills,
        is_ats_friendly,
        loaded_at,
    }))
}
