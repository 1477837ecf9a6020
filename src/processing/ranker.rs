//! Batch ranking and rank-range filtering

use crate::error::{Result, ResumeRankerError};
use crate::processing::document::{RankedBatch, RankedResume, ScoredResume};

/// Order a batch of scored resumes and assign dense 1-based ranks.
///
/// Sort key: descending score, then descending skill count, then
/// ascending filename. The filename tie-break makes the order total,
/// so ranks are strict even on exact score ties.
pub fn rank(mut scored: Vec<ScoredResume>) -> RankedBatch {
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.skill_count.cmp(&a.skill_count))
            .then_with(|| a.filename.cmp(&b.filename))
    });

    RankedBatch {
        entries: scored
            .into_iter()
            .enumerate()
            .map(|(idx, resume)| RankedResume {
                rank: idx + 1,
                resume,
            })
            .collect(),
    }
}

/// Return the entries with `rank >= min_rank` and, when `max_rank` is
/// given, `rank <= max_rank`, preserving rank order.
///
/// Pure and side-effect free; the same batch and bounds always yield
/// the same subsequence. An out-of-range window past the end of the
/// batch is not an error, it is simply empty.
pub fn filter_by_rank(
    batch: &RankedBatch,
    min_rank: usize,
    max_rank: Option<usize>,
) -> Result<Vec<&RankedResume>> {
    if min_rank < 1 || max_rank.is_some_and(|max| max < min_rank) {
        return Err(ResumeRankerError::InvalidRange { min_rank, max_rank });
    }

    Ok(batch
        .iter()
        .filter(|entry| entry.rank >= min_rank && max_rank.map_or(true, |max| entry.rank <= max))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn scored(filename: &str, score: f64, skill_count: usize) -> ScoredResume {
        ScoredResume {
            id: format!("id-{}", filename),
            filename: filename.to_string(),
            raw_text: String::new(),
            preprocessed_text: String::new(),
            score,
            match_percentage: (score * 1000.0).round() / 10.0,
            skill_count,
            key_skills: Vec::new(),
            is_ats_friendly: false,
            loaded_at: Local::now(),
        }
    }

    fn sample_batch() -> RankedBatch {
        rank(vec![
            scored("a.pdf", 0.9, 3),
            scored("b.pdf", 0.7, 1),
            scored("c.pdf", 0.5, 2),
            scored("d.pdf", 0.3, 0),
            scored("e.pdf", 0.1, 0),
        ])
    }

    #[test]
    fn test_ranks_are_dense_and_ordered_by_score() {
        let batch = sample_batch();

        let ranks: Vec<usize> = batch.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);

        let files: Vec<&str> = batch.iter().map(|e| e.resume.filename.as_str()).collect();
        assert_eq!(files, vec!["a.pdf", "b.pdf", "c.pdf", "d.pdf", "e.pdf"]);
    }

    #[test]
    fn test_score_tie_broken_by_skill_count() {
        let batch = rank(vec![
            scored("few_skills.pdf", 0.5, 1),
            scored("many_skills.pdf", 0.5, 4),
        ]);

        assert_eq!(batch.entries[0].resume.filename, "many_skills.pdf");
        assert_eq!(batch.entries[0].rank, 1);
        assert_eq!(batch.entries[1].rank, 2);
    }

    #[test]
    fn test_full_tie_broken_by_filename() {
        let batch = rank(vec![
            scored("zeta.pdf", 0.5, 2),
            scored("alpha.pdf", 0.5, 2),
        ]);

        assert_eq!(batch.entries[0].resume.filename, "alpha.pdf");
        assert_eq!(batch.entries[1].resume.filename, "zeta.pdf");
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let inputs = || {
            vec![
                scored("b.pdf", 0.5, 2),
                scored("a.pdf", 0.5, 2),
                scored("c.pdf", 0.9, 0),
            ]
        };

        let first: Vec<String> = rank(inputs())
            .iter()
            .map(|e| e.resume.filename.clone())
            .collect();
        let second: Vec<String> = rank(inputs())
            .iter()
            .map(|e| e.resume.filename.clone())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_middle_window() {
        let batch = sample_batch();

        let filtered = filter_by_rank(&batch, 2, Some(4)).unwrap();

        let ranks: Vec<usize> = filtered.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![2, 3, 4]);
    }

    #[test]
    fn test_filter_past_end_is_empty() {
        let batch = sample_batch();

        let filtered = filter_by_rank(&batch, 6, None).unwrap();

        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_open_ended() {
        let batch = sample_batch();

        let filtered = filter_by_rank(&batch, 3, None).unwrap();

        let ranks: Vec<usize> = filtered.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![3, 4, 5]);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let batch = sample_batch();

        let result = filter_by_rank(&batch, 3, Some(2));

        assert!(matches!(
            result,
            Err(ResumeRankerError::InvalidRange {
                min_rank: 3,
                max_rank: Some(2)
            })
        ));
    }

    #[test]
    fn test_zero_min_rank_rejected() {
        let batch = sample_batch();

        assert!(filter_by_rank(&batch, 0, None).is_err());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let batch = sample_batch();

        let first: Vec<usize> = filter_by_rank(&batch, 2, Some(4))
            .unwrap()
            .iter()
            .map(|e| e.rank)
            .collect();
        let second: Vec<usize> = filter_by_rank(&batch, 2, Some(4))
            .unwrap()
            .iter()
            .map(|e| e.rank)
            .collect();

        assert_eq!(first, second);
    }
}
