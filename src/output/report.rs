//! Tabular report projection of a ranked batch

use crate::error::{Result, ResumeRankerError};
use crate::processing::document::RankedResume;
use serde::{Deserialize, Serialize};

/// One row of the ranking report.
///
/// Field names and their order are a stable contract for exports; new
/// columns may be appended but existing ones never move or rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Resume_Filename")]
    pub resume_filename: String,
    #[serde(rename = "Match_Score")]
    pub match_score: f64,
    #[serde(rename = "Match_Percentage")]
    pub match_percentage: f64,
    #[serde(rename = "Skills_Count")]
    pub skills_count: usize,
    #[serde(rename = "ATS_Friendly")]
    pub ats_friendly: bool,
    #[serde(rename = "Key_Skills")]
    pub key_skills: String,
    #[serde(rename = "Upload_Date")]
    pub upload_date: String,
}

impl ReportRow {
    pub fn from_entry(entry: &RankedResume) -> Self {
        let resume = &entry.resume;
        Self {
            rank: entry.rank,
            resume_filename: resume.filename.clone(),
            match_score: resume.score,
            match_percentage: resume.match_percentage,
            skills_count: resume.skill_count,
            ats_friendly: resume.is_ats_friendly,
            key_skills: resume.key_skills.join(", "),
            upload_date: resume.loaded_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Project ranked entries into report rows, preserving rank order.
pub fn report_rows(entries: &[&RankedResume]) -> Vec<ReportRow> {
    entries.iter().map(|e| ReportRow::from_entry(e)).collect()
}

/// Serialize report rows as CSV with a header row.
pub fn to_csv(rows: &[ReportRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ResumeRankerError::OutputFormatting(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ResumeRankerError::OutputFormatting(e.to_string()))
}

/// Serialize report rows as pretty-printed JSON.
pub fn to_json(rows: &[ReportRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
