//! Output formatting for ranking results

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report;
use crate::processing::document::{RankedResume, SkippedFile};
use colored::Colorize;

/// Console formatter with optional color and detail.
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    pub fn format_batch(&self, entries: &[&RankedResume], skipped: &[SkippedFile]) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{:<5} {:<30} {:>8} {:>7} {:>6}\n",
            "Rank", "Resume", "Match", "Skills", "ATS"
        ));
        out.push_str(&"-".repeat(60));
        out.push('\n');

        for entry in entries {
            let resume = &entry.resume;
            let percentage = format!("{:.1}%", resume.match_percentage);
            let percentage = if self.use_colors {
                self.colorize_percentage(&percentage, resume.match_percentage)
            } else {
                percentage
            };
            let ats = if resume.is_ats_friendly { "yes" } else { "no" };

            out.push_str(&format!(
                "{:<5} {:<30} {:>8} {:>7} {:>6}\n",
                entry.rank,
                truncate(&resume.filename, 30),
                percentage,
                resume.skill_count,
                ats
            ));

            if self.detailed && !resume.key_skills.is_empty() {
                out.push_str(&format!(
                    "      key skills: {}\n",
                    resume.key_skills.join(", ")
                ));
            }
        }

        if !skipped.is_empty() {
            out.push('\n');
            for file in skipped {
                let line = format!("skipped {}: {}", file.filename, file.reason);
                if self.use_colors {
                    out.push_str(&format!("{}\n", line.yellow()));
                } else {
                    out.push_str(&line);
                    out.push('\n');
                }
            }
        }

        out
    }

    fn colorize_percentage(&self, text: &str, percentage: f64) -> String {
        if percentage >= 70.0 {
            text.green().to_string()
        } else if percentage >= 40.0 {
            text.yellow().to_string()
        } else {
            text.red().to_string()
        }
    }
}

/// Render filtered ranking entries in the requested format.
pub fn format_entries(
    format: &OutputFormat,
    entries: &[&RankedResume],
    skipped: &[SkippedFile],
    use_colors: bool,
    detailed: bool,
) -> Result<String> {
    match format {
        OutputFormat::Console => {
            Ok(ConsoleFormatter::new(use_colors, detailed).format_batch(entries, skipped))
        }
        OutputFormat::Json => report::to_json(&report::report_rows(entries)),
        OutputFormat::Csv => report::to_csv(&report::report_rows(entries)),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
