//! ATS-optimized resume rewriting and template generation

use crate::processing::ats_matcher::SECTION_HEADERS;
use std::collections::BTreeMap;

/// Canonical section order for the rewritten resume.
const SECTION_ORDER: &[&str] = &["Contact", "Summary", "Skills", "Experience", "Education"];

/// Restructure a resume into a fixed, single-column section layout and
/// inject the matched key skills into the Skills section when the
/// resume does not already mention them.
///
/// This is a text transformation, not an authoritative rewrite: lines
/// are reordered and their whitespace normalized, and the only added
/// text is skill terms taken verbatim from the job description. No
/// experience is fabricated.
pub fn generate_ats_resume(resume_text: &str, job_text: &str, key_skills: &[String]) -> String {
    let sections = split_sections(resume_text);

    let mut output = String::new();

    for section in SECTION_ORDER {
        let body = sections.get(*section).map(|lines| lines.as_slice());

        if *section == "Skills" {
            let skills_block = build_skills_section(body, resume_text, job_text, key_skills);
            if !skills_block.is_empty() {
                push_section(&mut output, "Skills", &skills_block);
            }
            continue;
        }

        if let Some(lines) = body {
            if !lines.is_empty() {
                push_section(&mut output, section, lines);
            }
        }
    }

    // Anything that did not map onto a canonical section is appended
    // under its original header, lines in their original order.
    for (name, lines) in &sections {
        if SECTION_ORDER.contains(&name.as_str()) || lines.is_empty() {
            continue;
        }
        push_section(&mut output, name, lines);
    }

    output.trim_end().to_string()
}

/// A static, well-known blank ATS-style template.
pub fn create_template() -> &'static str {
    "\
Contact
-------
Full Name
City, State
email@example.com | (000) 000-0000

Summary
-------
Two or three sentences describing your experience and goals.

Skills
------
Skill one, Skill two, Skill three

Experience
----------
Job Title - Company Name (Start - End)
- Achievement or responsibility
- Achievement or responsibility

Job Title - Company Name (Start - End)
- Achievement or responsibility

Education
---------
Degree - Institution (Year)
"
}

/// Split the resume into named sections by header detection. Content
/// before the first recognized header lands in Contact.
fn split_sections(text: &str) -> BTreeMap<String, Vec<String>> {
    let mut sections: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut current = "Contact".to_string();

    for line in text.lines() {
        let cleaned = normalize_line(line);
        if cleaned.is_empty() {
            continue;
        }

        if let Some(section) = canonical_section(&cleaned) {
            current = section;
            sections.entry(current.clone()).or_default();
            continue;
        }

        sections.entry(current.clone()).or_default().push(cleaned);
    }

    sections
}

/// Map a header-looking line onto its canonical section name.
fn canonical_section(line: &str) -> Option<String> {
    if line.chars().count() > 40 {
        return None;
    }
    let lowered = line.trim_end_matches(':').trim().to_lowercase();

    for header in SECTION_HEADERS {
        if lowered == *header {
            return Some(match lowered.split_whitespace().last() {
                Some("experience") => "Experience".to_string(),
                Some("education") => "Education".to_string(),
                Some("skills") => "Skills".to_string(),
                Some("summary") | Some("objective") => "Summary".to_string(),
                _ => title_case(&lowered),
            });
        }
    }
    None
}

fn build_skills_section(
    existing: Option<&[String]>,
    resume_text: &str,
    job_text: &str,
    key_skills: &[String],
) -> Vec<String> {
    let mut lines: Vec<String> = existing.map(|l| l.to_vec()).unwrap_or_default();

    let resume_lower = resume_text.to_lowercase();
    let job_lower = job_text.to_lowercase();

    let missing: Vec<&str> = key_skills
        .iter()
        .map(|s| s.as_str())
        // Only inject terms the job description actually asks for and
        // the resume does not already mention.
        .filter(|skill| job_lower.contains(&skill.to_lowercase()))
        .filter(|skill| !resume_lower.contains(&skill.to_lowercase()))
        .collect();

    if !missing.is_empty() {
        lines.push(missing.join(", "));
    }

    lines
}

fn push_section(output: &mut String, header: &str, lines: &[String]) {
    output.push_str(header);
    output.push('\n');
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
    output.push('\n');
}

/// Collapse tabs, pipes, and interior space runs that the ATS check
/// flags as column artifacts.
fn normalize_line(line: &str) -> String {
    line.replace(['\t', '|'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
Jane Smith
jane@example.com

Summary:
Backend engineer focused on data platforms.

Experience
Acme Corp, Senior Engineer
Built billing pipelines.

Education
BSc Computer Science

Skills
Rust, SQL";

    #[test]
    fn test_sections_emitted_in_fixed_order() {
        let result = generate_ats_resume(RESUME, "Rust and SQL role", &[]);

        let contact = result.find("Contact").unwrap();
        let summary = result.find("Summary").unwrap();
        let skills = result.find("Skills").unwrap();
        let experience = result.find("Experience").unwrap();
        let education = result.find("Education").unwrap();

        assert!(contact < summary);
        assert!(summary < skills);
        assert!(skills < experience);
        assert!(experience < education);
    }

    #[test]
    fn test_original_content_preserved() {
        let result = generate_ats_resume(RESUME, "Rust and SQL role", &[]);

        assert!(result.contains("Jane Smith"));
        assert!(result.contains("jane@example.com"));
        assert!(result.contains("Built billing pipelines."));
        assert!(result.contains("BSc Computer Science"));
        assert!(result.contains("Rust, SQL"));
    }

    #[test]
    fn test_missing_key_skills_injected_verbatim() {
        let job = "Rust, SQL and AWS experience required";
        let skills = vec!["Rust".to_string(), "SQL".to_string(), "AWS".to_string()];

        let result = generate_ats_resume(RESUME, job, &skills);

        // Rust and SQL are already present; only AWS gets injected.
        assert!(result.contains("AWS"));
        assert_eq!(result.matches("Rust, SQL").count(), 1);
    }

    #[test]
    fn test_column_artifacts_stripped() {
        let tabular = "Jane Smith\tEngineer\nSkills\nRust | SQL |   AWS";

        let result = generate_ats_resume(tabular, "", &[]);

        assert!(!result.contains('\t'));
        assert!(!result.contains('|'));
        assert!(!result.contains("  "));
    }

    #[test]
    fn test_unrecognized_sections_are_kept() {
        let resume = "Projects\nRanking engine in Rust";

        let result = generate_ats_resume(resume, "", &[]);

        assert!(result.contains("Projects"));
        assert!(result.contains("Ranking engine in Rust"));
    }

    #[test]
    fn test_template_has_fixed_section_order() {
        let template = create_template();

        for section in SECTION_ORDER {
            assert!(template.contains(section), "missing section {}", section);
        }
    }
}
