//! Skill matching and ATS-friendliness heuristics

use crate::config::{AnalysisConfig, AtsHeuristics};
use crate::error::{Result, ResumeRankerError};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use strsim::jaro_winkler;

/// Standard resume section headers, matched case-insensitively.
pub const SECTION_HEADERS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "education",
    "skills",
    "technical skills",
    "summary",
    "objective",
    "projects",
    "certifications",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillAnalysis {
    /// Skill terms the resume shares with the job description, unique,
    /// ordered by descending frequency in the job description.
    pub key_skills: Vec<String>,
    pub skill_count: usize,
}

/// Matches a skill vocabulary against resume and job-description text
/// and runs the structural ATS-friendliness check.
pub struct SkillMatcher {
    matcher: AhoCorasick,
    vocabulary: Vec<String>,
    fuzzy_threshold: f64,
    ats: AtsHeuristics,
}

impl SkillMatcher {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        let mut vocabulary = Self::builtin_vocabulary();
        vocabulary.extend(config.extra_skills.iter().cloned());
        vocabulary.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
        vocabulary.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&vocabulary)
            .map_err(|e| {
                ResumeRankerError::Processing(format!("Failed to build skill matcher: {}", e))
            })?;

        Ok(Self {
            matcher,
            vocabulary,
            fuzzy_threshold: config.fuzzy_threshold,
            ats: config.ats.clone(),
        })
    }

    /// Candidate skills come from the job description; the result is
    /// their intersection with terms present in the resume, ordered by
    /// descending job-description frequency, ties alphabetical.
    pub fn analyze_skills(&self, resume_text: &str, job_text: &str) -> SkillAnalysis {
        let job_counts = self.term_counts(job_text);

        let mut resume_terms: HashSet<usize> = self.term_counts(resume_text).into_keys().collect();
        resume_terms.extend(self.fuzzy_term_indices(resume_text));

        let mut matched: Vec<(usize, usize)> = job_counts
            .into_iter()
            .filter(|(idx, _)| resume_terms.contains(idx))
            .collect();

        matched.sort_by(|(a_idx, a_count), (b_idx, b_count)| {
            b_count
                .cmp(a_count)
                .then_with(|| self.vocabulary[*a_idx].cmp(&self.vocabulary[*b_idx]))
        });

        let key_skills: Vec<String> = matched
            .into_iter()
            .map(|(idx, _)| self.vocabulary[idx].clone())
            .collect();

        SkillAnalysis {
            skill_count: key_skills.len(),
            key_skills,
        }
    }

    /// Best-effort structural check, not a guarantee of ATS acceptance.
    /// A resume passes only when all three heuristics pass: few
    /// column-layout artifacts, recognizable section headers, and no
    /// overlong unbroken character runs.
    pub fn is_ats_friendly(&self, text: &str) -> bool {
        self.passes_column_check(text)
            && self.has_section_headers(text)
            && self.passes_unbroken_run_check(text)
    }

    /// Whole-word vocabulary matches as pattern index -> count.
    fn term_counts(&self, text: &str) -> HashMap<usize, usize> {
        let mut counts = HashMap::new();

        for mat in self.matcher.find_iter(text) {
            if !is_word_bounded(text, mat.start(), mat.end()) {
                continue;
            }
            *counts.entry(mat.pattern().as_usize()).or_insert(0) += 1;
        }

        counts
    }

    /// Near-miss pickup for misspelled single-word skills.
    fn fuzzy_term_indices(&self, text: &str) -> HashSet<usize> {
        let mut indices = HashSet::new();

        for word in text.split_whitespace() {
            let cleaned: String = word
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '+' || *c == '#')
                .collect();
            if cleaned.chars().count() < 4 {
                continue;
            }
            let cleaned_lower = cleaned.to_lowercase();

            for (idx, skill) in self.vocabulary.iter().enumerate() {
                if skill.contains(' ') || skill.chars().count() < 4 {
                    continue;
                }
                let skill_lower = skill.to_lowercase();
                if cleaned_lower == skill_lower {
                    continue;
                }
                if jaro_winkler(&cleaned_lower, &skill_lower) >= self.fuzzy_threshold {
                    indices.insert(idx);
                }
            }
        }

        indices
    }

    fn passes_column_check(&self, text: &str) -> bool {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            return false;
        }

        let artifact_lines = lines.iter().filter(|l| has_column_artifacts(l)).count();
        let ratio = artifact_lines as f64 / lines.len() as f64;

        ratio <= self.ats.column_line_ratio
    }

    fn has_section_headers(&self, text: &str) -> bool {
        let mut found: HashSet<&str> = HashSet::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.chars().count() > 40 {
                continue;
            }
            let lowered = trimmed.to_lowercase();
            for &header in SECTION_HEADERS {
                if lowered.starts_with(header) {
                    // Collapse variants like "work experience" onto the
                    // last word so one section only counts once.
                    found.insert(header.split_whitespace().last().unwrap_or(header));
                }
            }
        }

        found.len() >= self.ats.min_section_headers
    }

    fn passes_unbroken_run_check(&self, text: &str) -> bool {
        for line in text.lines() {
            let longest_run = line
                .split_whitespace()
                .map(|chunk| chunk.chars().count())
                .max()
                .unwrap_or(0);
            if longest_run > self.ats.max_unbroken_run {
                return false;
            }
        }
        true
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Built-in skill vocabulary in canonical display casing.
    fn builtin_vocabulary() -> Vec<String> {
        [
            // Programming languages
            "Python", "Java", "JavaScript", "TypeScript", "Rust", "C++", "C#", "Go", "Ruby",
            "PHP", "Swift", "Kotlin", "Scala", "Haskell", "MATLAB", "Perl",
            // Web technologies
            "React", "Vue", "Angular", "Svelte", "HTML", "CSS", "Node.js", "Express", "Django",
            "Flask", "Spring", "Rails", "GraphQL", "REST",
            // Infrastructure and cloud
            "Docker", "Kubernetes", "AWS", "Azure", "GCP", "Terraform", "Ansible", "Jenkins",
            "CI/CD", "DevOps", "Microservices", "Linux", "Bash", "Git", "Nginx",
            // Data stores
            "SQL", "PostgreSQL", "MySQL", "MongoDB", "Cassandra", "DynamoDB", "SQLite", "Redis",
            "Elasticsearch", "Oracle", "Snowflake",
            // Data science
            "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Pandas", "NumPy",
            "Spark", "Hadoop", "Kafka", "Airflow", "Tableau", "Power BI", "NLP",
            // Testing
            "Selenium", "Cypress", "JUnit", "Pytest", "TDD",
            // Process and soft skills
            "Agile", "Scrum", "Kanban", "Jira", "Leadership", "Communication", "Teamwork",
            "Mentoring", "Project Management", "Problem Solving", "Stakeholder Management",
            // Roles
            "Developer", "Software Engineer", "Data Scientist", "Data Engineer", "Architect",
            "Full Stack", "Frontend", "Backend", "SRE", "Product Manager",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

fn has_column_artifacts(line: &str) -> bool {
    let interior = line.trim();
    if interior.contains('\t') || interior.contains('|') {
        return true;
    }

    // Runs of 3+ spaces between words suggest a table or multi-column
    // layout flattened during extraction.
    let mut spaces = 0;
    let mut seen_word = false;
    for c in interior.chars() {
        if c == ' ' {
            spaces += 1;
        } else {
            if seen_word && spaces >= 3 {
                return true;
            }
            spaces = 0;
            seen_word = true;
        }
    }
    false
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.is_some_and(|c| c.is_alphanumeric()) && !after.is_some_and(|c| c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn matcher() -> SkillMatcher {
        SkillMatcher::new(&Config::default().analysis).unwrap()
    }

    #[test]
    fn test_skills_intersect_job_and_resume() {
        let matcher = matcher();
        let job = "Seeking Python developer with SQL and AWS experience";
        let resume = "Built services in Python with SQL storage on AWS and Docker";

        let analysis = matcher.analyze_skills(resume, job);

        assert!(analysis.key_skills.contains(&"Python".to_string()));
        assert!(analysis.key_skills.contains(&"SQL".to_string()));
        assert!(analysis.key_skills.contains(&"AWS".to_string()));
        // Docker is in the resume but not the job description
        assert!(!analysis.key_skills.contains(&"Docker".to_string()));
        assert_eq!(analysis.skill_count, analysis.key_skills.len());
    }

    #[test]
    fn test_no_shared_skills_yields_empty_list() {
        let matcher = matcher();
        let job = "Seeking Python developer with SQL and AWS experience";
        let resume = "Expert in Java and Excel reporting";

        let analysis = matcher.analyze_skills(resume, job);

        assert!(analysis.key_skills.is_empty());
        assert_eq!(analysis.skill_count, 0);
    }

    #[test]
    fn test_skills_ordered_by_job_frequency() {
        let matcher = matcher();
        let job = "Python Python Python and SQL. More Python. SQL again. AWS once.";
        let resume = "Python SQL AWS";

        let analysis = matcher.analyze_skills(resume, job);

        assert_eq!(analysis.key_skills, vec!["Python", "SQL", "AWS"]);
    }

    #[test]
    fn test_frequency_ties_break_alphabetically() {
        let matcher = matcher();
        let job = "SQL and AWS and Python, one mention each";
        let resume = "Python SQL AWS";

        let analysis = matcher.analyze_skills(resume, job);

        assert_eq!(analysis.key_skills, vec!["AWS", "Python", "SQL"]);
    }

    #[test]
    fn test_whole_word_matching() {
        let matcher = matcher();
        // "Go" must not match inside "Google", "Java" not inside "JavaScript"
        let job = "Go and Java required";
        let resume = "Worked at Google on JavaScript";

        let analysis = matcher.analyze_skills(resume, job);

        assert!(!analysis.key_skills.contains(&"Go".to_string()));
        assert!(!analysis.key_skills.contains(&"Java".to_string()));
    }

    #[test]
    fn test_fuzzy_match_picks_up_misspelling() {
        let matcher = matcher();
        let job = "Kubernetes experience required";
        let resume = "Deployed workloads on Kubernetess clusters";

        let analysis = matcher.analyze_skills(resume, job);

        assert!(analysis.key_skills.contains(&"Kubernetes".to_string()));
    }

    #[test]
    fn test_ats_friendly_plain_resume() {
        let matcher = matcher();
        let resume = "Jane Smith\n\
            jane@example.com\n\n\
            Summary\n\
            Backend engineer with five years of service development.\n\n\
            Experience\n\
            Acme Corp, Senior Engineer\n\
            Built billing pipelines in Rust.\n\n\
            Education\n\
            BSc Computer Science\n\n\
            Skills\n\
            Rust, SQL, AWS";

        assert!(matcher.is_ats_friendly(resume));
    }

    #[test]
    fn test_ats_unfriendly_dense_table() {
        let matcher = matcher();
        let resume = "Jane Smith | Engineer | 5 years\n\
            Rust | SQL | AWS\n\
            Acme | Senior | 2019-2024\n\
            BSc | Computer Science | 2015";

        assert!(!matcher.is_ats_friendly(resume));
    }

    #[test]
    fn test_ats_unfriendly_long_unbroken_line() {
        let matcher = matcher();
        let blob = "x".repeat(500);
        let resume = format!("Experience\nEducation\nSkills\n{}", blob);

        assert!(!matcher.is_ats_friendly(&resume));
    }

    #[test]
    fn test_ats_requires_section_headers() {
        let matcher = matcher();
        let resume = "Jane Smith\nDid many things at many places.\nKnows Rust and SQL.";

        assert!(!matcher.is_ats_friendly(resume));
    }
}
