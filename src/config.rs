//! Configuration management for the resume ranker

use crate::error::{Result, ResumeRankerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub preprocessing: PreprocessingConfig,
    pub analysis: AnalysisConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessingConfig {
    /// Apply the suffix-stripping stemmer after stop-word removal.
    pub stemming: bool,
    /// Tokens shorter than this are dropped during preprocessing.
    pub min_token_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Extra skill terms merged into the built-in vocabulary.
    pub extra_skills: Vec<String>,
    /// Jaro-Winkler similarity needed for a fuzzy skill match.
    pub fuzzy_threshold: f64,
    pub ats: AtsHeuristics,
}

/// Thresholds for the ATS-friendliness check. These are best-effort
/// heuristics, not a guarantee that any particular ATS parses a resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsHeuristics {
    /// Maximum fraction of non-empty lines that may carry column
    /// artifacts (tabs, pipes, runs of 3+ interior spaces).
    pub column_line_ratio: f64,
    /// Minimum number of distinct standard section headers.
    pub min_section_headers: usize,
    /// Longest allowed run of characters without whitespace in a line.
    pub max_unbroken_run: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Number of resumes scored concurrently within one batch.
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preprocessing: PreprocessingConfig {
                stemming: false,
                min_token_len: 2,
            },
            analysis: AnalysisConfig {
                extra_skills: Vec::new(),
                fuzzy_threshold: 0.92,
                ats: AtsHeuristics {
                    column_line_ratio: 0.25,
                    min_section_headers: 2,
                    max_unbroken_run: 120,
                },
            },
            scoring: ScoringConfig { workers: 4 },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the configuration, writing defaults on first run.
    pub fn load(path_override: Option<&Path>) -> Result<Self> {
        let config_path = match path_override {
            Some(path) => path.to_path_buf(),
            None => Self::config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ResumeRankerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else if path_override.is_some() {
            Err(ResumeRankerError::Configuration(format!(
                "Config file not found: {}",
                config_path.display()
            )))
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.scoring.workers, config.scoring.workers);
        assert_eq!(parsed.preprocessing.stemming, config.preprocessing.stemming);
        assert_eq!(parsed.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_default_thresholds() {
        let config = Config::default();

        assert!(config.analysis.fuzzy_threshold > 0.5);
        assert!(config.analysis.ats.column_line_ratio < 1.0);
        assert!(config.analysis.ats.min_section_headers >= 1);
    }
}
