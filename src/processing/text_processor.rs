//! Text preprocessing and normalization

use crate::config::PreprocessingConfig;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Normalizes raw text into the canonical form used for comparison.
///
/// Preprocessing is pure and total: any input string maps to a string,
/// the empty string maps to the empty string, and the same input always
/// yields the same output for a fixed configuration.
#[derive(Debug, Clone)]
pub struct TextPreprocessor {
    stop_words: HashSet<&'static str>,
    stemming: bool,
    min_token_len: usize,
}

impl Default for TextPreprocessor {
    fn default() -> Self {
        Self::new(&PreprocessingConfig {
            stemming: false,
            min_token_len: 2,
        })
    }
}

impl TextPreprocessor {
    pub fn new(config: &PreprocessingConfig) -> Self {
        Self {
            stop_words: Self::stop_words(),
            stemming: config.stemming,
            min_token_len: config.min_token_len,
        }
    }

    /// Lower-case, strip punctuation, collapse whitespace, drop stop
    /// words, and optionally stem. Token order is preserved.
    pub fn preprocess(&self, text: &str) -> String {
        let mut tokens = Vec::new();

        for word in text.unicode_words() {
            let token = word.to_lowercase();

            if token.chars().count() < self.min_token_len {
                continue;
            }
            if self.stop_words.contains(token.as_str()) {
                continue;
            }
            if !token.chars().any(|c| c.is_alphanumeric()) {
                continue;
            }

            if self.stemming {
                tokens.push(Self::stem(&token));
            } else {
                tokens.push(token);
            }
        }

        tokens.join(" ")
    }

    /// Suffix-stripping stemmer with a fixed rule list. Rules are tried
    /// in order; a rule only applies when at least three characters
    /// remain.
    fn stem(token: &str) -> String {
        const RULES: &[(&str, &str)] = &[
            ("ization", "ize"),
            ("fulness", "ful"),
            ("ations", "ate"),
            ("ing", ""),
            ("edly", ""),
            ("ies", "y"),
            ("ed", ""),
            ("ly", ""),
            ("s", ""),
        ];

        for (suffix, replacement) in RULES {
            if let Some(stem) = token.strip_suffix(suffix) {
                if stem.chars().count() >= 3 {
                    return format!("{}{}", stem, replacement);
                }
            }
        }

        token.to_string()
    }

    fn stop_words() -> HashSet<&'static str> {
        [
            "a", "about", "above", "after", "again", "all", "an", "and", "any", "are", "as", "at",
            "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
            "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
            "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his",
            "how", "if", "in", "into", "is", "it", "its", "just", "more", "most", "my", "no",
            "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "out",
            "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
            "their", "them", "then", "there", "these", "they", "this", "those", "through", "to",
            "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
            "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
            "yours",
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_is_deterministic() {
        let preprocessor = TextPreprocessor::default();
        let text = "Seeking a Senior Rust Developer with SQL and AWS experience!";

        let first = preprocessor.preprocess(text);
        let second = preprocessor.preprocess(text);

        assert_eq!(first, second);
    }

    #[test]
    fn test_preprocess_normalizes_case_and_punctuation() {
        let preprocessor = TextPreprocessor::default();

        let result = preprocessor.preprocess("Python,  SQL;   AWS!!!");

        assert_eq!(result, "python sql aws");
    }

    #[test]
    fn test_preprocess_empty_input() {
        let preprocessor = TextPreprocessor::default();

        assert_eq!(preprocessor.preprocess(""), "");
        assert_eq!(preprocessor.preprocess("   \n\t  "), "");
    }

    #[test]
    fn test_preprocess_removes_stop_words() {
        let preprocessor = TextPreprocessor::default();

        let result = preprocessor.preprocess("experience with the cloud and databases");

        assert_eq!(result, "experience cloud databases");
    }

    #[test]
    fn test_preprocess_drops_short_tokens() {
        let preprocessor = TextPreprocessor::default();

        let result = preprocessor.preprocess("C is x y developer");

        assert_eq!(result, "developer");
    }

    #[test]
    fn test_stemming_when_enabled() {
        let preprocessor = TextPreprocessor::new(&PreprocessingConfig {
            stemming: true,
            min_token_len: 2,
        });

        let result = preprocessor.preprocess("developing databases quickly");

        assert_eq!(result, "develop database quick");
    }
}
