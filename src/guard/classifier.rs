//! Profanity classifiers

use async_trait::async_trait;
use regex::Regex;
use rustrict::{CensorStr, Type};
use tracing::debug;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::Verdict;

/// Binary profanity classifier.
///
/// Returns one verdict per submitted string, in the same order.
#[async_trait]
pub trait ProfanityClassifier: Send + Sync {
    async fn predict(&self, texts: &[String]) -> Result<Vec<Verdict>>;
}

/// Severity at which `rustrict` flags a word
const PROFANITY_THRESHOLD: Type = Type::INAPPROPRIATE;

/// Local classifier: `rustrict`'s inappropriate-content filter plus an
/// optional list of extra whole-word terms.
///
/// `rustrict` is applied to each whitespace-separated word on its own, so a
/// match can never span a word boundary ("The assassin" stays clean).
#[derive(Debug, Clone, Default)]
pub struct WordlistClassifier {
    blocked: Option<Regex>,
}

impl WordlistClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also flag any of `terms` (case-insensitive, whole words)
    pub fn with_blocked_terms<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let alternatives: Vec<String> = terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self::default());
        }

        let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
        let blocked = Regex::new(&pattern).map_err(|e| TranslationError::ConfigError {
            message: format!("invalid blocked term list: {}", e),
        })?;

        debug!("Profanity classifier loaded {} extra term(s)", alternatives.len());

        Ok(Self {
            blocked: Some(blocked),
        })
    }

    /// Classify a single string
    pub fn classify(&self, text: &str) -> Verdict {
        if text.split_whitespace().any(|word| word.is(PROFANITY_THRESHOLD)) {
            return Verdict::Flagged;
        }

        match &self.blocked {
            Some(re) if re.is_match(text) => Verdict::Flagged,
            _ => Verdict::Clean,
        }
    }
}

#[async_trait]
impl ProfanityClassifier for WordlistClassifier {
    async fn predict(&self, texts: &[String]) -> Result<Vec<Verdict>> {
        Ok(texts.iter().map(|t| self.classify(t)).collect())
    }
}
