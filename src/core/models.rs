//! Core data models for translation and validation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::errors::{Result, TranslationError};

/// Prefix of the message returned when a guarded translation is rejected
pub const VALIDATION_FAILED_PREFIX: &str = "Guardrails validation failed: ";

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub source_text: String,
    pub target_language: String,
}

impl TranslationRequest {
    /// Build a request, rejecting text that is blank after trimming.
    ///
    /// The text is kept as typed; only the emptiness check trims it.
    pub fn new(source_text: impl Into<String>, target_language: impl Into<String>) -> Result<Self> {
        let source_text = source_text.into();
        if is_blank(&source_text) {
            return Err(TranslationError::EmptyInput);
        }

        Ok(Self {
            source_text,
            target_language: target_language.into(),
        })
    }
}

/// True when nothing but whitespace is left after trimming
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Translation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
    pub model_used: String,
}

/// Binary verdict of the profanity classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Clean,
    Flagged,
}

impl Verdict {
    pub fn is_flagged(self) -> bool {
        self == Verdict::Flagged
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Clean => write!(f, "clean"),
            Verdict::Flagged => write!(f, "flagged"),
        }
    }
}

/// Result of running a candidate translation through the validation gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid { text: String },
    Invalid { reason: String },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid { .. })
    }

    /// Collapse into the single display string used by the guarded path
    pub fn into_message(self) -> String {
        match self {
            ValidationOutcome::Valid { text } => text,
            ValidationOutcome::Invalid { reason } => format!("{}{}", VALIDATION_FAILED_PREFIX, reason),
        }
    }
}
