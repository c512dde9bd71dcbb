//! Validation gate and the guarded translation path

use std::sync::Arc;
use tracing::{info, warn};

use crate::core::errors::{Result, TranslationError};
use crate::core::models::ValidationOutcome;
use crate::core::translator::Translator;
use crate::guard::classifier::ProfanityClassifier;

/// Single-rule gate: a candidate passes unless the classifier flags it
#[derive(Clone)]
pub struct ValidationGate {
    classifier: Arc<dyn ProfanityClassifier>,
}

impl ValidationGate {
    pub fn new(classifier: Arc<dyn ProfanityClassifier>) -> Self {
        Self { classifier }
    }

    /// Classify `candidate` once. The text is returned untouched when clean.
    pub async fn validate(&self, candidate: &str) -> Result<ValidationOutcome> {
        let verdicts = self.classifier.predict(&[candidate.to_string()]).await?;

        let verdict = match verdicts.as_slice() {
            [verdict] => *verdict,
            other => {
                return Err(TranslationError::ClassifierError {
                    message: format!("expected 1 verdict, got {}", other.len()),
                })
            }
        };

        if verdict.is_flagged() {
            warn!("Guardrail rejected a translation");
            Ok(ValidationOutcome::Invalid {
                reason: format!("Value '{}' contains profanity language.", candidate),
            })
        } else {
            Ok(ValidationOutcome::Valid {
                text: candidate.to_string(),
            })
        }
    }
}

/// Translator whose output goes through the [`ValidationGate`]
#[derive(Clone)]
pub struct GuardedTranslator {
    translator: Translator,
    gate: ValidationGate,
}

impl GuardedTranslator {
    pub fn new(translator: Translator, gate: ValidationGate) -> Self {
        Self { translator, gate }
    }

    /// Translate and validate, keeping the outcome tagged.
    ///
    /// Translation errors propagate before the gate is reached.
    pub async fn translate_checked(&self, text: &str, target_language: &str) -> Result<ValidationOutcome> {
        let translation = self.translator.translate(text, target_language).await?;
        let outcome = self.gate.validate(&translation).await?;

        info!(
            "Guarded translation to {}: {}",
            target_language,
            if outcome.is_valid() { "passed" } else { "rejected" }
        );

        Ok(outcome)
    }

    /// Translate and validate, folding a rejection into the returned string
    /// (`"Guardrails validation failed: {reason}"`).
    pub async fn translate_guarded(&self, text: &str, target_language: &str) -> Result<String> {
        let outcome = self.translate_checked(text, target_language).await?;
        Ok(outcome.into_message())
    }
}
