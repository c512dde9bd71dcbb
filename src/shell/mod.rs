//! Presentation shell: turns one user action into status panels
//!
//! The shell owns no UI. The web server and the CLI both call
//! [`TranslationShell::run`] and render the returned [`ShellReport`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::core::client::{GeminiClient, GenerativeModel};
use crate::core::config::TranslatorConfig;
use crate::core::errors::Result;
use crate::core::models::{TranslationRequest, ValidationOutcome};
use crate::core::translator::Translator;
use crate::guard::classifier::{ProfanityClassifier, WordlistClassifier};
use crate::guard::gate::{GuardedTranslator, ValidationGate};

/// Panel style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Info,
    Warning,
    Success,
    Error,
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelKind::Info => write!(f, "info"),
            PanelKind::Warning => write!(f, "warning"),
            PanelKind::Success => write!(f, "success"),
            PanelKind::Error => write!(f, "error"),
        }
    }
}

/// One status message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Panel {
    pub kind: PanelKind,
    pub message: String,
    /// Set on the guarded success panel when the guardrail rejected the translation
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rejected: bool,
}

impl Panel {
    fn new(kind: PanelKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            rejected: false,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(PanelKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(PanelKind::Warning, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(PanelKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(PanelKind::Error, message)
    }
}

/// Everything rendered for one user action; empty when the input was blank
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShellReport {
    pub panels: Vec<Panel>,
}

impl ShellReport {
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// Runs the unguarded and guarded translations for one user action
#[derive(Clone)]
pub struct TranslationShell {
    translator: Translator,
    guarded: GuardedTranslator,
    concurrent: bool,
}

impl TranslationShell {
    pub fn new(translator: Translator, guarded: GuardedTranslator) -> Self {
        Self {
            translator,
            guarded,
            concurrent: false,
        }
    }

    /// Wire a shell from a model and a classifier
    pub fn with_collaborators(
        model: Arc<dyn GenerativeModel>,
        classifier: Arc<dyn ProfanityClassifier>,
    ) -> Self {
        let translator = Translator::new(model);
        let guarded = GuardedTranslator::new(translator.clone(), ValidationGate::new(classifier));
        Self::new(translator, guarded)
    }

    /// Gemini model plus the local word-list classifier, both from `config`
    pub fn from_config(config: TranslatorConfig) -> Result<Self> {
        let concurrent = config.concurrent_calls;
        let classifier = WordlistClassifier::with_blocked_terms(config.blocked_terms.as_slice())?;
        let model = GeminiClient::new(config)?;

        Ok(Self::with_collaborators(Arc::new(model), Arc::new(classifier)).concurrent(concurrent))
    }

    /// Run the two translations concurrently instead of one after the other
    pub fn concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    pub fn model_name(&self) -> &str {
        self.translator.model_name()
    }

    /// Handle one "Translate" action.
    ///
    /// Blank text is a no-op: no collaborator is called and the report is empty.
    pub async fn run(&self, text: &str, target_language: &str) -> ShellReport {
        let request = match TranslationRequest::new(text, target_language) {
            Ok(request) => request,
            Err(e) => {
                debug!("Ignoring input: {}", e);
                return ShellReport::default();
            }
        };

        info!("Translating input to {}", request.target_language);

        let (plain, guarded) = if self.concurrent {
            tokio::join!(
                self.translator.translate_request(&request),
                self.guarded
                    .translate_checked(&request.source_text, &request.target_language)
            )
        } else {
            let plain = self.translator.translate_request(&request).await;
            let guarded = self
                .guarded
                .translate_checked(&request.source_text, &request.target_language)
                .await;
            (plain, guarded)
        };

        let mut panels = vec![
            Panel::info(format!("Original Text: {}", text)),
            Panel::warning("Translation Without Guardrails"),
        ];

        panels.push(match plain {
            Ok(result) => {
                debug!("Unguarded translation by {}", result.model_used);
                Panel::success(format!("Without Guardrails: {}", result.text))
            }
            Err(e) => {
                warn!("Unguarded translation failed: {}", e);
                Panel::error(format!("Translation failed (without Guardrails): {}", e))
            }
        });

        panels.push(Panel::warning("Translation With Guardrails"));

        panels.push(match guarded {
            Ok(outcome) => {
                let rejected = matches!(outcome, ValidationOutcome::Invalid { .. });
                let mut panel = Panel::success(format!("With Guardrails: {}", outcome.into_message()));
                panel.rejected = rejected;
                panel
            }
            Err(e) => {
                warn!("Guarded translation failed: {}", e);
                Panel::error(format!("Translation failed (with Guardrails): {}", e))
            }
        });

        ShellReport { panels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::translator::tests::StubModel;
    use crate::guard::gate::tests::StubClassifier;

    fn shell(model: &Arc<StubModel>, classifier: &Arc<StubClassifier>) -> TranslationShell {
        TranslationShell::with_collaborators(model.clone(), classifier.clone())
    }

    #[tokio::test]
    async fn test_blank_input_is_noop() {
        let model = StubModel::replying("Hola");
        let classifier = StubClassifier::clean();
        let shell = shell(&model, &classifier);

        for text in ["", "   ", "\n\t "] {
            let report = shell.run(text, "es").await;
            assert!(report.is_empty());
        }

        assert_eq!(model.call_count(), 0);
        assert_eq!(classifier.call_count(), 0);
    }

    #[tokio::test]
    async fn test_clean_translation_panels() {
        let model = StubModel::replying(" Hola ");
        let classifier = StubClassifier::clean();
        let report = shell(&model, &classifier).run("Hello", "es").await;

        assert_eq!(
            report.panels,
            vec![
                Panel::info("Original Text: Hello"),
                Panel::warning("Translation Without Guardrails"),
                Panel::success("Without Guardrails: Hola"),
                Panel::warning("Translation With Guardrails"),
                Panel::success("With Guardrails: Hola"),
            ]
        );
        // one call per path, never shared
        assert_eq!(model.call_count(), 2);
        assert_eq!(classifier.call_count(), 1);
    }

    #[tokio::test]
    async fn test_both_paths_send_the_text_as_typed() {
        let model = StubModel::replying("Hola");
        let classifier = StubClassifier::clean();
        shell(&model, &classifier).run("  Hello \n", "es").await;

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        for contents in prompts.iter() {
            assert_eq!(contents.len(), 1);
            assert_eq!(
                contents[0].text,
                "Translate the following text to es:   Hello \n"
            );
        }
    }

    #[tokio::test]
    async fn test_rejected_translation_panel() {
        let model = StubModel::replying("Hola");
        let classifier = StubClassifier::flagging();
        let report = shell(&model, &classifier).run("Hello", "es").await;

        let last = report.panels.last().unwrap();
        assert_eq!(last.kind, PanelKind::Success);
        assert!(last.rejected);
        assert_eq!(
            last.message,
            "With Guardrails: Guardrails validation failed: Value 'Hola' contains profanity language."
        );
        assert!(!report.panels[2].rejected);
    }

    #[tokio::test]
    async fn test_service_error_panels() {
        let model = StubModel::failing();
        let classifier = StubClassifier::flagging();
        let report = shell(&model, &classifier).run("Hello", "es").await;

        assert_eq!(report.panels.len(), 5);
        assert_eq!(report.panels[2].kind, PanelKind::Error);
        assert_eq!(
            report.panels[2].message,
            "Translation failed (without Guardrails): API error: 503 - model unavailable"
        );
        assert_eq!(report.panels[4].kind, PanelKind::Error);
        assert_eq!(
            report.panels[4].message,
            "Translation failed (with Guardrails): API error: 503 - model unavailable"
        );
        assert_eq!(classifier.call_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_mode_keeps_panel_order() {
        let model = StubModel::replying("Hola");
        let classifier = StubClassifier::clean();
        let report = shell(&model, &classifier)
            .concurrent(true)
            .run("Hello", "es")
            .await;

        let kinds: Vec<PanelKind> = report.panels.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PanelKind::Info,
                PanelKind::Warning,
                PanelKind::Success,
                PanelKind::Warning,
                PanelKind::Success,
            ]
        );
        assert_eq!(model.call_count(), 2);
    }

    #[test]
    fn test_report_serialization_omits_clear_flag() {
        let report = ShellReport {
            panels: vec![Panel::success("With Guardrails: Hola")],
        };
        assert_json_diff::assert_json_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({"panels": [{"kind": "success", "message": "With Guardrails: Hola"}]})
        );
    }
}
