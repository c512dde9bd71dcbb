//! Single-turn translation through a generative model

use std::sync::Arc;
use tracing::{debug, info};

use crate::core::client::{start_chat, GenerativeModel};
use crate::core::errors::Result;
use crate::core::models::{TranslationRequest, TranslationResult};

/// Translates text by asking the model in a fresh chat per call
#[derive(Clone)]
pub struct Translator {
    model: Arc<dyn GenerativeModel>,
}

impl Translator {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Instruction sent to the model
    pub fn build_prompt(text: &str, target_language: &str) -> String {
        format!("Translate the following text to {}: {}", target_language, text)
    }

    /// Translate `text` into `target_language`, returning the trimmed completion.
    ///
    /// The caller guarantees `text` is not blank; model errors propagate as-is.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let prompt = Self::build_prompt(text, target_language);

        let mut session = start_chat(self.model.clone());
        let reply = session.send_message(&prompt).await?;
        let translation = reply.trim().to_string();

        debug!("Translation to {}: {}", target_language, translation);

        Ok(translation)
    }

    /// Typed variant of [`Translator::translate`]
    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        info!(
            "Translating {} chars to {} with {}",
            request.source_text.chars().count(),
            request.target_language,
            self.model.model_name()
        );

        let text = self
            .translate(&request.source_text, &request.target_language)
            .await?;

        Ok(TranslationResult {
            text,
            model_used: self.model.model_name().to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }
}
