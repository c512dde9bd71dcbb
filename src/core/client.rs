//! Generative model client: the model trait, chat sessions and the Gemini REST client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};

/// Speaker of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One message of a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A hosted generative language model.
///
/// Implementations receive the whole conversation (prior turns plus the new
/// user turn last) and return the completion text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier sent to the service
    fn model_name(&self) -> &str;

    /// Produce one completion for the conversation
    async fn generate(&self, contents: &[ChatTurn]) -> Result<String>;
}

/// Conversation with a model; starts with the history it is given.
pub struct ChatSession {
    model: Arc<dyn GenerativeModel>,
    history: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(model: Arc<dyn GenerativeModel>, history: Vec<ChatTurn>) -> Self {
        Self { model, history }
    }

    /// Send a user message and record both sides of the exchange
    pub async fn send_message(&mut self, message: &str) -> Result<String> {
        let mut contents = self.history.clone();
        contents.push(ChatTurn::user(message));

        let reply = self.model.generate(&contents).await?;

        contents.push(ChatTurn::model(reply.clone()));
        self.history = contents;

        Ok(reply)
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }
}

/// Start a session with no prior turns
pub fn start_chat(model: Arc<dyn GenerativeModel>) -> ChatSession {
    ChatSession::new(model, Vec::new())
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: Role,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Gemini `generateContent` REST client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: Arc<TranslatorConfig>,
}

impl GeminiClient {
    /// Create a new client
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate().map_err(|e| TranslationError::ConfigError {
            message: e.to_string(),
        })?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = TranslatorConfig::from_env().map_err(|e| TranslationError::ConfigError {
            message: e.to_string(),
        })?;
        Self::new(config)
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send actual HTTP request
    async fn send_request(&self, contents: &[ChatTurn]) -> Result<String> {
        let body = GenerateContentRequest {
            contents: contents
                .iter()
                .map(|turn| Content {
                    role: turn.role,
                    parts: vec![Part { text: &turn.text }],
                })
                .collect(),
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::TimeoutError
                } else {
                    TranslationError::NetworkError {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let parsed: GenerateContentResponse = response
                .json()
                .await
                .map_err(|e| TranslationError::InvalidResponseError {
                    message: e.to_string(),
                })?;

            extract_text(parsed)
        } else {
            let status_code = status.as_u16();
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let error_text = response.text().await.unwrap_or_default();

            if status_code == 429 {
                return Err(TranslationError::RateLimitError { retry_after });
            }

            Err(TranslationError::ApiError {
                status: status_code,
                message: error_text,
            })
        }
    }
}

/// Pull the completion text out of a `generateContent` response
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let candidate = match response.candidates.into_iter().next() {
        Some(candidate) => candidate,
        None => {
            let message = match response.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => format!("Prompt blocked: {}", reason),
                None => "No candidates in response".to_string(),
            };
            return Err(TranslationError::InvalidResponseError { message });
        }
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(TranslationError::InvalidResponseError {
            message: "No text in response".to_string(),
        });
    }

    Ok(text)
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, contents: &[ChatTurn]) -> Result<String> {
        debug!("Sending {} turn(s) to {}", contents.len(), self.config.model);

        let result = self.send_request(contents).await;
        if let Err(e) = &result {
            warn!("Model {} request failed: {}", self.config.model, e);
        }
        result
    }
}
