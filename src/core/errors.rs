//! Custom error types for translation and validation

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Retry after {retry_after:?} seconds")]
    RateLimitError {
        retry_after: Option<u64>,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Profanity classifier failed or answered out of contract
    #[error("Classifier error: {message}")]
    ClassifierError {
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Source text was blank after trimming
    #[error("No text to translate")]
    EmptyInput,

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl TranslationError {
    /// Whether the error came from one of the remote collaborators
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            TranslationError::ApiError { .. }
                | TranslationError::RateLimitError { .. }
                | TranslationError::NetworkError { .. }
                | TranslationError::InvalidResponseError { .. }
                | TranslationError::TimeoutError
                | TranslationError::ClassifierError { .. }
                | TranslationError::HttpError(_)
        )
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
