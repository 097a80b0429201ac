//! Error Types

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Assistant error types
#[derive(Error, Debug)]
pub enum AssistantError {
    /// LLM provider returned an error payload
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider answered but produced no text
    #[error("Empty response from model")]
    EmptyResponse,

    /// Caller supplied an unusable request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited by the upstream service
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed (missing or rejected API key)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AssistantError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            Self::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            Self::EmptyResponse => "The AI service returned an empty answer.".into(),
            Self::InvalidRequest(msg) => format!("Invalid request: {msg}"),
            Self::RateLimited(_) => "You've made too many requests. Please wait a moment.".into(),
            Self::Auth(_) => "Authentication failed. Please check your credentials.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}
