//! LLM Provider Strategy Pattern
//!
//! Common interface for hosted generative-text services. Every call is a
//! single stateless prompt: conversation history, if any, is flattened into
//! the prompt text by the caller.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_core::provider::{GenerationOptions, LlmProvider};
//!
//! let provider = GeminiProvider::from_env()?;
//! let completion = provider.complete(&prompt, &GenerationOptions::chat()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sampling parameters for one generation call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Top-k sampling
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

const fn default_temperature() -> f32 { 0.7 }
const fn default_top_p() -> f32 { 1.0 }
const fn default_top_k() -> u32 { 1 }
const fn default_max_tokens() -> u32 { 2048 }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl GenerationOptions {
    /// Options for chat replies
    pub fn chat() -> Self {
        Self::default()
    }

    /// Options for analyst reports
    pub fn analyst() -> Self {
        Self {
            max_tokens: 1000,
            ..Self::default()
        }
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

impl Completion {
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: None,
            finish_reason: Some(FinishReason::Stop),
        }
    }

    /// True when the model produced no usable text
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Token usage statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other,
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs and health output
    fn name(&self) -> &str;

    /// Whether credentials are present; an unconfigured provider still
    /// accepts calls but they fail at the transport layer.
    fn is_configured(&self) -> bool {
        true
    }

    /// Check if the provider is reachable and accepts our credentials
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion for a single prompt
    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion>;
}
