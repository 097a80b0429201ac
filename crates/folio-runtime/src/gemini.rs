//! Gemini LLM Provider
//!
//! Implementation of `LlmProvider` for Google's hosted `generateContent`
//! REST endpoint.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::{
    error::{AssistantError, Result},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Gemini provider configuration
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API key; empty means every call will be rejected upstream
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// API root, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-pro".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            timeout_secs: 120,
        }
    }
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = std::env::var("GOOGLE_API_KEY").unwrap_or_default();
        let model = std::env::var("GEMINI_MODEL").unwrap_or(defaults.model);
        let base_url = std::env::var("GEMINI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let timeout_secs = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            api_key,
            model,
            base_url,
            timeout_secs,
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

// ============================================================================
// Provider
// ============================================================================

/// Gemini LLM provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create from configuration
    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AssistantError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(GeminiConfig::from_env())
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.config.base_url, self.config.model)
    }

    fn build_request<'a>(prompt: &'a str, opts: &GenerationOptions) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: opts.temperature,
                top_p: opts.top_p,
                top_k: opts.top_k,
                max_output_tokens: opts.max_tokens,
            },
        }
    }

    /// Convert a Gemini response to a completion; text of the first
    /// candidate's parts is concatenated.
    fn convert_completion(response: GenerateResponse, model: &str) -> Completion {
        let candidate = response.candidates.into_iter().next();

        let finish_reason = candidate
            .as_ref()
            .and_then(|c| c.finish_reason.as_deref())
            .map(|reason| match reason {
                "STOP" => FinishReason::Stop,
                "MAX_TOKENS" => FinishReason::Length,
                "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => {
                    FinishReason::ContentFilter
                }
                _ => FinishReason::Other,
            });

        let content = candidate
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        Completion {
            content,
            model: response.model_version.unwrap_or_else(|| model.to_string()),
            usage: response.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            finish_reason,
        }
    }

    /// Map a non-success HTTP status and body to an error
    fn status_error(status: StatusCode, body: &str) -> AssistantError {
        let detail = serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
            |_| body.trim().to_string(),
            |env| format!("{} {}", env.error.status, env.error.message).trim().to_string(),
        );

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AssistantError::Auth(detail),
            StatusCode::TOO_MANY_REQUESTS => AssistantError::RateLimited(detail),
            s if s.is_server_error() => AssistantError::ProviderUnavailable(format!("{s}: {detail}")),
            s => AssistantError::Provider(format!("{s}: {detail}")),
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.model_url())
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => Ok(true),
            Ok(r) => {
                tracing::warn!("Gemini health check failed: {}", r.status());
                Ok(false)
            }
            Err(e) => {
                tracing::warn!("Gemini health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion> {
        let url = format!("{}:generateContent", self.model_url());
        let request = Self::build_request(prompt, options);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AssistantError::ProviderUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        let completion = Self::convert_completion(parsed, &self.config.model);

        tracing::debug!(
            model = %completion.model,
            finish_reason = ?completion.finish_reason,
            chars = completion.content.len(),
            "Gemini completion received"
        );

        Ok(completion)
    }
}
