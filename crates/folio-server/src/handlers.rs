//! HTTP Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use folio_core::{ActionTag, Conversation};
use folio_research::{AnalysisResult, NewsItem, ResearchError};

use crate::state::AppState;

const CHAT_FAILURE: &str = "I apologize, but something went wrong. Please try again.";

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub provider_configured: bool,
    pub provider_reachable: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Conversation,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatErrorResponse {
    pub error: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub coin: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewsFeedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "Data")]
    pub data: Vec<NewsItem>,
}

type ApiError<T> = (StatusCode, Json<T>);

fn chat_failure() -> ApiError<ChatErrorResponse> {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ChatErrorResponse {
            error: "Internal Server Error".into(),
            content: CHAT_FAILURE.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider_configured = state.provider.is_configured();
    let provider_reachable =
        provider_configured && state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.name().to_string(),
        provider_configured,
        provider_reachable,
    })
}

/// Chat assistant endpoint
///
/// Model failures come back as an apology with 200; only a request that
/// cannot be read at all is a 500.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError<ChatErrorResponse>> {
    let Json(request) = payload.map_err(|e| {
        tracing::error!("Chat API error: {}", e);
        chat_failure()
    })?;

    let action = ActionTag::from_tag(request.action.as_deref());
    if let Some(last) = request.messages.last() {
        tracing::info!(%action, messages = request.messages.len(), "User prompt: {}", last.content);
    }

    let content = state
        .responder
        .respond(&request.messages, action)
        .await
        .map_err(|e| {
            tracing::error!("Chat API error: {}", e);
            chat_failure()
        })?;

    Ok(Json(ChatResponse { content }))
}

/// Crypto research endpoint
pub async fn crypto_analysis(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError<ErrorResponse>> {
    let Json(request) = payload.map_err(|e| {
        tracing::error!("Analysis error: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Failed to analyze cryptocurrency")),
        )
    })?;

    let result = state.researcher.analyze(&request.coin).await.map_err(|e| {
        tracing::error!(coin = %request.coin, "Analysis error: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.user_message())),
        )
    })?;

    Ok(Json(result))
}

/// Diagnostic: newest headlines across every configured feed
pub async fn news_feed(State(state): State<AppState>) -> Response {
    let news = state.news.clone();
    let headlines = match tokio::spawn(async move { news.headlines().await }).await {
        Ok(headlines) => headlines,
        Err(e) => {
            tracing::error!("News feed error: {}", e);
            let body = ErrorResponse {
                error: "Failed to fetch news".into(),
                details: Some(e.to_string()),
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };

    if headlines.is_empty() {
        let body = NewsFeedResponse {
            error: Some(ResearchError::NoNews.user_message()),
            data: Vec::new(),
        };
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }

    Json(NewsFeedResponse {
        error: None,
        data: headlines,
    })
    .into_response()
}
