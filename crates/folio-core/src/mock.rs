//! Scripted Provider
//!
//! In-process `LlmProvider` for tests and offline demos. Records every
//! prompt it receives and answers from a list of canned replies.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AssistantError, Result};
use crate::provider::{Completion, GenerationOptions, LlmProvider};

type Responder = dyn Fn(&str) -> Result<String> + Send + Sync;

/// Provider whose answers are computed from the prompt
pub struct ScriptedProvider {
    respond: Box<Responder>,
    calls: Mutex<Vec<(String, GenerationOptions)>>,
}

impl ScriptedProvider {
    /// Answer every prompt through `respond`
    pub fn new(respond: impl Fn(&str) -> Result<String> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the same text
    pub fn constant(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self::new(move |_| Ok(reply.clone()))
    }

    /// Always fail as if the service were down
    pub fn unavailable() -> Self {
        Self::new(|_| Err(AssistantError::ProviderUnavailable("scripted outage".into())))
    }

    /// Prompts received so far, in call order
    pub async fn prompts(&self) -> Vec<String> {
        self.calls.lock().await.iter().map(|(p, _)| p.clone()).collect()
    }

    /// Prompts together with the options they were sent with
    pub async fn calls(&self) -> Vec<(String, GenerationOptions)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion> {
        self.calls
            .lock()
            .await
            .push((prompt.to_string(), options.clone()));

        let content = (self.respond)(prompt)?;
        Ok(Completion::text(content, "scripted"))
    }
}
