//! Chat Responder
//!
//! Flattens a client-supplied conversation into one prompt, asks the model
//! once, and hands back its text. Model trouble never reaches the caller as
//! an error: the visitor gets an apology instead.

use std::sync::Arc;

use crate::action::ActionTag;
use crate::error::{AssistantError, Result};
use crate::message::Conversation;
use crate::provider::{GenerationOptions, LlmProvider};

/// Reply sent when the model fails or answers with nothing
pub const APOLOGY: &str = "I apologize, but I encountered an error processing your request. Please try again with a different question.";

const CLOSING_DIRECTIVE: &str = "Please provide a direct and precise answer. If the question involves calculations, show the calculation steps.";

/// Assemble the full prompt for one chat turn
pub fn build_prompt(conversation: &Conversation, action: ActionTag) -> Result<String> {
    let (_, latest) = conversation.split_latest()?;

    Ok(format!(
        "{instruction}\n\nPrevious conversation:\n{transcript}\n\nUser: {question}\n\n{CLOSING_DIRECTIVE}",
        instruction = action.instruction(),
        transcript = conversation.transcript(),
        question = latest.content,
    ))
}

/// Answers chat turns through an `LlmProvider`
pub struct ChatResponder {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl ChatResponder {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self::with_options(provider, GenerationOptions::chat())
    }

    pub fn with_options(provider: Arc<dyn LlmProvider>, options: GenerationOptions) -> Self {
        Self { provider, options }
    }

    /// Answer the latest message of `conversation`.
    ///
    /// Only an unusable request (no messages) is an error; provider failures
    /// and empty completions become [`APOLOGY`].
    pub async fn respond(&self, conversation: &Conversation, action: ActionTag) -> Result<String> {
        let prompt = build_prompt(conversation, action)?;

        match self.ask(&prompt).await {
            Ok(text) => {
                tracing::debug!(%action, reply_len = text.len(), "chat reply generated");
                Ok(text)
            }
            Err(e) => {
                tracing::error!(%action, provider = self.provider.name(), "Model error: {}", e);
                Ok(APOLOGY.to_string())
            }
        }
    }

    async fn ask(&self, prompt: &str) -> Result<String> {
        let completion = self.provider.complete(prompt, &self.options).await?;
        if completion.is_empty() {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(completion.content)
    }
}
