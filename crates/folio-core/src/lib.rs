//! # folio-core
//!
//! Conversation model and provider-agnostic LLM abstraction behind the
//! portfolio site's assistant.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     ChatResponder                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────┐  │
//! │  │ Conversation │──│  ActionTag   │──│  LlmProvider   │  │
//! │  │  transcript  │  │  instruction │  │  (Strategy)    │  │
//! │  └──────────────┘  └──────────────┘  └────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the responder and the research pipeline run
//! against Gemini in production and a `ScriptedProvider` in tests.

pub mod action;
pub mod error;
pub mod message;
pub mod mock;
pub mod provider;
pub mod responder;

pub use action::ActionTag;
pub use error::{AssistantError, Result};
pub use message::{Conversation, Message, Role};
pub use mock::ScriptedProvider;
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use responder::{ChatResponder, APOLOGY};
