//! # folio-runtime
//!
//! Runtime providers for the folio assistant.
//!
//! ## Providers
//!
//! - **Gemini** (default): Google's hosted `generateContent` API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_runtime::GeminiProvider;
//!
//! let provider = Arc::new(GeminiProvider::from_env()?);
//! let responder = ChatResponder::new(provider);
//! ```

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiProvider};

// Re-export core types for convenience
pub use folio_core::{AssistantError, GenerationOptions, LlmProvider, Result};
