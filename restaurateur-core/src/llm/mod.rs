//! Completion providers.
//!
//! Providers are trait objects so the generator can run against the hosted
//! service in production and a [`FakeProvider`] in tests.

mod fake;
mod groq;
mod retry;

pub use fake::FakeProvider;
pub use groq::{GroqProvider, DEFAULT_BASE_URL};
pub use retry::RetryingProvider;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Error type for completion calls.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote service returned {status}: {message}")]
    RemoteService { status: u16, message: String },

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid completion input: {0}")]
    InvalidInput(String),
}

impl LlmError {
    /// Whether repeating the same call might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Transport(_) | LlmError::RateLimited { .. })
    }
}

/// Sampling parameters sent with every prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }
}

impl GenerationParams {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    pub fn validate(&self) -> Result<(), LlmError> {
        if self.model.trim().is_empty() {
            return Err(LlmError::InvalidInput("model must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::InvalidInput(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// A hosted (or fake) text-completion service.
///
/// Implementations must not keep per-call state that changes the result of
/// later calls beyond what the remote service itself does.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and return the generated text verbatim.
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError>;

    /// Short provider name for logs (e.g. "groq", "fake").
    fn provider_name(&self) -> &'static str;
}
