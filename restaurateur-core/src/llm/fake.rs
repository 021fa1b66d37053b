//! Fake completion provider for tests and offline demos.
//!
//! Responses are chosen by substring match on the prompt, so tests can run
//! the whole generator without network access or API costs.

use super::{GenerationParams, LlmError, LlmProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A fake LLM provider.
///
/// Patterns are checked in the order they were added; the first one the
/// prompt contains (case-insensitive) wins.
#[derive(Debug, Default)]
pub struct FakeProvider {
    responses: Vec<(String, String)>,
    default_response: Option<String>,
    /// 1-based call number -> error to return instead of a response
    failures: HashMap<usize, LlmError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    /// Create a FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        Self::new().and_response(prompt_contains, response)
    }

    /// Add a response for prompts containing `prompt_contains`.
    pub fn and_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), response.to_string()));
        self
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Make the `call`-th completion (1-based) fail with `error`.
    pub fn fail_on_call(mut self, call: usize, error: LlmError) -> Self {
        self.failures.insert(call, error);
        self
    }

    /// Canned answers for all three restaurant stages.
    pub fn with_restaurant_responses() -> Self {
        Self::new()
            .and_response("restaurant name", "Saffron Court")
            .and_response("tagline", "Where every spice tells a story.")
            .and_response(
                "menu",
                "## Appetizers\n- **Samosa Chaat**: crisp pastry, tamarind, yoghurt\n\n\
                 ## Main Course\n- **Butter Paneer**: slow-simmered tomato gravy\n\n\
                 ## Desserts\n- **Gulab Jamun**: warm, rose-scented syrup\n\n\
                 ## Beverages\n- **Masala Chai**: spiced black tea",
            )
    }

    /// Number of `complete` calls made so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str, _params: &GenerationParams) -> Result<String, LlmError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        if let Some(error) = self.failures.get(&call) {
            return Err(error.clone());
        }

        let prompt_lower = prompt.to_lowercase();
        if let Some((_, response)) = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
        {
            return Ok(response.clone());
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RemoteService {
                status: 404,
                message: format!(
                    "FakeProvider: no response configured for prompt (first 100 chars): {}",
                    prompt.chars().take(100).collect::<String>()
                ),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
