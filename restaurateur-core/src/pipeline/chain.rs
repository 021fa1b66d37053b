//! Render-then-complete unit of work.

use std::sync::Arc;

use crate::error::GenerateError;
use crate::llm::{GenerationParams, LlmProvider};
use crate::template::{Bindings, PromptTemplate};

/// A prompt template wired to a provider.
///
/// Errors from rendering and from the provider propagate unchanged.
#[derive(Debug, Clone)]
pub struct PromptChain {
    template: PromptTemplate,
    provider: Arc<dyn LlmProvider>,
    params: GenerationParams,
}

impl PromptChain {
    pub fn new(
        template: PromptTemplate,
        provider: Arc<dyn LlmProvider>,
        params: GenerationParams,
    ) -> Self {
        Self {
            template,
            provider,
            params,
        }
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Render the prompt without calling the provider.
    pub fn render(&self, bindings: &Bindings) -> Result<String, GenerateError> {
        Ok(self.template.render(bindings)?)
    }

    /// Render the prompt, send it, and return the completion text as-is.
    pub async fn run(&self, bindings: &Bindings) -> Result<String, GenerateError> {
        let prompt = self.render(bindings)?;
        let text = self.provider.complete(&prompt, &self.params).await?;
        Ok(text)
    }
}
