//! Stage descriptors for the generation pipeline.

use std::fmt;

use crate::error::GenerateError;
use crate::pipeline::chain::PromptChain;
use crate::template::Bindings;
use crate::types::keys;

/// Which part of the result a stage produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageOutput {
    RestaurantName,
    Tagline,
    Menu,
}

impl StageOutput {
    /// Binding key later stages use to read this output.
    pub fn binding_key(&self) -> &'static str {
        match self {
            StageOutput::RestaurantName => keys::RESTAURANT_NAME,
            StageOutput::Tagline => keys::TAGLINE,
            StageOutput::Menu => keys::MENU,
        }
    }
}

impl fmt::Display for StageOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binding_key())
    }
}

#[derive(Debug, Clone)]
struct Fallback {
    when_empty: String,
    chain: PromptChain,
}

/// One pipeline stage: a chain plus the output slot it fills.
///
/// A stage may carry a fallback chain that replaces the main one whenever a
/// given binding is bound to the empty string.
#[derive(Debug, Clone)]
pub struct Stage {
    output: StageOutput,
    chain: PromptChain,
    fallback: Option<Fallback>,
}

impl Stage {
    pub fn new(output: StageOutput, chain: PromptChain) -> Self {
        Self {
            output,
            chain,
            fallback: None,
        }
    }

    /// Use `chain` instead of the main chain when `binding` is empty.
    pub fn with_fallback(mut self, binding: impl Into<String>, chain: PromptChain) -> Self {
        self.fallback = Some(Fallback {
            when_empty: binding.into(),
            chain,
        });
        self
    }

    pub fn output(&self) -> StageOutput {
        self.output
    }

    /// Chain to use for these bindings.
    pub fn chain_for(&self, bindings: &Bindings) -> &PromptChain {
        match &self.fallback {
            Some(fallback) if bindings.get(&fallback.when_empty) == Some("") => &fallback.chain,
            _ => &self.chain,
        }
    }

    /// Every chain this stage might run.
    pub fn chains(&self) -> impl Iterator<Item = &PromptChain> {
        std::iter::once(&self.chain).chain(self.fallback.as_ref().map(|f| &f.chain))
    }

    pub fn render(&self, bindings: &Bindings) -> Result<String, GenerateError> {
        self.chain_for(bindings).render(bindings)
    }

    pub async fn run(&self, bindings: &Bindings) -> Result<String, GenerateError> {
        self.chain_for(bindings).run(bindings).await
    }
}
