//! The restaurant-idea generator.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info_span, Instrument};

use crate::error::GenerateError;
use crate::llm::{GenerationParams, LlmProvider};
use crate::pipeline::chain::PromptChain;
use crate::pipeline::stage::{Stage, StageOutput};
use crate::prompts;
use crate::template::{Bindings, TemplateError};
use crate::types::{keys, GenerationRequest, RestaurantIdea};

/// Keys available before the first stage runs.
const REQUEST_KEYS: [&str; 3] = [keys::CUISINE, keys::MEAL_TYPE, keys::DIETARY];

/// Runs the stages in order, feeding each stage's output to the ones after it.
#[derive(Debug, Clone)]
pub struct RestaurantGenerator {
    stages: Vec<Stage>,
}

impl RestaurantGenerator {
    /// Generator with the standard name, tagline and menu stages.
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        params: GenerationParams,
    ) -> Result<Self, TemplateError> {
        Self::with_stages(default_stages(provider, params)?)
    }

    /// Generator over custom stages.
    ///
    /// Fails if any stage references a placeholder that neither the request
    /// nor an earlier stage provides.
    pub fn with_stages(stages: Vec<Stage>) -> Result<Self, TemplateError> {
        let mut available: HashSet<&str> = REQUEST_KEYS.into_iter().collect();
        for stage in &stages {
            for chain in stage.chains() {
                if let Some(missing) = chain
                    .template()
                    .placeholders()
                    .into_iter()
                    .find(|name| !available.contains(name))
                {
                    return Err(TemplateError::MissingBinding {
                        name: missing.to_string(),
                    });
                }
            }
            available.insert(stage.output().binding_key());
        }
        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Generate a name, tagline and menu.
    ///
    /// The request is validated before any completion call. If any stage
    /// fails, its error is returned and nothing else.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<RestaurantIdea, GenerateError> {
        let validated = request.validate()?;
        let mut bindings = validated.bindings();

        tracing::info!(
            cuisine = %validated.cuisine,
            meal_type = %validated.meal_type,
            dietary = validated.dietary.map(|d| d.label()).unwrap_or("none"),
            "Generating restaurant idea"
        );

        for stage in &self.stages {
            let output = stage
                .run(&bindings)
                .instrument(info_span!("pipeline_stage", stage = %stage.output()))
                .await?;
            tracing::debug!(stage = %stage.output(), len = output.len(), "Stage complete");
            bindings.insert(stage.output().binding_key(), output);
        }

        Ok(RestaurantIdea {
            restaurant_name: take_output(&bindings, StageOutput::RestaurantName)?,
            tagline: take_output(&bindings, StageOutput::Tagline)?,
            menu: take_output(&bindings, StageOutput::Menu)?,
        })
    }

    /// Render every stage's prompt without calling the provider.
    ///
    /// Outputs of earlier stages are stood in for by `<binding_key>`.
    pub fn render_prompts(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<(StageOutput, String)>, GenerateError> {
        let mut bindings = request.validate()?.bindings();
        let mut prompts = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            prompts.push((stage.output(), stage.render(&bindings)?));
            let key = stage.output().binding_key();
            bindings.insert(key, format!("<{}>", key));
        }
        Ok(prompts)
    }
}

fn take_output(bindings: &Bindings, output: StageOutput) -> Result<String, GenerateError> {
    bindings
        .get(output.binding_key())
        .map(str::to_string)
        .ok_or_else(|| {
            TemplateError::MissingBinding {
                name: output.binding_key().to_string(),
            }
            .into()
        })
}

/// Name, then tagline, then menu. The menu stage drops its dietary clause
/// when no preference was chosen.
pub fn default_stages(
    provider: Arc<dyn LlmProvider>,
    params: GenerationParams,
) -> Result<Vec<Stage>, TemplateError> {
    let chain = |template| PromptChain::new(template, provider.clone(), params.clone());

    Ok(vec![
        Stage::new(StageOutput::RestaurantName, chain(prompts::name_template()?)),
        Stage::new(StageOutput::Tagline, chain(prompts::tagline_template()?)),
        Stage::new(StageOutput::Menu, chain(prompts::menu_template()?))
            .with_fallback(keys::DIETARY, chain(prompts::menu_any_diet_template()?)),
    ])
}
