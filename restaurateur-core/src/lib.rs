pub mod config;
pub mod error;
pub mod llm;
pub mod options;
pub mod pipeline;
pub mod prompts;
pub mod template;
pub mod types;

pub use config::{AppConfig, ConfigError, ProviderKind};
pub use error::GenerateError;
pub use llm::{FakeProvider, GenerationParams, GroqProvider, LlmError, LlmProvider};
pub use options::{Cuisine, Dietary, MealType, UNSET_SENTINEL};
pub use pipeline::{PromptChain, RestaurantGenerator, Stage, StageOutput};
pub use template::{Bindings, PromptTemplate, TemplateError};
pub use types::{GenerationRequest, RestaurantIdea, ValidatedRequest};
