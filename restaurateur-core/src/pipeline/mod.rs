//! Prompt-chaining pipeline.
//!
//! - [`PromptChain`] renders one template and sends it to a provider
//! - [`Stage`] names the output a chain produces, with an optional fallback chain
//! - [`RestaurantGenerator`] runs the stages in order and threads each output
//!   into the bindings of the stages after it

mod chain;
mod generator;
mod stage;

pub use chain::PromptChain;
pub use generator::{default_stages, RestaurantGenerator};
pub use stage::{Stage, StageOutput};
