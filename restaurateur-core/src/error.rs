use thiserror::Error;

use crate::llm::LlmError;
use crate::template::TemplateError;

/// Error returned by the restaurant-idea generator.
///
/// Template and provider failures are carried through untouched so callers
/// can match on the underlying variant.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl GenerateError {
    /// True if the request was rejected before any completion call was made.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, GenerateError::InvalidRequest(_))
    }
}
