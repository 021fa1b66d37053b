//! Prompt texts for the three generation stages.

use crate::template::{PromptTemplate, TemplateError};

/// Asks for a restaurant name. Binds `cuisine`.
pub const NAME_PROMPT: &str = "Suggest a fancy {cuisine} restaurant name.";

/// Asks for a tagline. Binds `restaurant_name`.
pub const TAGLINE_PROMPT: &str =
    "Write a catchy tagline for a restaurant called '{restaurant_name}'.";

/// Asks for a menu. Binds `meal_type`, `restaurant_name`, `cuisine`, `dietary`.
pub const MENU_PROMPT: &str = "Create a detailed {meal_type} menu for a restaurant called \
'{restaurant_name}' that serves {cuisine} cuisine and is {dietary} friendly. \
Include sections like Appetizers, Main Course, Desserts, and Beverages \
with short, appealing descriptions.";

/// [`MENU_PROMPT`] without the dietary clause, used when no preference is set.
pub const MENU_PROMPT_ANY_DIET: &str = "Create a detailed {meal_type} menu for a restaurant \
called '{restaurant_name}' that serves {cuisine} cuisine. \
Include sections like Appetizers, Main Course, Desserts, and Beverages \
with short, appealing descriptions.";

pub fn name_template() -> Result<PromptTemplate, TemplateError> {
    PromptTemplate::parse(NAME_PROMPT)
}

pub fn tagline_template() -> Result<PromptTemplate, TemplateError> {
    PromptTemplate::parse(TAGLINE_PROMPT)
}

pub fn menu_template() -> Result<PromptTemplate, TemplateError> {
    PromptTemplate::parse(MENU_PROMPT)
}

pub fn menu_any_diet_template() -> Result<PromptTemplate, TemplateError> {
    PromptTemplate::parse(MENU_PROMPT_ANY_DIET)
}
