use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::GenerateError;
use crate::options::{parse_selection, Cuisine, Dietary, MealType, UnknownOption};
use crate::template::Bindings;

/// Binding keys shared by the stage templates.
pub mod keys {
    pub const CUISINE: &str = "cuisine";
    pub const MEAL_TYPE: &str = "meal_type";
    pub const DIETARY: &str = "dietary";
    pub const RESTAURANT_NAME: &str = "restaurant_name";
    pub const TAGLINE: &str = "tagline";
    pub const MENU: &str = "menu";
}

/// What the user picked. Any field may still be unset.
///
/// When deserialized, `"None"` and `""` mean unset, same as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerationRequest {
    #[serde(default, deserialize_with = "deserialize_selection")]
    pub cuisine: Option<Cuisine>,
    #[serde(default, deserialize_with = "deserialize_selection")]
    pub meal_type: Option<MealType>,
    #[serde(default, deserialize_with = "deserialize_selection")]
    pub dietary: Option<Dietary>,
}

impl GenerationRequest {
    pub fn new(cuisine: Cuisine, meal_type: MealType, dietary: Option<Dietary>) -> Self {
        Self {
            cuisine: Some(cuisine),
            meal_type: Some(meal_type),
            dietary,
        }
    }

    /// Build a request from raw selector values.
    pub fn from_selections(
        cuisine: &str,
        meal_type: &str,
        dietary: &str,
    ) -> Result<Self, GenerateError> {
        Ok(Self {
            cuisine: parse_selection(cuisine)?,
            meal_type: parse_selection(meal_type)?,
            dietary: parse_selection(dietary)?,
        })
    }

    /// Check required fields. Cuisine and meal type must be set.
    pub fn validate(&self) -> Result<ValidatedRequest, GenerateError> {
        let cuisine = self
            .cuisine
            .ok_or_else(|| GenerateError::InvalidRequest("a cuisine is required".to_string()))?;
        let meal_type = self
            .meal_type
            .ok_or_else(|| GenerateError::InvalidRequest("a meal type is required".to_string()))?;

        Ok(ValidatedRequest {
            cuisine,
            meal_type,
            dietary: self.dietary,
        })
    }
}

impl From<UnknownOption> for GenerateError {
    fn from(err: UnknownOption) -> Self {
        GenerateError::InvalidRequest(err.to_string())
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub cuisine: Cuisine,
    pub meal_type: MealType,
    pub dietary: Option<Dietary>,
}

impl ValidatedRequest {
    /// Initial template bindings. An unset dietary preference binds to `""`.
    pub fn bindings(&self) -> Bindings {
        Bindings::from([
            (keys::CUISINE, self.cuisine.prompt_value()),
            (keys::MEAL_TYPE, self.meal_type.prompt_value()),
            (
                keys::DIETARY,
                self.dietary.map(|d| d.prompt_value()).unwrap_or(""),
            ),
        ])
    }
}

/// Everything one generation run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantIdea {
    pub restaurant_name: String,
    pub tagline: String,
    pub menu: String,
}

fn deserialize_selection<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr<Err = UnknownOption>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) => parse_selection(&value).map_err(de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_cuisine() {
        let request = GenerationRequest {
            cuisine: None,
            meal_type: Some(MealType::Lunch),
            dietary: None,
        };
        let err = request.validate().unwrap_err();
        assert!(err.is_invalid_request());
        assert!(err.to_string().contains("cuisine"));
    }

    #[test]
    fn test_validate_requires_meal_type() {
        let request = GenerationRequest {
            cuisine: Some(Cuisine::Korean),
            meal_type: None,
            dietary: Some(Dietary::Keto),
        };
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("meal type"));
    }

    #[test]
    fn test_bindings_use_empty_string_for_unset_dietary() {
        let validated = GenerationRequest::new(Cuisine::Indian, MealType::Lunch, None)
            .validate()
            .unwrap();
        let bindings = validated.bindings();
        assert_eq!(bindings.get(keys::CUISINE), Some("Indian"));
        assert_eq!(bindings.get(keys::MEAL_TYPE), Some("lunch"));
        assert_eq!(bindings.get(keys::DIETARY), Some(""));
    }

    #[test]
    fn test_from_selections_maps_sentinel() {
        let request = GenerationRequest::from_selections("Japanese", "dinner", "None").unwrap();
        assert_eq!(
            request,
            GenerationRequest::new(Cuisine::Japanese, MealType::Dinner, None)
        );

        let request = GenerationRequest::from_selections("None", "None", "Vegan").unwrap();
        assert_eq!(request.cuisine, None);
        assert_eq!(request.dietary, Some(Dietary::Vegan));
    }

    #[test]
    fn test_from_selections_rejects_unknown_values() {
        let err = GenerationRequest::from_selections("Atlantean", "lunch", "").unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[test]
    fn test_deserialize_treats_sentinel_as_unset() {
        let request: GenerationRequest = serde_json::from_str(
            r#"{"cuisine": "Mexican", "meal_type": "breakfast", "dietary": "None"}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            GenerationRequest::new(Cuisine::Mexican, MealType::Breakfast, None)
        );

        let request: GenerationRequest = serde_json::from_str(r#"{"cuisine": null}"#).unwrap();
        assert_eq!(request, GenerationRequest::default());
    }

    #[test]
    fn test_deserialize_rejects_unknown_values() {
        let result = serde_json::from_str::<GenerationRequest>(r#"{"cuisine": "Lunar"}"#);
        assert!(result.is_err());
    }
}
