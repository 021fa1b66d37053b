use axum::{response::IntoResponse, Json};
use restaurateur_core::{Cuisine, Dietary, MealType, UNSET_SENTINEL};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Choices for each selector.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OptionsResponse {
    pub cuisines: Vec<Cuisine>,
    pub meal_types: Vec<MealType>,
    pub dietary: Vec<Dietary>,
    /// Value meaning "nothing selected"
    pub unset: String,
}

impl OptionsResponse {
    pub fn all() -> Self {
        Self {
            cuisines: Cuisine::ALL.to_vec(),
            meal_types: MealType::ALL.to_vec(),
            dietary: Dietary::ALL.to_vec(),
            unset: UNSET_SENTINEL.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/options",
    tag = "generate",
    responses(
        (status = 200, description = "Selectable cuisines, meal types and dietary preferences", body = OptionsResponse)
    )
)]
pub async fn list_options() -> impl IntoResponse {
    Json(OptionsResponse::all())
}

#[derive(OpenApi)]
#[openapi(paths(list_options), components(schemas(OptionsResponse)))]
pub struct ApiDoc;
