use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use restaurateur_core::{GenerateError, GenerationRequest, RestaurantIdea};
use utoipa::OpenApi;

/// Generate a restaurant name, tagline and menu
///
/// Runs three sequential completions: the name first, then a tagline and a
/// menu that both build on it. Nothing is stored. `"None"` or a missing
/// field counts as unset; cuisine and meal type are required.
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "generate",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Generated restaurant idea", body = RestaurantIdea),
        (status = 400, description = "Malformed body, unknown option, or cuisine or meal type not selected", body = ErrorResponse),
        (status = 502, description = "Completion service rejected the request", body = ErrorResponse),
        (status = 503, description = "Completion service unreachable", body = ErrorResponse)
    )
)]
pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return error_response(&GenerateError::InvalidRequest(rejection.body_text()))
        }
    };

    match state.generator.generate(&request).await {
        Ok(idea) => (StatusCode::OK, Json(idea)).into_response(),
        Err(e) => error_response(&e),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(generate),
    components(schemas(GenerationRequest, RestaurantIdea))
)]
pub struct ApiDoc;
