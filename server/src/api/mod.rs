pub mod generate;
pub mod options;
pub mod testing;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use restaurateur_core::{GenerateError, LlmError};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::AppState;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Shown to users when the completion service fails for any reason.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "The kitchen is having trouble right now. Please try again in a moment.";

/// Routes under /api
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/generate", post(generate::generate))
        .route("/api/options", get(options::list_options))
        .nest("/api/test", testing::router())
}

/// Status code and user-facing message for a generation failure.
///
/// Validation failures are shown as-is. Everything else is logged and
/// replaced by a generic message.
pub fn classify_error(err: &GenerateError) -> (StatusCode, String) {
    match err {
        GenerateError::InvalidRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
        GenerateError::Template(e) => {
            tracing::error!(error = %e, "Prompt template could not be rendered");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERIC_FAILURE_MESSAGE.to_string(),
            )
        }
        GenerateError::Llm(e) => {
            tracing::warn!(error = %e, "Completion service call failed");
            let status = match e {
                LlmError::Transport(_) | LlmError::RateLimited { .. } => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, GENERIC_FAILURE_MESSAGE.to_string())
        }
    }
}

pub fn error_response(err: &GenerateError) -> Response {
    let (status, error) = classify_error(err);
    (status, Json(ErrorResponse { error })).into_response()
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Restaurateur", description = "Restaurant-idea generator API"),
        components(schemas(ErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        generate::ApiDoc::openapi(),
        options::ApiDoc::openapi(),
        testing::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
