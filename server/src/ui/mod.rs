//! Browser-facing pages: the selector form and the generated result.

mod render;

pub use render::Pages;
use render::{FormState, Outcome};

use crate::api::classify_error;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use restaurateur_core::{GenerateError, GenerationRequest};
use serde::Deserialize;

/// Shown when cuisine or meal type is left on the sentinel.
pub const MISSING_SELECTION_WARNING: &str = "Please select a cuisine and a meal type.";

/// Returns the router for HTML pages
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
}

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub dietary: String,
}

fn page(state: &AppState, status: StatusCode, form: &FormState, outcome: &Outcome<'_>) -> Response {
    match state.pages.render(form, outcome) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Page could not be rendered");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Response {
    page(&state, StatusCode::OK, &FormState::default(), &Outcome::Empty)
}

pub async fn generate(State(state): State<AppState>, Form(form): Form<GenerateForm>) -> Response {
    let form = FormState {
        cuisine: form.cuisine,
        meal_type: form.meal_type,
        dietary: form.dietary,
    };

    let request =
        match GenerationRequest::from_selections(&form.cuisine, &form.meal_type, &form.dietary) {
            Ok(r) => r,
            Err(e) => {
                let (status, message) = classify_error(&e);
                return page(&state, status, &form, &Outcome::Warning(&message));
            }
        };

    match state.generator.generate(&request).await {
        Ok(idea) => page(&state, StatusCode::OK, &form, &Outcome::Idea(&idea)),
        Err(e @ GenerateError::InvalidRequest(_)) => {
            tracing::debug!(error = %e, "Form submitted without required selections");
            page(
                &state,
                StatusCode::BAD_REQUEST,
                &form,
                &Outcome::Warning(MISSING_SELECTION_WARNING),
            )
        }
        Err(e) => {
            let (status, message) = classify_error(&e);
            page(&state, status, &form, &Outcome::Failure(&message))
        }
    }
}
