use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/test/unauthed-ping",
    tag = "testing",
    responses(
        (status = 200, description = "Liveness check", body = PingResponse)
    )
)]
pub async fn unauthed_ping() -> impl IntoResponse {
    Json(PingResponse {
        message: "unauthed-ping".to_string(),
    })
}
