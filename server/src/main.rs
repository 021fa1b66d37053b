mod api;
mod telemetry;
mod ui;

use anyhow::Context;
use axum::Router;
use restaurateur_core::{AppConfig, RestaurantGenerator};
use std::env;
use std::sync::Arc;
use utoipa_swagger_ui::SwaggerUi;

/// Everything the handlers need, built once at startup.
pub struct AppContext {
    pub generator: RestaurantGenerator,
    pub pages: ui::Pages,
}

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .merge(ui::router())
        .merge(api::router())
        .merge(swagger_ui)
        .with_state(state);

    telemetry::with_request_tracing(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    telemetry::init_telemetry();

    // A missing credential stops startup; requests are never attempted without one
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        provider = ?config.provider,
        model = %config.model,
        temperature = config.temperature,
        bind_addr = %config.bind_addr,
        timeout_secs = config.timeout.as_secs(),
        "Configuration loaded"
    );

    let provider = config
        .build_provider()
        .context("Failed to create completion provider")?;
    let generator = RestaurantGenerator::new(provider, config.generation_params())
        .context("Failed to compile prompt templates")?;
    let pages = ui::Pages::new().context("Failed to compile page templates")?;

    let app = build_router(Arc::new(AppContext { generator, pages }));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", local_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", local_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
