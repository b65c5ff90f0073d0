use std::time::Duration;

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// How long shutdown waits for cleanup before giving up.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!("Connected to MongoDB database: {}", config.mongodb.database());

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    // API routes get nested under /api and wrapped with the OpenAPI UIs
    // and common middleware; liveness lives at the root.
    let api_routes = api::routes(&state);
    let app = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)
        .await?
        .merge(health_router(state.config.app.clone()));

    info!("Starting catalog API on {}", state.config.server.address());

    create_production_app(app, &state.config.server, SHUTDOWN_TIMEOUT, async move {
        // Dropping the client closes its connection pool
        info!("Closing MongoDB connections");
        drop(state.mongo_client);
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
