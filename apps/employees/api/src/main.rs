use axum::middleware::from_fn;
use axum_helpers::server::{close_postgres, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use observability::metrics_middleware;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation, so startup errors get full reports
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    observability::init_metrics()
        .map_err(|e| eyre::eyre!("Failed to install metrics recorder: {}", e))?;

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    }

    let state = AppState { config, db };

    let api_routes = api::routes(&state);

    // Docs, fallback and the shared middleware stack
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?;

    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()))
        .merge(api::metrics_router())
        .layer(from_fn(metrics_middleware));

    info!(
        shutdown_timeout_secs = state.config.server.shutdown_timeout.as_secs(),
        "Starting employees API"
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, async move {
        info!("Shutting down: closing database connections");
        close_postgres(state.db, "employees").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Employees API shutdown complete");
    Ok(())
}
