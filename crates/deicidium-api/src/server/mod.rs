//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use deicidium_common::{AppConfig, AppError, JwtService};
use deicidium_db::{create_pool, PgEventRepository, PgMemberRepository, PgUserGuildRepository};
use deicidium_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_api, apply_base};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes skip CORS and the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_api(create_router(), config);
    let health = apply_base(health_routes(), config.api.request_timeout());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = deicidium_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, &config.jwt.audience));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_guild_repo(Arc::new(PgUserGuildRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .event_repo(Arc::new(PgEventRepository::new(pool)))
        .query_cache(config.query_cache.clone())
        .upstream(config.upstream.clone())
        .base_url(config.app.base_url.clone())
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    info!(
        resolution = ?config.query_cache.resolution,
        stale_secs = config.query_cache.stale_secs,
        "Service context ready"
    );

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {address}: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
