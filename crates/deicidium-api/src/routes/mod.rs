//! Route definitions
//!
//! Dashboard routes are mounted under /api; health routes stay outside the
//! rate limiter.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{countries, dashboard, health, wheel};
use crate::state::AppState;

/// Create the API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard_routes())
        .merge(reference_routes())
        .merge(wheel_routes())
}

/// Guild-scoped dashboard data
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/guilds", get(dashboard::list_guilds))
        .route("/members", get(dashboard::list_members))
        .route("/events", get(dashboard::list_events))
}

/// Reference data
fn reference_routes() -> Router<AppState> {
    Router::new().route("/countries", get(countries::list_countries))
}

/// Raffle relay
fn wheel_routes() -> Router<AppState> {
    Router::new().route("/wheel", post(wheel::create_wheel))
}
