//! # polecat-api
//!
//! REST layer for Polecat. Handlers resolve the caller from the bearer token, hand the
//! request to the matching `polecat-clubs` operation and answer with a flash-style body:
//! a message, where the client should go next, and optionally the affected entity.

pub mod auth;
pub mod middleware;
pub mod response;
pub mod routes;

use axum::Router;
use polecat_db::Database;
use std::sync::Arc;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(routes::auth::router())
        .merge(routes::users::router())
        .merge(routes::clubs::router())
        .merge(routes::members::router())
        .merge(routes::applications::router())
        .merge(routes::matches::router())
        .merge(routes::health::router());

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::compression::CompressionLayer::new())
        .with_state(Arc::new(state))
}
