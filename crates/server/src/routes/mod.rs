//! HTTP route handlers for the registry API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health         - Liveness check
//! GET    /health/ready   - Readiness check (store reachable)
//!
//! # Users
//! GET    /users          - List all users
//! POST   /users          - Create a user
//! PUT    /users/{id}     - Update the supplied fields of a user
//! DELETE /users/{id}     - Delete a user
//! ```

pub mod health;
pub mod users;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Path prefix of the user collection.
pub const USERS_PREFIX: &str = "/users";

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/{id}", put(users::update).delete(users::delete))
}

/// Create all routes for the registry.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest(USERS_PREFIX, user_routes())
}

/// Build the complete application: routes, middleware, and state.
///
/// Cross-origin requests are allowed from any origin.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes()
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(cors)
        .with_state(state)
}
