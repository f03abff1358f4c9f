use crate::{AppState, get_profile, health, obtain_token, refresh_token, verify_token};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Token endpoints
        .route("/api/token/", post(obtain_token))
        .route("/api/token/refresh/", post(refresh_token))
        .route("/api/token/verify/", post(verify_token))
        // User endpoints
        .route("/api/users/me/", get(get_profile))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Add shared state
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
